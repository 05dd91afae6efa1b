use super::catalog::MediaItem;

/// Trim and lower-case a raw query; empty means "no search".
pub fn normalize_query(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive substring match over title, description and genres.
/// `needle` must already be normalized.
pub fn matches_query(item: &MediaItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.genre.iter().any(|g| g.to_lowercase().contains(needle))
}

/// Ids of matching items, in catalog order. Empty query matches nothing.
pub fn search_ids(items: &[MediaItem], query: &str) -> Vec<String> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|m| matches_query(m, &needle))
        .map(|m| m.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::Catalog;

    fn sample() -> Vec<MediaItem> {
        vec![
            MediaItem::new("a", "Night Shift", "Nurses on call", &["Drama"], 3),
            MediaItem::new("b", "Orbit", "Alone in space", &["Sci-Fi"], 1),
            MediaItem::new("c", "Laugh Track", "A sitcom about sitcoms", &["Comedy", "Drama"], 2),
        ]
    }

    #[test]
    fn blank_queries_match_nothing() {
        for q in ["", " ", "\t\n  "] {
            assert!(search_ids(&sample(), q).is_empty(), "query {q:?}");
        }
    }

    #[test]
    fn matches_title_description_and_genre() {
        let items = sample();
        assert_eq!(search_ids(&items, "ORBIT"), vec!["b"]);
        assert_eq!(search_ids(&items, "  sitcom "), vec!["c"]);
        assert_eq!(search_ids(&items, "drama"), vec!["a", "c"]);
        assert!(search_ids(&items, "western").is_empty());
    }

    #[test]
    fn membership_agrees_with_substring_rule_over_builtin() {
        let catalog = Catalog::builtin();
        for q in ["the", "sci", "DOC", "a", "crown", "zzz", "-"] {
            let hits = search_ids(&catalog.items, q);
            let needle = q.to_lowercase();
            for m in &catalog.items {
                let expected = m.title.to_lowercase().contains(&needle)
                    || m.description.to_lowercase().contains(&needle)
                    || m.genre.iter().any(|g| g.to_lowercase().contains(&needle));
                assert_eq!(hits.contains(&m.id), expected, "query {q:?} item {}", m.id);
            }
        }
    }
}
