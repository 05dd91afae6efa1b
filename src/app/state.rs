// src/app/state.rs — single source of truth for the browser UI
use std::collections::BTreeMap;
use std::rc::Rc;

use itertools::Itertools;
use tracing::{debug, info};

use super::catalog::{
    Catalog, MediaItem, MOST_LIKED_LIMIT, MOST_LIKED_ROW_ID, MY_LIST_ROW_ID,
};
use super::filters::{normalize_query, search_ids};
use super::storage::{
    KeyValueStore, Persisted, LIKE_COUNTS_KEY, MY_LIST_KEY, USER_LIKES_KEY,
};

pub const MY_LIST_ROW_TITLE: &str = "My List";

/// Which header dropdown is open. One enum, so both open is unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dropdown {
    #[default]
    None,
    Profile,
    Notifications,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollRequest {
    Top,
    MyList,
}

/// Everything a view can ask the controller to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    SelectForDetail(String),
    MoreInfo(String),
    CloseDetail,
    Play(String),
    ClosePlayer,
    ToggleMyList(String),
    ToggleLike(String),
    SignOut,
    LogoClick,
    ShowMyList,
    ToggleNotifications,
    ToggleProfile,
    CloseDropdowns,
    SetScrolled(bool),
}

/// A catalog item paired with its effective like count.
#[derive(Clone, Copy, Debug)]
pub struct LikedItem<'a> {
    pub item: &'a MediaItem,
    pub likes: u32,
}

#[derive(Clone, Debug)]
pub struct RowView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub items: Vec<LikedItem<'a>>,
}

impl RowView<'_> {
    pub fn is_my_list(&self) -> bool {
        self.id == MY_LIST_ROW_ID
    }
}

pub struct AppState {
    catalog: Catalog,

    // overlays
    playing: Option<String>,
    detailed: Option<String>,

    // search
    search_query: String,
    search_results: Vec<String>,
    search_suggestions: Vec<String>,

    // header
    dropdown: Dropdown,
    scrolled: bool,
    scroll_request: Option<ScrollRequest>,

    // persisted preferences
    my_list: Persisted<Vec<String>>,
    user_likes: Persisted<Vec<String>>,
    like_counts: Persisted<BTreeMap<String, u32>>,
}

impl AppState {
    pub fn new(catalog: Catalog, store: Rc<dyn KeyValueStore>) -> Self {
        let my_list = Persisted::load(Rc::clone(&store), MY_LIST_KEY, Vec::new());
        let user_likes = Persisted::load(Rc::clone(&store), USER_LIKES_KEY, Vec::new());
        let like_counts = Persisted::load(store, LIKE_COUNTS_KEY, BTreeMap::new());
        debug!(
            "loaded preferences: {} saved, {} liked, {} like overrides",
            my_list.get().len(),
            user_likes.get().len(),
            like_counts.get().len()
        );

        Self {
            catalog,
            playing: None,
            detailed: None,
            search_query: String::new(),
            search_results: Vec::new(),
            search_suggestions: Vec::new(),
            dropdown: Dropdown::None,
            scrolled: false,
            scroll_request: None,
            my_list,
            user_likes,
            like_counts,
        }
    }

    // ---------- transitions ----------
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");
        match intent {
            Intent::Search(query) => self.search(query),
            Intent::SelectForDetail(id) | Intent::MoreInfo(id) => {
                if self.catalog.contains(&id) {
                    self.detailed = Some(id);
                }
            }
            Intent::CloseDetail => self.detailed = None,
            Intent::Play(id) => {
                if self.catalog.contains(&id) {
                    self.playing = Some(id);
                }
            }
            Intent::ClosePlayer => self.playing = None,
            Intent::ToggleMyList(id) => self.toggle_my_list(&id),
            Intent::ToggleLike(id) => self.toggle_like(&id),
            Intent::SignOut => {
                if self.dropdown == Dropdown::Profile {
                    self.dropdown = Dropdown::None;
                }
                info!("signing out");
            }
            Intent::LogoClick => {
                self.scroll_request = Some(ScrollRequest::Top);
                self.search_query.clear();
                self.search_results.clear();
                self.search_suggestions.clear();
            }
            Intent::ShowMyList => {
                if !self.my_list_items().is_empty() {
                    self.scroll_request = Some(ScrollRequest::MyList);
                }
            }
            Intent::ToggleNotifications => {
                self.dropdown = match self.dropdown {
                    Dropdown::Notifications => Dropdown::None,
                    _ => Dropdown::Notifications,
                };
            }
            Intent::ToggleProfile => {
                self.dropdown = match self.dropdown {
                    Dropdown::Profile => Dropdown::None,
                    _ => Dropdown::Profile,
                };
            }
            Intent::CloseDropdowns => self.dropdown = Dropdown::None,
            Intent::SetScrolled(scrolled) => self.scrolled = scrolled,
        }
    }

    fn search(&mut self, query: String) {
        if normalize_query(&query).is_empty() {
            self.search_results.clear();
            self.search_suggestions.clear();
        } else {
            let hits = search_ids(&self.catalog.items, &query);
            self.search_suggestions = hits.clone();
            self.search_results = hits;
        }
        self.search_query = query;
    }

    fn toggle_my_list(&mut self, id: &str) {
        if !self.catalog.contains(id) {
            debug!("ignoring my list toggle for unknown item {id}");
            return;
        }
        self.my_list.update(|prev| {
            if prev.iter().any(|x| x == id) {
                prev.iter().filter(|x| *x != id).cloned().collect()
            } else {
                let mut next = prev.clone();
                next.push(id.to_string());
                next
            }
        });
    }

    fn toggle_like(&mut self, id: &str) {
        if !self.catalog.contains(id) {
            debug!("ignoring like toggle for unknown item {id}");
            return;
        }
        let current = self.effective_likes(id);
        if self.is_liked(id) {
            self.user_likes
                .update(|prev| prev.iter().filter(|x| *x != id).cloned().collect());
            self.like_counts.update(|prev| {
                let mut next = prev.clone();
                next.insert(id.to_string(), current.saturating_sub(1));
                next
            });
        } else {
            self.user_likes.update(|prev| {
                let mut next = prev.clone();
                next.push(id.to_string());
                next
            });
            self.like_counts.update(|prev| {
                let mut next = prev.clone();
                next.insert(id.to_string(), current.saturating_add(1));
                next
            });
        }
    }

    // ---------- plain reads ----------
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Search view replaces the browse view while a query is present.
    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    pub fn in_my_list(&self, id: &str) -> bool {
        self.my_list.get().iter().any(|x| x == id)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.user_likes.get().iter().any(|x| x == id)
    }

    /// Override if one was recorded, otherwise the shipped default.
    pub fn effective_likes(&self, id: &str) -> u32 {
        match self.like_counts.get().get(id) {
            Some(n) => *n,
            None => self.catalog.find(id).map_or(0, |m| m.likes),
        }
    }

    // ---------- derived views ----------
    fn liked(&self, item: &'_ MediaItem) -> u32 {
        self.effective_likes(&item.id)
    }

    fn resolve(&self, id: &str) -> Option<LikedItem<'_>> {
        self.catalog.find(id).map(|item| LikedItem {
            item,
            likes: self.liked(item),
        })
    }

    pub fn playing(&self) -> Option<LikedItem<'_>> {
        self.playing.as_deref().and_then(|id| self.resolve(id))
    }

    pub fn detailed(&self) -> Option<LikedItem<'_>> {
        self.detailed.as_deref().and_then(|id| self.resolve(id))
    }

    pub fn featured(&self) -> Option<LikedItem<'_>> {
        self.catalog
            .featured()
            .map(|item| LikedItem { item, likes: self.liked(item) })
    }

    pub fn search_results(&self) -> Vec<LikedItem<'_>> {
        self.search_results
            .iter()
            .filter_map(|id| self.resolve(id))
            .collect()
    }

    pub fn search_suggestions(&self) -> Vec<LikedItem<'_>> {
        self.search_suggestions
            .iter()
            .filter_map(|id| self.resolve(id))
            .collect()
    }

    pub fn catalog_with_likes(&self) -> Vec<LikedItem<'_>> {
        self.catalog
            .items
            .iter()
            .map(|item| LikedItem { item, likes: self.liked(item) })
            .collect()
    }

    /// Top items by effective likes; ties keep catalog order.
    pub fn most_liked(&self) -> Vec<LikedItem<'_>> {
        self.catalog_with_likes()
            .into_iter()
            .sorted_by_key(|m| std::cmp::Reverse(m.likes))
            .take(MOST_LIKED_LIMIT)
            .collect()
    }

    /// Saved items in catalog order.
    pub fn my_list_items(&self) -> Vec<LikedItem<'_>> {
        self.catalog_with_likes()
            .into_iter()
            .filter(|m| self.in_my_list(&m.item.id))
            .collect()
    }

    /// Rows for the browse view; My List first when it has anything in it.
    pub fn rows(&self) -> Vec<RowView<'_>> {
        let mut out = Vec::with_capacity(self.catalog.rows.len() + 1);

        let saved = self.my_list_items();
        if !saved.is_empty() {
            out.push(RowView {
                id: MY_LIST_ROW_ID,
                title: MY_LIST_ROW_TITLE,
                items: saved,
            });
        }

        for row in &self.catalog.rows {
            let items = if row.id == MOST_LIKED_ROW_ID {
                self.most_liked()
            } else {
                row.item_ids
                    .iter()
                    .filter_map(|id| self.resolve(id))
                    .collect()
            };
            out.push(RowView {
                id: &row.id,
                title: &row.title,
                items,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::ContentRow;
    use crate::app::storage::{MemoryStore, SqliteStore};

    fn two_item_catalog() -> Catalog {
        Catalog::new(
            vec![
                MediaItem::new("a", "Alpha", "first", &["Drama"], 10),
                MediaItem::new("b", "Bravo", "second", &["Comedy"], 5),
            ],
            vec![
                ContentRow::new("all", "All", &["a", "b"]),
                ContentRow::new(MOST_LIKED_ROW_ID, "Most Liked", &[]),
            ],
            "a",
        )
    }

    fn state_with(catalog: Catalog) -> AppState {
        AppState::new(catalog, Rc::new(MemoryStore::new()))
    }

    fn ids(items: &[LikedItem<'_>]) -> Vec<String> {
        items.iter().map(|m| m.item.id.clone()).collect()
    }

    #[test]
    fn blank_search_clears_results_and_suggestions() {
        let mut st = state_with(Catalog::builtin());
        st.dispatch(Intent::Search("drama".into()));
        assert!(!st.search_results().is_empty());

        st.dispatch(Intent::Search("   ".into()));
        assert!(st.search_results().is_empty());
        assert!(st.search_suggestions().is_empty());

        st.dispatch(Intent::Search(String::new()));
        assert!(st.search_results().is_empty());
        assert!(!st.is_searching());
    }

    #[test]
    fn suggestions_mirror_results() {
        let mut st = state_with(Catalog::builtin());
        st.dispatch(Intent::Search("Sci".into()));
        assert_eq!(ids(&st.search_results()), ids(&st.search_suggestions()));
        assert!(ids(&st.search_results()).contains(&"orbit".to_string()));
    }

    #[test]
    fn detail_and_player_are_independent() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::MoreInfo("a".into()));
        st.dispatch(Intent::Play("b".into()));
        assert_eq!(st.detailed().map(|m| m.item.id.as_str()), Some("a"));
        assert_eq!(st.playing().map(|m| m.item.id.as_str()), Some("b"));

        st.dispatch(Intent::SelectForDetail("b".into()));
        assert_eq!(st.detailed().map(|m| m.item.id.as_str()), Some("b"));

        st.dispatch(Intent::ClosePlayer);
        assert!(st.playing().is_none());
        assert!(st.detailed().is_some());
        st.dispatch(Intent::CloseDetail);
        assert!(st.detailed().is_none());
    }

    #[test]
    fn toggle_my_list_is_involutive() {
        let mut st = state_with(two_item_catalog());
        assert!(!st.in_my_list("a"));
        st.dispatch(Intent::ToggleMyList("a".into()));
        assert!(st.in_my_list("a"));
        st.dispatch(Intent::ToggleMyList("a".into()));
        assert!(!st.in_my_list("a"));

        st.dispatch(Intent::ToggleMyList("b".into()));
        st.dispatch(Intent::ToggleMyList("a".into()));
        st.dispatch(Intent::ToggleMyList("a".into()));
        assert!(st.in_my_list("b"));
        assert!(!st.in_my_list("a"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleMyList("ghost".into()));
        st.dispatch(Intent::ToggleLike("ghost".into()));
        st.dispatch(Intent::Play("ghost".into()));
        assert!(!st.in_my_list("ghost"));
        assert!(!st.is_liked("ghost"));
        assert!(st.playing().is_none());
    }

    #[test]
    fn toggle_like_round_trips() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleLike("a".into()));
        assert!(st.is_liked("a"));
        assert_eq!(st.effective_likes("a"), 11);
        st.dispatch(Intent::ToggleLike("a".into()));
        assert!(!st.is_liked("a"));
        assert_eq!(st.effective_likes("a"), 10);
    }

    #[test]
    fn like_count_never_goes_negative() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        // liked, but someone already drove the override to zero
        store.set(USER_LIKES_KEY, r#"["b"]"#).unwrap();
        store.set(LIKE_COUNTS_KEY, r#"{"b":0}"#).unwrap();
        let mut st = AppState::new(two_item_catalog(), store);
        assert_eq!(st.effective_likes("b"), 0);

        st.dispatch(Intent::ToggleLike("b".into()));
        assert!(!st.is_liked("b"));
        assert_eq!(st.effective_likes("b"), 0);

        st.dispatch(Intent::ToggleLike("b".into()));
        assert!(st.is_liked("b"));
        assert_eq!(st.effective_likes("b"), 1);

        st.dispatch(Intent::ToggleLike("b".into()));
        assert!(!st.is_liked("b"));
        assert_eq!(st.effective_likes("b"), 0);
    }

    #[test]
    fn zero_default_item_recovers_after_like_unlike() {
        let catalog = Catalog::new(
            vec![MediaItem::new("z", "Zero", "nobody", &[], 0)],
            Vec::new(),
            "z",
        );
        let mut st = state_with(catalog);
        st.dispatch(Intent::ToggleLike("z".into()));
        assert_eq!(st.effective_likes("z"), 1);
        assert!(st.is_liked("z"));
        st.dispatch(Intent::ToggleLike("z".into()));
        assert_eq!(st.effective_likes("z"), 0);
        assert!(!st.is_liked("z"));
    }

    #[test]
    fn liking_both_keeps_order_in_most_liked() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleLike("a".into()));
        st.dispatch(Intent::ToggleLike("b".into()));
        assert_eq!(st.effective_likes("a"), 11);
        assert_eq!(st.effective_likes("b"), 6);
        assert_eq!(ids(&st.most_liked()), vec!["a", "b"]);
    }

    #[test]
    fn most_liked_is_bounded_sorted_and_recomputed() {
        let mut st = state_with(Catalog::builtin());
        let before = st.most_liked();
        assert_eq!(before.len(), MOST_LIKED_LIMIT);
        assert!(before.windows(2).all(|w| w[0].likes >= w[1].likes));

        // push an item from outside the top 8 past the leader
        let outsider = st
            .catalog_with_likes()
            .into_iter()
            .min_by_key(|m| m.likes)
            .map(|m| m.item.id.clone())
            .unwrap();
        assert!(!ids(&before).contains(&outsider));

        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        store
            .set(LIKE_COUNTS_KEY, &format!(r#"{{"{outsider}":99998}}"#))
            .unwrap();
        let mut st2 = AppState::new(Catalog::builtin(), store);
        st2.dispatch(Intent::ToggleLike(outsider.clone()));
        let after = st2.most_liked();
        assert_eq!(after.first().map(|m| m.item.id.clone()), Some(outsider));
        assert_eq!(after.first().map(|m| m.likes), Some(99999));
        assert_eq!(after.len(), MOST_LIKED_LIMIT);

        // plain like on the leader keeps it first
        let leader = before[0].item.id.clone();
        st.dispatch(Intent::ToggleLike(leader.clone()));
        assert_eq!(st.most_liked()[0].item.id, leader);
    }

    #[test]
    fn most_liked_ties_follow_catalog_order() {
        let catalog = Catalog::new(
            vec![
                MediaItem::new("x", "X", "", &[], 3),
                MediaItem::new("y", "Y", "", &[], 7),
                MediaItem::new("z", "Z", "", &[], 3),
            ],
            vec![ContentRow::new(MOST_LIKED_ROW_ID, "Most Liked", &[])],
            "x",
        );
        let st = state_with(catalog);
        assert_eq!(ids(&st.most_liked()), vec!["y", "x", "z"]);
    }

    #[test]
    fn rows_resolve_with_live_like_counts() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleLike("b".into()));
        let rows = st.rows();
        let all = rows.iter().find(|r| r.id == "all").unwrap();
        assert_eq!(all.items[1].likes, 6);
        let top = rows.iter().find(|r| r.id == MOST_LIKED_ROW_ID).unwrap();
        assert_eq!(ids(&top.items), vec!["a", "b"]);
    }

    #[test]
    fn my_list_row_first_only_when_non_empty() {
        let mut st = state_with(two_item_catalog());
        assert!(st.rows().iter().all(|r| !r.is_my_list()));

        st.dispatch(Intent::ToggleMyList("b".into()));
        st.dispatch(Intent::ToggleMyList("a".into()));
        let rows = st.rows();
        assert!(rows[0].is_my_list());
        assert_eq!(rows[0].title, MY_LIST_ROW_TITLE);
        // catalog order, not insertion order
        assert_eq!(ids(&rows[0].items), vec!["a", "b"]);
        assert_eq!(rows.iter().filter(|r| r.is_my_list()).count(), 1);

        st.dispatch(Intent::ToggleMyList("a".into()));
        st.dispatch(Intent::ToggleMyList("b".into()));
        assert!(st.rows().iter().all(|r| !r.is_my_list()));
    }

    #[test]
    fn dropdowns_are_mutually_exclusive() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleNotifications);
        assert_eq!(st.dropdown(), Dropdown::Notifications);
        st.dispatch(Intent::ToggleProfile);
        assert_eq!(st.dropdown(), Dropdown::Profile);
        st.dispatch(Intent::ToggleNotifications);
        assert_eq!(st.dropdown(), Dropdown::Notifications);
        st.dispatch(Intent::ToggleNotifications);
        assert_eq!(st.dropdown(), Dropdown::None);

        st.dispatch(Intent::ToggleProfile);
        st.dispatch(Intent::CloseDropdowns);
        assert_eq!(st.dropdown(), Dropdown::None);
    }

    #[test]
    fn sign_out_only_closes_profile() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleMyList("a".into()));
        st.dispatch(Intent::ToggleProfile);
        st.dispatch(Intent::SignOut);
        assert_eq!(st.dropdown(), Dropdown::None);
        assert!(st.in_my_list("a"));
    }

    #[test]
    fn sign_out_leaves_notifications_open() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ToggleNotifications);
        st.dispatch(Intent::SignOut);
        assert_eq!(st.dropdown(), Dropdown::Notifications);
    }

    #[test]
    fn logo_click_restores_browse_view() {
        let mut st = state_with(Catalog::builtin());
        st.dispatch(Intent::Search("drama".into()));
        assert!(st.is_searching());
        assert!(!st.search_results().is_empty());

        st.dispatch(Intent::LogoClick);
        assert!(!st.is_searching());
        assert_eq!(st.search_query(), "");
        assert!(st.search_results().is_empty());
        assert!(st.search_suggestions().is_empty());
        assert_eq!(st.take_scroll_request(), Some(ScrollRequest::Top));
        assert_eq!(st.take_scroll_request(), None);
    }

    #[test]
    fn show_my_list_needs_saved_items() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::ShowMyList);
        assert_eq!(st.take_scroll_request(), None);
        st.dispatch(Intent::ToggleMyList("a".into()));
        st.dispatch(Intent::ShowMyList);
        assert_eq!(st.take_scroll_request(), Some(ScrollRequest::MyList));
    }

    #[test]
    fn scroll_flag_follows_observer() {
        let mut st = state_with(two_item_catalog());
        st.dispatch(Intent::SetScrolled(true));
        assert!(st.is_scrolled());
        st.dispatch(Intent::SetScrolled(false));
        assert!(!st.is_scrolled());
    }

    #[test]
    fn preferences_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");
        {
            let store: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
            let mut st = AppState::new(two_item_catalog(), store);
            st.dispatch(Intent::ToggleMyList("b".into()));
            st.dispatch(Intent::ToggleLike("a".into()));
            st.dispatch(Intent::Search("alpha".into()));
        }
        let store: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path).unwrap());
        let st = AppState::new(two_item_catalog(), store);
        assert!(st.in_my_list("b"));
        assert!(st.is_liked("a"));
        assert_eq!(st.effective_likes("a"), 11);
        // transient state does not survive
        assert!(!st.is_searching());
    }
}
