// src/app/catalog.rs
use once_cell::sync::Lazy;

/// Row whose membership is computed from like counts instead of curated.
pub const MOST_LIKED_ROW_ID: &str = "most-liked";
/// Synthetic row built from the user's saved items; never part of a catalog.
pub const MY_LIST_ROW_ID: &str = "mylist";
/// How many items the most-liked row shows.
pub const MOST_LIKED_LIMIT: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: Vec<String>,
    /// Shipped default; see `AppState::effective_likes` for the live value.
    pub likes: u32,
    pub image: String,
    pub backdrop: String,
    pub year: i32,
    pub rating: String,
    pub duration: String,
    pub match_score: u8,
    pub video_url: Option<String>,
}

impl MediaItem {
    /// Minimal item; presentational fields left blank.
    pub fn new(id: &str, title: &str, description: &str, genre: &[&str], likes: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            genre: genre.iter().map(|g| g.to_string()).collect(),
            likes,
            image: String::new(),
            backdrop: String::new(),
            year: 0,
            rating: String::new(),
            duration: String::new(),
            match_score: 0,
            video_url: None,
        }
    }

    fn with_art(mut self, image: &str, backdrop: &str) -> Self {
        self.image = image.to_string();
        self.backdrop = backdrop.to_string();
        self
    }

    fn with_meta(mut self, year: i32, rating: &str, duration: &str, match_score: u8) -> Self {
        self.year = year;
        self.rating = rating.to_string();
        self.duration = duration.to_string();
        self.match_score = match_score;
        self
    }

    fn with_video(mut self, url: &str) -> Self {
        self.video_url = Some(url.to_string());
        self
    }
}

/// A curated strip of items, stored by id and resolved at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub item_ids: Vec<String>,
}

impl ContentRow {
    pub fn new(id: &str, title: &str, item_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            item_ids: item_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub items: Vec<MediaItem>,
    pub rows: Vec<ContentRow>,
    pub featured_id: String,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>, rows: Vec<ContentRow>, featured_id: &str) -> Self {
        Self {
            items,
            rows,
            featured_id: featured_id.to_string(),
        }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn find(&self, id: &str) -> Option<&MediaItem> {
        self.items.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Hero item; falls back to the first item when the featured id is unknown.
    pub fn featured(&self) -> Option<&MediaItem> {
        self.find(&self.featured_id).or_else(|| self.items.first())
    }

    /// Every artwork URL referenced by the catalog, deduplicated, in display order.
    pub fn artwork_urls(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let featured = self.featured().map(|m| m.backdrop.clone());
        for url in featured
            .into_iter()
            .chain(self.items.iter().map(|m| m.image.clone()))
            .chain(self.items.iter().map(|m| m.backdrop.clone()))
        {
            if !url.is_empty() && !out.contains(&url) {
                out.push(url);
            }
        }
        out
    }
}

fn unsplash(photo: &str, w: u32) -> String {
    format!("https://images.unsplash.com/{photo}?w={w}&fit=crop&auto=format")
}

fn art(item: MediaItem, poster: &str, backdrop: &str) -> MediaItem {
    item.with_art(&unsplash(poster, 400), &unsplash(backdrop, 1280))
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let items = vec![
        art(
            MediaItem::new(
                "stranger-signals",
                "Stranger Signals",
                "A small-town radio operator picks up a broadcast from a station that burned down thirty years ago, and the voice on the other end knows her name.",
                &["Sci-Fi", "Mystery", "Thriller"],
                1284,
            ),
            "photo-1536440136628-849c177e76a1",
            "photo-1478720568477-152d9b164e26",
        )
        .with_meta(2024, "TV-14", "3 Seasons", 98)
        .with_video("https://www.youtube.com/watch?v=b9EkMc79ZSU"),
        art(
            MediaItem::new(
                "the-last-harbor",
                "The Last Harbor",
                "When a storm cuts off a fishing village, a retired coast guard captain must lead one final rescue.",
                &["Drama", "Adventure"],
                932,
            ),
            "photo-1500530855697-b586d89ba3ee",
            "photo-1505142468610-359e7d316be0",
        )
        .with_meta(2023, "PG-13", "2h 8m", 94),
        art(
            MediaItem::new(
                "neon-district",
                "Neon District",
                "A detective with a failing memory implant hunts a killer through a city that never switches its lights off.",
                &["Action", "Sci-Fi", "Crime"],
                1102,
            ),
            "photo-1519608487953-e999c86e7455",
            "photo-1514565131-fce0801e5785",
        )
        .with_meta(2022, "R", "1h 56m", 91)
        .with_video("https://www.youtube.com/watch?v=gCcx85zbxz4"),
        art(
            MediaItem::new(
                "kitchen-nights",
                "Kitchen Nights",
                "Behind the swinging doors of a failing bistro, a chaotic brigade of cooks bets everything on one review.",
                &["Comedy", "Drama"],
                641,
            ),
            "photo-1414235077428-338989a2e8c0",
            "photo-1556910103-1c02745aae4d",
        )
        .with_meta(2021, "TV-MA", "2 Seasons", 87),
        art(
            MediaItem::new(
                "summit",
                "Summit",
                "Four climbers, one oxygen tank, and eight thousand metres between them and the valley floor.",
                &["Adventure", "Thriller", "Documentary"],
                514,
            ),
            "photo-1464822759023-fed622ff2c3b",
            "photo-1454496522488-7a8e488e8606",
        )
        .with_meta(2020, "PG-13", "1h 42m", 89),
        art(
            MediaItem::new(
                "paper-hearts",
                "Paper Hearts",
                "Two rival bookshop owners on the same street start exchanging anonymous letters without knowing who writes back.",
                &["Romance", "Comedy"],
                778,
            ),
            "photo-1481627834876-b7833e8f5570",
            "photo-1507842217343-583bb7270b66",
        )
        .with_meta(2023, "PG", "1h 51m", 85),
        art(
            MediaItem::new(
                "deep-current",
                "Deep Current",
                "A marine biologist discovers a signal pattern beneath the Pacific that rewrites what we know about whales.",
                &["Documentary", "Nature"],
                455,
            ),
            "photo-1518467166778-b88f373ffec7",
            "photo-1544551763-46a013bb70d5",
        )
        .with_meta(2022, "TV-G", "1h 34m", 93),
        art(
            MediaItem::new(
                "iron-crown",
                "The Iron Crown",
                "Three heirs, one throne, and a kingdom that would rather burn than kneel.",
                &["Fantasy", "Drama", "Action"],
                1411,
            ),
            "photo-1533134486753-c833f0ed4866",
            "photo-1518709268805-4e9042af9f23",
        )
        .with_meta(2024, "TV-MA", "4 Seasons", 97)
        .with_video("https://www.youtube.com/watch?v=KPLWWIOCOOQ"),
        art(
            MediaItem::new(
                "midnight-run-club",
                "Midnight Run Club",
                "A group of insomniacs who only meet after midnight stumble onto a heist in progress.",
                &["Comedy", "Crime"],
                602,
            ),
            "photo-1452626038306-9aae5e071dd3",
            "photo-1493246507139-91e8fad9978e",
        )
        .with_meta(2021, "R", "1h 38m", 82),
        art(
            MediaItem::new(
                "orbit",
                "Orbit",
                "Stranded on a failing station, the last crew member has ninety minutes per orbit to fix it before the dark side freezes everything.",
                &["Sci-Fi", "Thriller"],
                987,
            ),
            "photo-1446776811953-b23d57bd21aa",
            "photo-1451187580459-43490279c0fa",
        )
        .with_meta(2023, "PG-13", "2h 1m", 95),
        art(
            MediaItem::new(
                "hollow-pines",
                "Hollow Pines",
                "Every autumn a child goes missing in the woods behind the summer camp. This year, the counsellors stay.",
                &["Horror", "Mystery"],
                563,
            ),
            "photo-1448375240586-882707db888b",
            "photo-1511497584788-876760111969",
        )
        .with_meta(2022, "R", "1h 47m", 80),
        art(
            MediaItem::new(
                "fast-lane",
                "Fast Lane",
                "An underground racer agrees to one last delivery across three borders in a car that is already being hunted.",
                &["Action", "Thriller"],
                874,
            ),
            "photo-1492144534655-ae79c964c9d7",
            "photo-1503376780353-7e6692767b70",
        )
        .with_meta(2024, "PG-13", "1h 59m", 88),
        art(
            MediaItem::new(
                "little-giants",
                "Little Giants",
                "An animated tale of a mouse village that builds a flying machine to rescue its lost elder.",
                &["Animation", "Family", "Adventure"],
                699,
            ),
            "photo-1472457897821-70d3819a0e24",
            "photo-1502082553048-f009c37129b9",
        )
        .with_meta(2020, "G", "1h 29m", 92),
        art(
            MediaItem::new(
                "the-verdict",
                "The Verdict",
                "A public defender takes a hopeless murder case and uncovers a pattern of convictions built on a single witness.",
                &["Drama", "Crime"],
                721,
            ),
            "photo-1589829545856-d10d557cf95f",
            "photo-1505664194779-8beaceb93744",
        )
        .with_meta(2021, "TV-14", "1 Season", 90),
        art(
            MediaItem::new(
                "golden-hour",
                "Golden Hour",
                "A wedding photographer relives the same sunset until she captures the one photograph she missed years ago.",
                &["Romance", "Fantasy"],
                488,
            ),
            "photo-1470252649378-9c29740c9fa8",
            "photo-1495616811223-4d98c6e9c869",
        )
        .with_meta(2022, "PG-13", "1h 46m", 84),
        art(
            MediaItem::new(
                "wild-atlas",
                "Wild Atlas",
                "A six-part journey across the planet's last untouched landscapes, filmed over four years.",
                &["Documentary", "Nature"],
                833,
            ),
            "photo-1441974231531-c6227db76b6e",
            "photo-1470071459604-3b5ec3a7fe05",
        )
        .with_meta(2023, "TV-G", "1 Season", 96),
    ];

    let rows = vec![
        ContentRow::new(
            "trending",
            "Trending Now",
            &[
                "iron-crown",
                "stranger-signals",
                "fast-lane",
                "orbit",
                "neon-district",
                "the-last-harbor",
                "paper-hearts",
            ],
        ),
        ContentRow::new(MOST_LIKED_ROW_ID, "Most Liked", &[]),
        ContentRow::new(
            "popular",
            "Popular on Marquee",
            &[
                "the-verdict",
                "kitchen-nights",
                "wild-atlas",
                "little-giants",
                "midnight-run-club",
                "golden-hour",
            ],
        ),
        ContentRow::new(
            "action",
            "Action & Adventure",
            &["fast-lane", "neon-district", "summit", "iron-crown", "the-last-harbor"],
        ),
        ContentRow::new(
            "scifi",
            "Sci-Fi & Fantasy",
            &["orbit", "stranger-signals", "neon-district", "iron-crown", "golden-hour"],
        ),
        ContentRow::new(
            "comedy",
            "Comedies",
            &["kitchen-nights", "midnight-run-club", "paper-hearts", "little-giants"],
        ),
        ContentRow::new(
            "documentaries",
            "Documentaries",
            &["wild-atlas", "deep-current", "summit"],
        ),
        ContentRow::new(
            "dark",
            "Dark & Suspenseful",
            &["hollow-pines", "the-verdict", "stranger-signals", "orbit"],
        ),
    ];

    Catalog::new(items, rows, "stranger-signals")
});
