// src/app/types.rs
use std::path::PathBuf;

// ---- cross-thread messages ----
/// (url, cache key)
pub type WorkItem = (String, String);

pub struct PrefetchDone {
    pub url: String,
    pub result: Result<PathBuf, String>,
}

// ---- artwork lifecycle ----
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PosterState {
    Pending, // queued or downloading
    Cached,  // file present on disk (ready to upload)
    Ready,   // texture uploaded
    Failed,  // permanent failure
}

// ---- static header content ----
#[derive(Clone, Debug)]
pub struct Notification {
    pub title: &'static str,
    pub body: &'static str,
    pub minutes_ago: i64,
    pub unread: bool,
}

pub const NOTIFICATIONS: &[Notification] = &[
    Notification {
        title: "New arrival",
        body: "The Iron Crown season 4 is now streaming.",
        minutes_ago: 42,
        unread: true,
    },
    Notification {
        title: "Continue watching",
        body: "Pick up Orbit where you left off.",
        minutes_ago: 60 * 5,
        unread: true,
    },
    Notification {
        title: "Coming soon",
        body: "Fast Lane arrives this Friday. Add it to My List to get a reminder.",
        minutes_ago: 60 * 26,
        unread: false,
    },
    Notification {
        title: "Top pick for you",
        body: "Because you watched Deep Current: Wild Atlas.",
        minutes_ago: 60 * 24 * 3,
        unread: false,
    },
];

#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub name: &'static str,
    pub color: [u8; 3],
}

pub const PROFILES: &[Profile] = &[
    Profile { name: "Alex", color: [229, 9, 20] },
    Profile { name: "Sam", color: [33, 150, 243] },
    Profile { name: "Kids", color: [255, 193, 7] },
];
