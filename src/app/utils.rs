// src/app/utils.rs
use chrono::{DateTime, Duration, Local};

pub(crate) fn title_line(title: &str, year: i32) -> String {
    if year > 0 {
        format!("{title} ({year})")
    } else {
        title.to_string()
    }
}

/// Compact like counter: 987, 1.2K, 3.4M.
pub(crate) fn format_likes(n: u32) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => trim_point_zero(format!("{:.1}K", n as f64 / 1_000.0)),
        _ => trim_point_zero(format!("{:.1}M", n as f64 / 1_000_000.0)),
    }
}

fn trim_point_zero(s: String) -> String {
    s.replace(".0K", "K").replace(".0M", "M")
}

/// "just now", "5 minutes ago", "3 hours ago", "2 days ago"
pub(crate) fn format_age(posted: DateTime<Local>, now: DateTime<Local>) -> String {
    let age = now.signed_duration_since(posted);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };
    if age < Duration::minutes(1) {
        "just now".to_string()
    } else if age < Duration::hours(1) {
        plural(age.num_minutes(), "minute")
    } else if age < Duration::days(1) {
        plural(age.num_hours(), "hour")
    } else {
        plural(age.num_days(), "day")
    }
}

pub(crate) fn minutes_before_now(minutes: i64) -> DateTime<Local> {
    Local::now() - Duration::minutes(minutes)
}

/// Genres joined the way the cards and modal show them.
pub(crate) fn genre_line(genres: &[String]) -> String {
    genres.join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_are_compacted() {
        assert_eq!(format_likes(0), "0");
        assert_eq!(format_likes(999), "999");
        assert_eq!(format_likes(1_000), "1K");
        assert_eq!(format_likes(1_284), "1.3K");
        assert_eq!(format_likes(2_500_000), "2.5M");
    }

    #[test]
    fn ages_read_naturally() {
        let now = Local::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_age(now - Duration::minutes(42), now), "42 minutes ago");
        assert_eq!(format_age(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_age(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn title_line_skips_unknown_year() {
        assert_eq!(title_line("Orbit", 2023), "Orbit (2023)");
        assert_eq!(title_line("Orbit", 0), "Orbit");
        assert_eq!(genre_line(&["Drama".into(), "Crime".into()]), "Drama • Crime");
    }
}
