//! Template filters shared by the site layouts.

use chrono::{DateTime, SecondsFormat, Utc};

/// Date for readers, as in `March 1, 2024`.
///
/// Dates are shown in UTC so a build renders the same text on every machine.
pub fn readable_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Date for `<time datetime>` and feeds: UTC with milliseconds, `Z` suffix.
pub fn machine_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `items` without any value listed in `exclusions`, order kept.
///
/// Used to drop bookkeeping tags such as `post` from a page's tag list.
pub fn except<T: PartialEq + Clone>(items: &[T], exclusions: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| !exclusions.contains(item))
        .cloned()
        .collect()
}
