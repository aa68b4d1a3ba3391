//! Publication rules for questions.
//!
//! Both predicates are pure: they look only at the publication date and the
//! instant they are asked about, never at the store.

use chrono::{DateTime, Duration, Utc};

/// How far back a publication still counts as recent.
pub fn recent_window() -> Duration {
    Duration::days(1)
}

/// A question is published once its publication date has been reached.
pub fn is_published(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    pub_date <= now
}

/// Published within the last day: `now - 1 day < pub_date <= now`.
pub fn is_recent(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - recent_window() < pub_date && is_published(pub_date, now)
}
