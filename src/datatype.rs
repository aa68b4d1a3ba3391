// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

// used for timestamps in the database
use chrono::{DateTime, Utc};

// used to print out readable forms of a data type
use std::fmt;

/// A UTC instant as it is kept in the database.
///
/// Stored as integer microseconds since the Unix epoch, so that `<=` and
/// `order by` on the column are exact and chronological. Anything finer than
/// a microsecond is dropped on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Self::truncate(instant))
    }
    pub fn micros(&self) -> i64 {
        self.0.timestamp_micros()
    }
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
    /// Drops sub-microsecond precision so an instant survives a round trip unchanged.
    pub fn truncate(instant: DateTime<Utc>) -> DateTime<Utc> {
        let micros = instant.timestamp_micros();
        DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(instant)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}
impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.micros()))
    }
}
impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let micros = value.as_i64()?;
        DateTime::<Utc>::from_timestamp_micros(micros)
            .map(Timestamp)
            .ok_or(FromSqlError::OutOfRange(micros))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn truncates_below_microseconds() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + Duration::nanoseconds(1_234_567);
        let kept = Timestamp::new(instant);
        assert_eq!(kept.micros() % 1_000_000, 1_234);
        assert_eq!(Timestamp::new(kept.instant()), kept);
    }

    #[test]
    fn ordering_follows_time() {
        let early = Timestamp::new(Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap());
        let late = Timestamp::new(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert!(early.micros() < 0);
        assert!(early < late);
        assert!(early.micros() < late.micros());
    }

    #[test]
    fn survives_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let stamp = Timestamp::new(Utc::now());
        let back: Timestamp = conn
            .query_row("select ?1", [&stamp], |row| row.get(0))
            .unwrap();
        assert_eq!(back, stamp);
    }
}
