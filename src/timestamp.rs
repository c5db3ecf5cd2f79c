//! A UTC timestamp that round-trips through RFC 3339 on the wire and a
//! sortable, fixed-width text column in SQLite.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

/// The storage format for timestamps.
///
/// Every stored value has the same width and is in UTC, so comparing or
/// ordering the text in SQL gives the same result as comparing the instants.
const SQL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z");

/// The years a timestamp may fall in once converted to UTC.
///
/// Both RFC 3339 and [SQL_FORMAT] only have room for four digit years.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// The reasons text or a date-time cannot become a [Timestamp].
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    /// The text is not an RFC 3339 timestamp.
    #[error(transparent)]
    Parse(#[from] time::error::Parse),

    /// The instant falls outside the years 0000 to 9999 in UTC.
    #[error("the date must fall between the years 0000 and 9999 in UTC")]
    OutOfRange,
}

/// An instant in time, always held in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Create a timestamp from `date_time`, converting it to UTC.
    ///
    /// # Errors
    /// Returns [TimestampError::OutOfRange] if the UTC year is not a four
    /// digit year, e.g. "9999-12-31T23:00:00-02:00".
    pub fn new(date_time: OffsetDateTime) -> Result<Self, TimestampError> {
        date_time
            .checked_to_offset(UtcOffset::UTC)
            .filter(|utc| YEARS.contains(&utc.year()))
            .map(Self)
            .ok_or(TimestampError::OutOfRange)
    }

    /// Parse an RFC 3339 string, e.g. "2024-03-01T12:00:00+13:00".
    ///
    /// # Errors
    /// Returns a [TimestampError] if `text` is not a valid RFC 3339 timestamp
    /// or is out of range.
    pub fn parse_rfc3339(text: &str) -> Result<Self, TimestampError> {
        Self::new(OffsetDateTime::parse(text, &Rfc3339)?)
    }

    /// The current time.
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// The underlying date-time in UTC.
    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(text) => write!(f, "{text}"),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date_time = time::serde::rfc3339::deserialize(deserializer)?;

        Self::new(date_time).map_err(de::Error::custom)
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0
            .format(SQL_FORMAT)
            .map(ToSqlOutput::from)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        PrimitiveDateTime::parse(text, SQL_FORMAT)
            .map(|date_time| Self(date_time.assume_utc()))
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
