//! Half-open date ranges and parsing them from query parameters.

use crate::{Error, timestamp::Timestamp};

/// The instants from `start` (inclusive) up to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first instant in the range.
    pub start: Timestamp,
    /// The first instant after the range.
    pub end: Timestamp,
}

/// The raw `start` and `end` query parameters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DateRangeParams {
    /// An RFC 3339 timestamp for the start of the range.
    pub start: Option<String>,
    /// An RFC 3339 timestamp for the end of the range.
    pub end: Option<String>,
}

impl DateRangeParams {
    /// Collect `start` and `end` from the query string's key-value pairs.
    ///
    /// The first value of a repeated key is used and other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "start" => params.start.get_or_insert(value),
                "end" => params.end.get_or_insert(value),
                _ => continue,
            };
        }

        params
    }

    /// Parse the parameters into an optional [DateRange].
    ///
    /// Empty strings count as missing. Giving neither parameter means no
    /// range.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::MismatchedDateRange] if exactly one of the two was given,
    /// - or [Error::InvalidDate] if either is not an RFC 3339 timestamp.
    pub fn parse(&self) -> Result<Option<DateRange>, Error> {
        parse_date_range(self.start.as_deref(), self.end.as_deref())
    }
}

/// Parse raw `start` and `end` parameters into an optional [DateRange].
///
/// See [DateRangeParams::parse] for the rules.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>, Error> {
    match (non_empty(start), non_empty(end)) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => Ok(Some(DateRange {
            start: parse_timestamp("start", start)?,
            end: parse_timestamp("end", end)?,
        })),
        _ => Err(Error::MismatchedDateRange),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_timestamp(name: &'static str, text: &str) -> Result<Timestamp, Error> {
    Timestamp::parse_rfc3339(text).map_err(|error| Error::InvalidDate(name, error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        date_range::{DateRange, DateRangeParams},
        timestamp::Timestamp,
    };

    fn params(start: Option<&str>, end: Option<&str>) -> DateRangeParams {
        DateRangeParams {
            start: start.map(str::to_owned),
            end: end.map(str::to_owned),
        }
    }

    #[test]
    fn no_range_when_both_missing() {
        assert_eq!(params(None, None).parse(), Ok(None));
        assert_eq!(params(Some(""), Some("")).parse(), Ok(None));
    }

    #[test]
    fn parses_both_ends() {
        let got = params(Some("2024-01-01T00:00:00Z"), Some("2024-02-01T00:00:00+01:00")).parse();

        assert_eq!(
            got,
            Ok(Some(DateRange {
                start: Timestamp::new(datetime!(2024-01-01 00:00:00 UTC)).unwrap(),
                end: Timestamp::new(datetime!(2024-01-31 23:00:00 UTC)).unwrap(),
            }))
        );
    }

    #[test]
    fn rejects_only_start() {
        let got = params(Some("2024-01-01T00:00:00Z"), None).parse();

        assert_eq!(got, Err(Error::MismatchedDateRange));
    }

    #[test]
    fn rejects_only_end() {
        let got = params(Some(""), Some("2024-01-01T00:00:00Z")).parse();

        assert_eq!(got, Err(Error::MismatchedDateRange));
    }

    #[test]
    fn first_of_repeated_keys_wins() {
        let pairs = vec![
            ("end".to_owned(), "2024-02-01T00:00:00Z".to_owned()),
            ("start".to_owned(), "2024-01-01T00:00:00Z".to_owned()),
            ("start".to_owned(), "garbage".to_owned()),
            ("limit".to_owned(), "5".to_owned()),
        ];

        let got = DateRangeParams::from_pairs(pairs);

        assert_eq!(
            got,
            params(Some("2024-01-01T00:00:00Z"), Some("2024-02-01T00:00:00Z"))
        );
    }

    #[test]
    fn rejects_dates_outside_four_digit_years() {
        let got = params(
            Some("9999-12-31T23:00:00-02:00"),
            Some("9999-12-31T23:30:00-02:00"),
        )
        .parse();

        assert!(matches!(got, Err(Error::InvalidDate("start", _))));
    }

    #[test]
    fn rejects_malformed_start() {
        let got = params(Some("2024-01-01"), Some("2024-01-02T00:00:00Z")).parse();

        assert!(matches!(got, Err(Error::InvalidDate("start", _))));
    }

    #[test]
    fn rejects_malformed_end() {
        let got = params(Some("2024-01-01T00:00:00Z"), Some("tomorrow")).parse();

        assert!(matches!(got, Err(Error::InvalidDate("end", _))));
    }
}
