//! This modules defines the common functionality for paging data.

use clap::ValueEnum;
use serde::Serialize;

/// The largest page a client may request.
pub const MAX_LIMIT: u64 = 100;

/// The page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: u64 = 100;

/// What a requested limit of zero means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ZeroLimitPolicy {
    /// `limit=0` is honoured and yields an empty page.
    #[default]
    EmptyPage,
    /// `limit=0` is treated as if no limit was given.
    Default,
}

/// The config for pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// How to interpret `limit=0`.
    pub zero_limit: ZeroLimitPolicy,
}

/// The limit and offset that are actually applied to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// The maximum number of rows to return, never more than [MAX_LIMIT].
    pub limit: u64,
    /// The number of rows to skip.
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PaginationConfig {
    /// Turn the raw `limit` and `offset` query parameters into the pagination
    /// that will be applied.
    ///
    /// Missing or unparseable values fall back to the defaults, limits above
    /// [MAX_LIMIT] are clamped, and offsets are unbounded.
    pub fn parse(&self, limit: Option<&str>, offset: Option<&str>) -> Pagination {
        Pagination {
            limit: self.parse_limit(limit),
            offset: parse_unsigned(offset).unwrap_or(0),
        }
    }

    fn parse_limit(&self, raw_limit: Option<&str>) -> u64 {
        match parse_unsigned(raw_limit) {
            None => DEFAULT_LIMIT,
            Some(0) => match self.zero_limit {
                ZeroLimitPolicy::EmptyPage => 0,
                ZeroLimitPolicy::Default => DEFAULT_LIMIT,
            },
            Some(limit) => limit.min(MAX_LIMIT),
        }
    }
}

fn parse_unsigned(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|text| text.trim().parse().ok())
}
