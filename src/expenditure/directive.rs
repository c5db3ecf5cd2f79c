//! Turns the raw listing query parameters into a validated directive.

use crate::{
    Error,
    date_range::{DateRange, parse_date_range},
    expenditure::{Sort, SortSeparator},
    pagination::{Pagination, PaginationConfig},
};

/// The config that controls how listing requests are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingConfig {
    /// How `limit` and `offset` are interpreted.
    pub pagination: PaginationConfig,
    /// The separator between the column and direction in `sort`.
    pub sort_separator: SortSeparator,
}

/// The raw query parameters for listing expenditures.
///
/// Everything is kept as text so that malformed paging or sort values fall
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingParams {
    /// The maximum number of expenditures to return.
    pub limit: Option<String>,
    /// The number of expenditures to skip.
    pub offset: Option<String>,
    /// The column and direction to sort by, e.g. `amount-desc`.
    pub sort: Option<String>,
    /// The inclusive start of the date range.
    pub start: Option<String>,
    /// The exclusive end of the date range.
    pub end: Option<String>,
}

impl ListingParams {
    /// Collect the listing parameters from the query string's key-value pairs.
    ///
    /// The first value of a repeated key is used and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "sort" => &mut params.sort,
                "start" => &mut params.start,
                "end" => &mut params.end,
                _ => continue,
            };

            slot.get_or_insert(value);
        }

        params
    }
}

/// A validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDirective {
    /// The ordering to apply, if any.
    pub sort: Option<Sort>,
    /// The effective limit and offset.
    pub pagination: Pagination,
    /// The date range to filter on, if any.
    pub date_range: Option<DateRange>,
}

impl ListingConfig {
    /// Validate the raw listing parameters.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::MismatchedDateRange] if only one of `start` and `end` was given,
    /// - or [Error::InvalidDate] if either date is malformed.
    pub fn parse(&self, params: &ListingParams) -> Result<ListingDirective, Error> {
        let date_range = parse_date_range(params.start.as_deref(), params.end.as_deref())?;
        let pagination = self
            .pagination
            .parse(params.limit.as_deref(), params.offset.as_deref());
        let sort = params
            .sort
            .as_deref()
            .and_then(|sort| Sort::parse(sort, self.sort_separator));

        Ok(ListingDirective {
            sort,
            pagination,
            date_range,
        })
    }
}
