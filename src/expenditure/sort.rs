//! Parsing the `sort` query parameter.

use clap::ValueEnum;

/// The character that separates the column from the direction in a sort
/// parameter, e.g. the `-` in `amount-desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortSeparator {
    /// `amount-desc`
    #[default]
    Hyphen,
    /// `amount|desc`
    Pipe,
}

impl SortSeparator {
    fn as_char(self) -> char {
        match self {
            SortSeparator::Hyphen => '-',
            SortSeparator::Pipe => '|',
        }
    }
}

/// The columns expenditures can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// The expenditure ID, i.e. insertion order.
    Id,
    /// The signed amount.
    Amount,
    /// The date of the expenditure.
    Date,
}

impl SortColumn {
    fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "id" => Some(SortColumn::Id),
            "amount" => Some(SortColumn::Amount),
            "date" => Some(SortColumn::Date),
            _ => None,
        }
    }

    /// The fully qualified column name for use in an ORDER BY clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Id => "expenditure.id",
            SortColumn::Amount => "expenditure.amount",
            SortColumn::Date => "expenditure.date",
        }
    }
}

/// The order to sort rows in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    #[default]
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortOrder {
    /// Anything other than `desc` (in any case) sorts ascending.
    fn parse(text: Option<&str>) -> Self {
        match text {
            Some(text) if text.trim().eq_ignore_ascii_case("desc") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    /// The SQL keyword for this order.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// A validated sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// The column to sort by.
    pub column: SortColumn,
    /// The direction to sort in.
    pub order: SortOrder,
}

impl Sort {
    /// Parse a sort parameter such as `amount-desc` or `date`.
    ///
    /// Returns `None` for an empty parameter or an unknown column, in which
    /// case no ordering is applied.
    pub fn parse(raw: &str, separator: SortSeparator) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut parts = raw.split(separator.as_char());
        let column = SortColumn::parse(parts.next()?)?;
        let order = SortOrder::parse(parts.next());

        Some(Sort { column, order })
    }
}

#[cfg(test)]
mod tests {
    use super::{Sort, SortColumn, SortOrder, SortSeparator};

    fn sort(column: SortColumn, order: SortOrder) -> Option<Sort> {
        Some(Sort { column, order })
    }

    #[test]
    fn parses_column_and_order() {
        let got = Sort::parse("amount-desc", SortSeparator::Hyphen);

        assert_eq!(got, sort(SortColumn::Amount, SortOrder::Descending));
    }

    #[test]
    fn order_defaults_to_ascending() {
        assert_eq!(
            Sort::parse("date", SortSeparator::Hyphen),
            sort(SortColumn::Date, SortOrder::Ascending)
        );
        assert_eq!(
            Sort::parse("date-sideways", SortSeparator::Hyphen),
            sort(SortColumn::Date, SortOrder::Ascending)
        );
    }

    #[test]
    fn is_case_insensitive() {
        let got = Sort::parse("AMOUNT-DESC", SortSeparator::Hyphen);

        assert_eq!(got, sort(SortColumn::Amount, SortOrder::Descending));
    }

    #[test]
    fn unknown_column_means_no_sort() {
        assert_eq!(Sort::parse("description-asc", SortSeparator::Hyphen), None);
        assert_eq!(Sort::parse("", SortSeparator::Hyphen), None);
        assert_eq!(Sort::parse("   ", SortSeparator::Hyphen), None);
    }

    #[test]
    fn uses_configured_separator() {
        assert_eq!(
            Sort::parse("id|desc", SortSeparator::Pipe),
            sort(SortColumn::Id, SortOrder::Descending)
        );
        // With the hyphen separator the whole text is read as the column name.
        assert_eq!(Sort::parse("id|desc", SortSeparator::Hyphen), None);
        assert_eq!(
            Sort::parse("id-desc", SortSeparator::Pipe),
            None,
            "the hyphen is not a separator when the pipe is configured"
        );
    }
}
