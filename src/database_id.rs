//! Database ID type definitions.

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of an expenditure row.
pub type ExpenditureId = DatabaseId;

/// The ID of a category row.
pub type CategoryId = DatabaseId;

/// An ID as it appears in a request path.
///
/// Row IDs are never negative, so paths are parsed as unsigned and "-1" is
/// rejected along with any other malformed ID.
pub type PathId = u64;

/// Convert an ID taken from a request path into a row ID.
///
/// # Errors
/// Returns [Error::InvalidPath] if `id` is too large to be a row ID.
pub fn row_id(id: PathId) -> Result<DatabaseId, Error> {
    DatabaseId::try_from(id).map_err(|_| Error::InvalidPath(format!("the ID {id} is out of range")))
}

#[cfg(test)]
mod tests {
    use crate::{Error, database_id::row_id};

    #[test]
    fn converts_ids_that_fit() {
        assert_eq!(row_id(0), Ok(0));
        assert_eq!(row_id(i64::MAX as u64), Ok(i64::MAX));
    }

    #[test]
    fn rejects_ids_too_large_for_a_row() {
        assert!(matches!(
            row_id(i64::MAX as u64 + 1),
            Err(Error::InvalidPath(_))
        ));
    }
}
