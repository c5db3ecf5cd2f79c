//! Find-or-create resolution of category names.

use rusqlite::Connection;

use crate::{
    Error,
    category::{CategoryName, find_category_by_name},
    database_id::CategoryId,
};

/// How many times to look up and insert before giving up on a name that keeps
/// conflicting.
const MAX_ATTEMPTS: usize = 3;

/// Get the ID of the category called `name`, creating the category if it does
/// not exist yet.
///
/// An existing category is returned as is. If another writer inserts the same
/// name between the look up and the insert, the unique constraint on the name
/// rejects our insert and the existing row is read again instead.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryResolutionFailed] if the name kept conflicting,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn resolve_category(name: &CategoryName, connection: &Connection) -> Result<CategoryId, Error> {
    for attempt in 1..=MAX_ATTEMPTS {
        if let Some(category) = find_category_by_name(name, connection)? {
            return Ok(category.id);
        }

        match connection.execute("INSERT INTO category (name) VALUES (?1);", (name.as_ref(),)) {
            Ok(_) => {
                let id = connection.last_insert_rowid();
                tracing::info!("Created category \"{name}\" with ID {id}");
                return Ok(id);
            }
            Err(error) if super::db::is_unique_violation(&error) => {
                tracing::debug!(
                    "Category \"{name}\" was created concurrently, reading it again (attempt {attempt})"
                );
            }
            Err(error) => return Err(error.into()),
        }
    }

    Err(Error::CategoryResolutionFailed(name.to_string()))
}
