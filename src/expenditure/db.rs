//! Database operations for expenditures.

use rusqlite::{Connection, Row, params_from_iter};

use crate::{
    Error,
    category::{Category, CategoryName, resolve_category},
    database_id::ExpenditureId,
    expenditure::{
        CategoryChange, Expenditure, ExpenditureUpdate, ListingDirective, NewExpenditure,
        query::{SELECT_EXPENDITURE, build_listing_query},
    },
    timestamp::Timestamp,
};

/// Create an expenditure, resolving its category name first.
///
/// The category and the expenditure are written in one transaction, so if
/// either write fails neither is kept.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryResolutionFailed] if the category could not be resolved,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expenditure(
    new_expenditure: NewExpenditure,
    connection: &Connection,
) -> Result<Expenditure, Error> {
    let transaction = connection.unchecked_transaction()?;

    let category_id = new_expenditure
        .category
        .as_ref()
        .map(|name| resolve_category(name, &transaction))
        .transpose()?;

    transaction.execute(
        "INSERT INTO expenditure (amount, date, category_id) VALUES (?1, ?2, ?3)",
        (new_expenditure.amount, new_expenditure.date, category_id),
    )?;
    let id = transaction.last_insert_rowid();
    let expenditure = get_expenditure(id, &transaction)?;

    transaction.commit()?;

    Ok(expenditure)
}

/// Retrieve an expenditure by ID. Soft-deleted expenditures are not found.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a live expenditure,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expenditure(id: ExpenditureId, connection: &Connection) -> Result<Expenditure, Error> {
    let query = format!(
        "{SELECT_EXPENDITURE} WHERE expenditure.id = :id AND expenditure.deleted_at IS NULL"
    );

    connection
        .prepare(&query)?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Apply a partial update to an expenditure and return the result.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpenditure] if `id` does not refer to a live expenditure,
/// - [Error::CategoryResolutionFailed] if the new category could not be resolved,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expenditure(
    id: ExpenditureId,
    update: ExpenditureUpdate,
    connection: &Connection,
) -> Result<Expenditure, Error> {
    let transaction = connection.unchecked_transaction()?;

    let existing = match get_expenditure(id, &transaction) {
        Ok(expenditure) => expenditure,
        Err(Error::NotFound) => return Err(Error::UpdateMissingExpenditure),
        Err(error) => return Err(error),
    };

    let category_id = match update.category {
        CategoryChange::Keep => existing.category.map(|category| category.id),
        CategoryChange::Clear => None,
        CategoryChange::Set(name) => Some(resolve_category(&name, &transaction)?),
    };

    transaction.execute(
        "UPDATE expenditure SET amount = ?1, date = ?2, category_id = ?3 \
         WHERE id = ?4 AND deleted_at IS NULL",
        (
            update.amount.unwrap_or(existing.amount),
            update.date.unwrap_or(existing.date),
            category_id,
            id,
        ),
    )?;
    let expenditure = get_expenditure(id, &transaction)?;

    transaction.commit()?;

    Ok(expenditure)
}

/// Soft delete an expenditure by marking it as deleted.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpenditure] if `id` does not refer to a live expenditure,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expenditure(id: ExpenditureId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expenditure SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        (Timestamp::now(), id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpenditure);
    }

    Ok(())
}

/// Retrieve the expenditures selected by `directive`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is a SQL error.
pub fn query_expenditures(
    directive: &ListingDirective,
    connection: &Connection,
) -> Result<Vec<Expenditure>, Error> {
    let query = build_listing_query(directive);
    tracing::debug!("Listing expenditures with {directive:?}");

    connection
        .prepare(&query.sql)?
        .query_map(params_from_iter(query.params.iter()), map_row)?
        .map(|maybe_expenditure| maybe_expenditure.map_err(Error::SqlError))
        .collect()
}

/// Initialize the expenditure table.
///
/// The category table must already exist.
pub fn create_expenditure_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenditure (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            category_id INTEGER,
            deleted_at TEXT,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );
        CREATE INDEX IF NOT EXISTS idx_expenditure_date ON expenditure(date);
        CREATE INDEX IF NOT EXISTS idx_expenditure_category ON expenditure(category_id);",
    )
}

/// Map a row from [SELECT_EXPENDITURE] to an [Expenditure].
fn map_row(row: &Row) -> Result<Expenditure, rusqlite::Error> {
    let category_id: Option<i64> = row.get(3)?;
    let category_name: Option<String> = row.get(4)?;
    let category = category_id
        .zip(category_name)
        .map(|(id, name)| Category {
            id,
            name: CategoryName::new_unchecked(&name),
        });

    Ok(Expenditure {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        category,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{CategoryName, get_all_categories, insert_category},
        date_range::DateRange,
        db::initialize,
        expenditure::{
            directive::ListingDirective,
            domain::{CategoryChange, ExpenditureUpdate, NewExpenditure},
            sort::{Sort, SortColumn, SortOrder},
        },
        pagination::Pagination,
        timestamp::Timestamp,
    };

    use super::{
        create_expenditure, delete_expenditure, get_expenditure, query_expenditures,
        update_expenditure,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_expenditure(amount: f64, category: Option<&str>) -> NewExpenditure {
        NewExpenditure {
            amount,
            date: Timestamp::new(datetime!(2024-03-01 12:00:00 UTC)).unwrap(),
            category: category.and_then(CategoryName::normalize),
        }
    }

    fn directive() -> ListingDirective {
        ListingDirective {
            sort: None,
            pagination: Pagination::default(),
            date_range: None,
        }
    }

    fn amounts(directive: &ListingDirective, connection: &Connection) -> Vec<f64> {
        query_expenditures(directive, connection)
            .unwrap()
            .into_iter()
            .map(|expenditure| expenditure.amount)
            .collect()
    }

    #[test]
    fn create_without_category() {
        let connection = get_test_connection();

        let created = create_expenditure(new_expenditure(12.5, None), &connection).unwrap();

        assert!(created.id > 0);
        assert_eq!(created.amount, 12.5);
        assert_eq!(created.category, None);
        assert_eq!(get_expenditure(created.id, &connection), Ok(created));
    }

    #[test]
    fn create_with_category_resolves_name() {
        let connection = get_test_connection();

        let first = create_expenditure(new_expenditure(1.0, Some("  cat1 ")), &connection).unwrap();
        let second = create_expenditure(new_expenditure(2.0, Some("cat1")), &connection).unwrap();

        let first_category = first.category.expect("category should be set");
        assert_eq!(first_category.name.as_ref(), "cat1");
        assert_eq!(second.category.map(|category| category.id), Some(first_category.id));
        assert_eq!(get_all_categories(&connection).unwrap().len(), 1);
    }

    #[test]
    fn failed_resolution_creates_nothing() {
        let connection = get_test_connection();
        // Every category insert conflicts, so resolution always fails.
        connection
            .execute_batch(
                "CREATE TEMP TRIGGER racing_writer BEFORE INSERT ON category
                 WHEN NOT EXISTS (SELECT 1 FROM category WHERE name = NEW.name)
                 BEGIN
                     INSERT INTO category (name) VALUES (NEW.name);
                 END;",
            )
            .unwrap();

        let got = create_expenditure(new_expenditure(1.0, Some("Rent")), &connection);

        assert_eq!(got, Err(Error::CategoryResolutionFailed("Rent".to_owned())));
        assert!(query_expenditures(&directive(), &connection).unwrap().is_empty());
    }

    #[test]
    fn get_missing_expenditure_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_expenditure(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn update_changes_only_given_fields() {
        let connection = get_test_connection();
        let created = create_expenditure(new_expenditure(10.0, Some("Food")), &connection).unwrap();

        let updated = update_expenditure(
            created.id,
            ExpenditureUpdate {
                amount: Some(-3.0),
                ..Default::default()
            },
            &connection,
        )
        .unwrap();

        assert_eq!(updated.amount, -3.0);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.category, created.category);
    }

    #[test]
    fn update_can_set_and_clear_category() {
        let connection = get_test_connection();
        let created = create_expenditure(new_expenditure(10.0, None), &connection).unwrap();

        let with_category = update_expenditure(
            created.id,
            ExpenditureUpdate {
                category: CategoryChange::Set(CategoryName::new_unchecked("Travel")),
                ..Default::default()
            },
            &connection,
        )
        .unwrap();
        let cleared = update_expenditure(
            created.id,
            ExpenditureUpdate {
                category: CategoryChange::Clear,
                ..Default::default()
            },
            &connection,
        )
        .unwrap();

        assert_eq!(
            with_category.category.map(|category| category.name),
            Some(CategoryName::new_unchecked("Travel"))
        );
        assert_eq!(cleared.category, None);
        // Clearing the association leaves the category itself in place.
        assert_eq!(get_all_categories(&connection).unwrap().len(), 1);
    }

    #[test]
    fn update_missing_expenditure_fails() {
        let connection = get_test_connection();

        let got = update_expenditure(999, ExpenditureUpdate::default(), &connection);

        assert_eq!(got, Err(Error::UpdateMissingExpenditure));
    }

    #[test]
    fn delete_hides_expenditure() {
        let connection = get_test_connection();
        let created = create_expenditure(new_expenditure(10.0, None), &connection).unwrap();

        delete_expenditure(created.id, &connection).unwrap();

        assert_eq!(get_expenditure(created.id, &connection), Err(Error::NotFound));
        assert!(query_expenditures(&directive(), &connection).unwrap().is_empty());
        assert_eq!(
            update_expenditure(created.id, ExpenditureUpdate::default(), &connection),
            Err(Error::UpdateMissingExpenditure)
        );
    }

    #[test]
    fn delete_twice_is_not_found() {
        let connection = get_test_connection();
        let created = create_expenditure(new_expenditure(10.0, None), &connection).unwrap();

        assert_eq!(delete_expenditure(created.id, &connection), Ok(()));
        assert_eq!(
            delete_expenditure(created.id, &connection),
            Err(Error::DeleteMissingExpenditure)
        );
    }

    #[test]
    fn query_sorts_by_amount() {
        let connection = get_test_connection();
        for amount in [123.0, -1.0, -100.53, 100.53] {
            create_expenditure(new_expenditure(amount, None), &connection).unwrap();
        }

        let ascending = amounts(
            &ListingDirective {
                sort: Some(Sort {
                    column: SortColumn::Amount,
                    order: SortOrder::Ascending,
                }),
                ..directive()
            },
            &connection,
        );
        let descending = amounts(
            &ListingDirective {
                sort: Some(Sort {
                    column: SortColumn::Amount,
                    order: SortOrder::Descending,
                }),
                ..directive()
            },
            &connection,
        );

        assert_eq!(ascending, vec![-100.53, -1.0, 100.53, 123.0]);
        assert_eq!(descending, vec![123.0, 100.53, -1.0, -100.53]);
    }

    #[test]
    fn query_sorts_by_date() {
        let connection = get_test_connection();
        let dates = [
            datetime!(2024-02-01 00:00:00 UTC),
            datetime!(2023-12-31 23:59:59 UTC),
            datetime!(2024-01-01 05:00:00 +13:00),
            datetime!(2024-01-15 00:00:00 UTC),
        ];
        for (i, date) in dates.into_iter().enumerate() {
            let new_expenditure = NewExpenditure {
                amount: i as f64,
                date: Timestamp::new(date).unwrap(),
                category: None,
            };
            create_expenditure(new_expenditure, &connection).unwrap();
        }
        let sorted = |order| {
            amounts(
                &ListingDirective {
                    sort: Some(Sort {
                        column: SortColumn::Date,
                        order,
                    }),
                    ..directive()
                },
                &connection,
            )
        };

        let ascending = sorted(SortOrder::Ascending);
        let descending = sorted(SortOrder::Descending);

        // 2024-01-01T05:00:00+13:00 is the earliest instant once in UTC.
        assert_eq!(ascending, vec![2.0, 1.0, 3.0, 0.0]);
        assert_eq!(descending, vec![0.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn query_sorts_by_id_desc() {
        let connection = get_test_connection();
        let ids: Vec<_> = [5.0, 1.0, 3.0]
            .into_iter()
            .map(|amount| {
                create_expenditure(new_expenditure(amount, None), &connection)
                    .unwrap()
                    .id
            })
            .collect();

        let got: Vec<_> = query_expenditures(
            &ListingDirective {
                sort: Some(Sort {
                    column: SortColumn::Id,
                    order: SortOrder::Descending,
                }),
                ..directive()
            },
            &connection,
        )
        .unwrap()
        .into_iter()
        .map(|expenditure| expenditure.id)
        .collect();

        let mut want = ids;
        want.reverse();
        assert_eq!(got, want);
    }

    #[test]
    fn query_breaks_date_ties_by_id() {
        let connection = get_test_connection();
        for amount in [3.0, 1.0, 2.0] {
            create_expenditure(new_expenditure(amount, None), &connection).unwrap();
        }

        let got = amounts(
            &ListingDirective {
                sort: Some(Sort {
                    column: SortColumn::Date,
                    order: SortOrder::Descending,
                }),
                ..directive()
            },
            &connection,
        );

        assert_eq!(got, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn query_filters_half_open_range() {
        let connection = get_test_connection();
        let dates = [
            datetime!(2023-12-31 23:59:59 UTC),
            datetime!(2024-01-01 00:00:00 UTC),
            datetime!(2024-01-31 23:59:59 UTC),
            datetime!(2024-02-01 00:00:00 UTC),
        ];
        for (i, date) in dates.into_iter().enumerate() {
            let new_expenditure = NewExpenditure {
                amount: i as f64,
                date: Timestamp::new(date).unwrap(),
                category: None,
            };
            create_expenditure(new_expenditure, &connection).unwrap();
        }

        let got = amounts(
            &ListingDirective {
                date_range: Some(DateRange {
                    start: Timestamp::new(datetime!(2024-01-01 00:00:00 UTC)).unwrap(),
                    end: Timestamp::new(datetime!(2024-02-01 00:00:00 UTC)).unwrap(),
                }),
                ..directive()
            },
            &connection,
        );

        assert_eq!(got, vec![1.0, 2.0]);
    }

    #[test]
    fn query_compares_instants_across_offsets() {
        let connection = get_test_connection();
        // 2024-01-01T05:00:00+13:00 is 2023-12-31T16:00:00Z, outside January in UTC.
        let new_expenditure = NewExpenditure {
            amount: 1.0,
            date: Timestamp::new(datetime!(2024-01-01 05:00:00 +13:00)).unwrap(),
            category: None,
        };
        create_expenditure(new_expenditure, &connection).unwrap();

        let got = amounts(
            &ListingDirective {
                date_range: Some(DateRange {
                    start: Timestamp::new(datetime!(2024-01-01 00:00:00 UTC)).unwrap(),
                    end: Timestamp::new(datetime!(2024-02-01 00:00:00 UTC)).unwrap(),
                }),
                ..directive()
            },
            &connection,
        );

        assert!(got.is_empty());
    }

    #[test]
    fn query_pages_through_results() {
        let connection = get_test_connection();
        for amount in 1..=5 {
            create_expenditure(new_expenditure(amount as f64, None), &connection).unwrap();
        }
        let sort = Some(Sort {
            column: SortColumn::Id,
            order: SortOrder::Ascending,
        });

        let page = amounts(
            &ListingDirective {
                sort,
                pagination: Pagination {
                    limit: 2,
                    offset: 1,
                },
                date_range: None,
            },
            &connection,
        );
        let past_end = amounts(
            &ListingDirective {
                sort,
                pagination: Pagination {
                    limit: 2,
                    offset: u64::MAX,
                },
                date_range: None,
            },
            &connection,
        );
        let empty_page = amounts(
            &ListingDirective {
                sort,
                pagination: Pagination {
                    limit: 0,
                    offset: 0,
                },
                date_range: None,
            },
            &connection,
        );

        assert_eq!(page, vec![2.0, 3.0]);
        assert!(past_end.is_empty());
        assert!(empty_page.is_empty());
    }

    #[test]
    fn query_includes_category() {
        let connection = get_test_connection();
        let category = insert_category(CategoryName::new_unchecked("Food"), &connection).unwrap();
        create_expenditure(new_expenditure(1.0, Some("Food")), &connection).unwrap();

        let got = query_expenditures(&directive(), &connection).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, Some(category));
    }
}
