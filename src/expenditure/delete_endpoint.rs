//! Endpoint for deleting an expenditure.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error, app_state::lock_connection, database_id::{PathId, row_id},
    expenditure::delete_expenditure,
};

/// The state needed to delete an expenditure.
#[derive(Debug, Clone)]
pub struct DeleteExpenditureState {
    /// The database connection for managing expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenditureState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expenditure.
///
/// Responds with `200 OK` and no body, or `404 Not Found` if the expenditure
/// does not exist or was already deleted.
pub async fn delete_expenditure_endpoint(
    State(state): State<DeleteExpenditureState>,
    WithRejection(Path(expenditure_id), _): WithRejection<Path<PathId>, Error>,
) -> Result<StatusCode, Error> {
    let expenditure_id = row_id(expenditure_id)?;
    let connection = lock_connection(&state.db_connection)?;
    delete_expenditure(expenditure_id, &connection)?;

    tracing::info!("Deleted expenditure {expenditure_id}");

    Ok(StatusCode::OK)
}
