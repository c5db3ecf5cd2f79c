//! Endpoint for fetching a single expenditure.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    database_id::{PathId, row_id},
    expenditure::{ExpenditureResponse, get_expenditure},
};

/// The state needed to fetch an expenditure.
#[derive(Debug, Clone)]
pub struct GetExpenditureState {
    /// The database connection for reading expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetExpenditureState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the expenditure with the ID in the path.
pub async fn get_expenditure_endpoint(
    State(state): State<GetExpenditureState>,
    WithRejection(Path(expenditure_id), _): WithRejection<Path<PathId>, Error>,
) -> Result<Json<ExpenditureResponse>, Error> {
    let expenditure_id = row_id(expenditure_id)?;
    let connection = lock_connection(&state.db_connection)?;
    let expenditure = get_expenditure(expenditure_id, &connection)?;

    Ok(Json(expenditure.into()))
}
