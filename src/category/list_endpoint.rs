//! Endpoint for listing all categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, get_all_categories},
};

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct CategoryListState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for the category listing.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    /// All categories ordered by name.
    pub data: Vec<Category>,
}

/// A route handler that returns every category.
pub async fn get_categories_endpoint(
    State(state): State<CategoryListState>,
) -> Result<Json<CategoryList>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let categories = get_all_categories(&connection)?;

    tracing::info!("Returning {} categories", categories.len());

    Ok(Json(CategoryList { data: categories }))
}
