//! Endpoint for renaming a category.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::{Category, CategoryName, rename_category},
    database_id::{PathId, row_id},
};

/// The state needed for renaming a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for renaming a category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryData {
    /// The new name, surrounding whitespace is ignored.
    pub name: String,
}

/// A route handler for renaming a category.
pub async fn update_category_endpoint(
    State(state): State<UpdateCategoryState>,
    WithRejection(Path(category_id), _): WithRejection<Path<PathId>, Error>,
    WithRejection(Json(data), _): WithRejection<Json<CategoryData>, Error>,
) -> Result<Json<Category>, Error> {
    let category_id = row_id(category_id)?;
    let name = CategoryName::new(&data.name)?;

    let connection = lock_connection(&state.db_connection)?;
    let category = rename_category(category_id, name, &connection)?;

    tracing::info!("Renamed category {category_id} to \"{}\"", category.name);

    Ok(Json(category))
}
