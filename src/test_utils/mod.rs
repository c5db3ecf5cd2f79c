#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router, expenditure::ListingConfig};

pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    AppState::new(connection, ListingConfig::default()).expect("Could not create app state.")
}

pub(crate) fn get_test_server() -> TestServer {
    let app = build_router(get_test_app_state());
    TestServer::try_new(app).expect("Could not create test server.")
}
