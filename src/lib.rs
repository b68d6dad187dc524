#![deny(
    clippy::as_conversions,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::string_slice,
    clippy::todo,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::manual_non_exhaustive,
    clippy::missing_errors_doc,
    clippy::module_inception,
    clippy::module_name_repetitions,
    clippy::needless_return,
    clippy::single_match_else,
    clippy::multiple_crate_versions
)]

use std::str::FromStr;

use axum::Router;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tower_http::trace::TraceLayer;

use crate::error::StoreError;

pub use args::GradebookArgs;
pub use points::Points;
pub use state::GradebookState;

pub mod admin;
mod args;
pub mod auth;
pub mod error;
pub mod evaluator;
pub mod filters;
pub mod grading;
pub mod models;
mod points;
mod routes;
mod state;
pub mod store;
mod templates;

/// Opens the database named by `database_url` and brings its schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}

pub fn router(state: GradebookState) -> Router {
    Router::new()
        .merge(routes::completion::router())
        .merge(routes::enrollment::router())
        .merge(routes::exam::router())
        .merge(routes::course::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn server(args: &GradebookArgs) -> Result<Router, StoreError> {
    let pool = connect(&args.database_url).await?;

    let state = GradebookState::new(store::SqliteStore::new(pool));

    Ok(router(state))
}
