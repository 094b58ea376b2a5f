use sqlx::{Pool, Sqlite};

use crate::auth::TokenKeys;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod schema;

// Struct representing the application state
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub keys: TokenKeys,
}
