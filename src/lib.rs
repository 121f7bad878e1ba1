pub mod accounts;
pub mod config;
pub mod error;
mod extract;
pub mod pagination;
pub mod quiz;
mod routes;
pub mod session;
#[cfg(test)]
mod testing;
pub mod words;

pub use error::{Error, Result};

use accounts::{AccountStore, Admin, User};
use axum::{Router, routing::get};
use quiz::QuizEngine;
use session::SessionRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use words::{SqliteWordStore, WordStore};

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone)]
pub struct AppState {
    pub words: Arc<dyn WordStore>,
    pub quiz: QuizEngine,
    pub users: AccountStore<User>,
    pub admins: AccountStore<Admin>,
    pub sessions: Arc<SessionRegistry>,
}

/// Tunables for building the router.
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub bcrypt_cost: u32,
    pub session_idle_timeout: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_idle_timeout: session::DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl AppState {
    pub fn new(pool: SqlitePool, options: AppOptions) -> Self {
        let words: Arc<dyn WordStore> = Arc::new(SqliteWordStore::new(pool.clone()));
        Self {
            quiz: QuizEngine::new(words.clone()),
            words,
            users: AccountStore::new(pool.clone(), options.bcrypt_cost),
            admins: AccountStore::new(pool, options.bcrypt_cost),
            sessions: Arc::new(SessionRegistry::with_idle_timeout(options.session_idle_timeout)),
        }
    }
}

pub fn app(pool: SqlitePool) -> Router {
    app_with_config(pool, AppOptions::default())
}

pub fn app_with_config(pool: SqlitePool, options: AppOptions) -> Router {
    let state = AppState::new(pool, options);

    Router::new()
        .route("/health", get(health))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
