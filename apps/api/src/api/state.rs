use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::JwtSettings;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: JwtSettings,
}

impl AppState {
    pub fn new(pool: PgPool, jwt: JwtSettings) -> Self {
        Self { pool, jwt }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for JwtSettings {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
