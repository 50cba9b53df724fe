use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use crate::AppContext;

pub mod admin;
pub mod health;
pub mod quiz;

/// Error body shape shared by every handler: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .merge(quiz::quiz_router(ctx.clone()))
        .nest("/api/admin", admin::admin_router(ctx))
}
