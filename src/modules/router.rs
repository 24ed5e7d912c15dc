use crate::types::Context;
use axum::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/analytics", super::analytics::get_router())
        .nest("/dashboard", super::dashboard::get_router())
}
