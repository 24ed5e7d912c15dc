mod admin;
mod seller;

use crate::types::Context;
use axum::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(admin::get_router())
        .merge(seller::get_router())
}
