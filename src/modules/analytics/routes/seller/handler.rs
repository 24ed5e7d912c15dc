use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::SellerAuth, types::Context};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    auth: SellerAuth,
    State(ctx): State<Arc<Context>>,
    Query(filters): Query<request::Filters>,
) -> impl IntoResponse {
    service(ctx, request::Payload { filters, auth }).await
}
