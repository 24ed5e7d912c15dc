use super::service;
use crate::modules::user::{self, repository::User};
use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json, RequestPartsExt};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "session_token";

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Unauthorized" })),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "success": false, "message": "Forbidden" })),
    )
        .into_response()
}

fn configuration_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "Server configuration error" })),
    )
        .into_response()
}

async fn get_user_from_request(ctx: Arc<Context>, parts: &mut Parts) -> Result<User, Response> {
    let jar = parts
        .extract::<CookieJar>()
        .await
        .map_err(|_| unauthorized())?;

    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(unauthorized)?;

    let claims = service::verify_session_token(ctx.auth.token_secret.as_deref(), &token).map_err(
        |err| match err {
            service::Error::MissingSecret => configuration_error(),
            service::Error::InvalidToken => unauthorized(),
        },
    )?;

    let user = user::repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| unauthorized())?
        .ok_or_else(unauthorized)?;

    if user.status == "SUSPENDED" {
        return Err(unauthorized());
    }

    Ok(user)
}

#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|_| unauthorized())?;

        get_user_from_request(ctx, parts)
            .await
            .map(|user| Self { user })
    }
}

#[derive(Serialize, Clone)]
pub struct SellerAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SellerAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, state).await?;

        if !user::repository::is_seller(&auth.user) {
            return Err(forbidden());
        }

        Ok(Self { user: auth.user })
    }
}

#[derive(Serialize, Clone)]
pub struct AdminAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, state).await?;

        if !user::repository::is_admin(&auth.user) {
            return Err(forbidden());
        }

        Ok(Self { user: auth.user })
    }
}
