//! Warming engine control handlers

use actix_web::{web, HttpResponse};
use serde_json::json;

use sharkmail_core::types::WarmingConfig;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn status(state: web::Data<AppState>, user: AuthedUser) -> ApiResult<HttpResponse> {
    let report = state.control.status(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn start(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<WarmingConfig>,
) -> ApiResult<HttpResponse> {
    state.control.start(&user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub async fn stop(state: web::Data<AppState>, user: AuthedUser) -> ApiResult<HttpResponse> {
    state.control.stop(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub async fn update_config(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<WarmingConfig>,
) -> ApiResult<HttpResponse> {
    state
        .control
        .update_config(&user.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({})))
}
