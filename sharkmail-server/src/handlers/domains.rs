//! Domain lifecycle handlers

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use sharkmail_core::types::{ImportDomainRequest, PurchaseDomainRequest};

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableRoutingRequest {
    pub forward_to: String,
}

pub async fn list(state: web::Data<AppState>, user: AuthedUser) -> ApiResult<HttpResponse> {
    let domains = state.domains.list_domains(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(domains))
}

pub async fn import(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<ImportDomainRequest>,
) -> ApiResult<HttpResponse> {
    let (domain, setup_log) = state
        .domains
        .import_domain(&user.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "domain": domain, "setupLog": setup_log })))
}

pub async fn purchase(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<PurchaseDomainRequest>,
) -> ApiResult<HttpResponse> {
    let (domain, setup_log) = state
        .domains
        .purchase_domain(&user.user_id, &body.domain)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "domain": domain, "setupLog": setup_log })))
}

pub async fn delete(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.domains.delete_domain(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub async fn configure_dns(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let setup_log = state.dns_setup.configure_dns(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(json!({ "setupLog": setup_log })))
}

pub async fn enable_email_routing(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
    body: web::Json<EnableRoutingRequest>,
) -> ApiResult<HttpResponse> {
    state
        .dns_setup
        .enable_email_routing(&user.user_id, &path, &body.forward_to)
        .await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub async fn enable_warming(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.warming.enable_warming(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub async fn warming_status(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let check = state
        .warming
        .check_warming_status(&user.user_id, &path)
        .await?;
    Ok(HttpResponse::Ok().json(check))
}

pub async fn fix_bounces(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let message = state.dns_setup.fix_bounces(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}
