//! Auth handlers: register, login, current user

use actix_web::{web, HttpResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use serde_json::json;

use sharkmail_core::crypto::{hash_password, verify_password};
use sharkmail_core::util::is_valid_email;

use crate::auth::{issue_token, AuthedUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use crate::entities::users;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub company_name: Option<String>,
}

impl From<users::Model> for PublicUser {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            company_name: model.company_name,
        }
    }
}

pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();

    if !is_valid_email(&body.email) {
        return Err(ApiError::unprocessable("Invalid email address"));
    }
    if body.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::unprocessable(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(body.email.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let user = users::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        email: Set(body.email),
        password_hash: Set(hash_password(&body.password)),
        company_name: Set(body.company_name),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!("Registered user {}", user.id);

    let token = issue_token(
        &user.id,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "token": token, "user": PublicUser::from(user) })))
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();

    let user = users::Entity::find()
        .filter(users::Column::Email.eq(body.email.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let password_ok = verify_password(&body.password, &user.password_hash)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !password_ok {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = issue_token(
        &user.id,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "token": token, "user": PublicUser::from(user) })))
}

pub async fn me(state: web::Data<AppState>, user: AuthedUser) -> ApiResult<HttpResponse> {
    let model = users::Entity::find_by_id(user.user_id.clone())
        .one(&state.db)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("Session expired"))?;

    Ok(HttpResponse::Ok().json(json!({ "user": PublicUser::from(model) })))
}
