//! Auth handlers: login, logout, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use coursehub_entity::account::model::Account;

use crate::dto::request::{LoginRequest, TokenPairRequest};
use crate::dto::response::{ApiResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, ValidatedJson};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    let tokens = state
        .session_service
        .login(&req.login, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenPairRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    let tokens = state.session_service.refresh(req.into()).await?;
    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenPairRequest>,
) -> ApiResult<StatusCode> {
    state.session_service.logout(req.into()).await?;
    Ok(StatusCode::RESET_CONTENT)
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: CurrentAccount,
) -> ApiResult<Json<ApiResponse<Account>>> {
    let account = state.account_service.get_own_account(&auth).await?;
    Ok(Json(ApiResponse::ok(account)))
}
