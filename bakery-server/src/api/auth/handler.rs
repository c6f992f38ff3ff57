//! Auth API Handlers

use axum::{Json, extract::State};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{CurrentUser, OptionalUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, validate_password, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    LoginRequest, LoginResponse, MeResponse, OkResponse, RegisterRequest, RegisterResponse,
    UserInfo,
};

/// POST /api/auth/register - 注册新用户
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let username = req.username.trim();
    validate_required_text(username, "username", MAX_NAME_LEN)?;
    validate_password(&req.password)?;

    let display_name = req
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(username);

    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let created = user::create(state.pool(), username, &hash, display_name)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::UsernameExists)
                .with_detail("username", username),
            other => other.into(),
        })?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");

    Ok(Json(RegisterResponse {
        ok: true,
        id: created.id,
    }))
}

/// POST /api/auth/login - 登录并签发令牌
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = req.username.trim();

    let Some(found) = user::find_by_username(state.pool(), username).await? else {
        security_log!("WARN", "login_failed", username = username, reason = "unknown_user");
        return Err(AppError::invalid_credentials());
    };

    let valid = verify_password(&req.password, &found.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "login_failed", username = username, reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(found.id, &found.username, &found.display_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    security_log!("INFO", "login_success", user_id = found.id, username = username);

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(found),
    }))
}

/// GET /api/auth/me - 当前用户 (未登录时为 null)
pub async fn me(OptionalUser(user): OptionalUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: user.as_ref().map(UserInfo::from),
    })
}

/// POST /api/auth/logout - 登出
///
/// 令牌是无状态的，客户端丢弃即可；这里只记录事件。
pub async fn logout(OptionalUser(user): OptionalUser) -> Json<OkResponse> {
    if let Some(CurrentUser { id, username, .. }) = user {
        tracing::info!(user_id = id, username = %username, "User logged out");
    }
    Json(OkResponse::ok())
}
