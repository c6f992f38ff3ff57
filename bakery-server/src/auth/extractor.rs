//! JWT Extractor
//!
//! Custom extractors for validating bearer tokens

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Optional identity
///
/// No `Authorization` header yields `OptionalUser(None)`. A header that is
/// present but malformed, expired or forged is rejected with 401, so a stale
/// token never silently widens the scope of a query.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl OptionalUser {
    /// Owner id used for order attribution and sales scoping
    pub fn owner_id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

/// JWT Auth Extractor
///
/// Use this extractor in protected handlers to validate the bearer token
/// and extract CurrentUser
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state)? {
            Some(user) => Ok(user),
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::not_authenticated())
            }
        }
    }
}

impl FromRequestParts<ServerState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(OptionalUser)
    }
}

fn authenticate(parts: &mut Parts, state: &ServerState) -> Result<Option<CurrentUser>, AppError> {
    // Check if already extracted
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(Some(user.clone()));
    }

    let Some(auth_header) = parts.headers.get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(JwtService::extract_from_header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let jwt_service = state.get_jwt_service();
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

            // Store in extensions for potential reuse
            parts.extensions.insert(user.clone());

            Ok(Some(user))
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", parts.uri)
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
