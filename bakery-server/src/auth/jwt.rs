//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 最短密钥长度
const MIN_SECRET_LEN: usize = 32;

/// JWT 配置
///
/// | 环境变量 | 默认值 |
/// |----------|--------|
/// | JWT_SECRET | 开发环境随机生成 |
/// | JWT_EXPIRATION_MINUTES | 480 |
/// | JWT_ISSUER | bakery-server |
/// | JWT_AUDIENCE | bakery-clients |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
    /// 密钥是否为进程内临时生成 (重启后令牌失效)
    #[serde(skip)]
    pub ephemeral: bool,
}

impl JwtConfig {
    /// 使用指定密钥，其余字段取默认值
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 480,
            issuer: "bakery-server".to_string(),
            audience: "bakery-clients".to_string(),
            ephemeral: false,
        }
    }

    /// 从环境变量加载
    pub fn from_env() -> Result<Self, JwtError> {
        let (secret, ephemeral) = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_SECRET_LEN
                )));
            }
            Ok(secret) => (secret, false),
            Err(_) => {
                tracing::warn!("⚠️  JWT_SECRET not set! Generating temporary key, tokens will not survive a restart.");
                (generate_printable_secret(), true)
            }
        };

        Ok(Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480), // 默认 8 小时 (一个班次)
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "bakery-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "bakery-clients".to_string()),
            ephemeral,
        })
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::error!("JWT configuration error: {}, using temporary key", e);
            Self {
                ephemeral: true,
                ..Self::with_secret(generate_printable_secret())
            }
        })
    }
}

/// 生成可打印的随机密钥 (64 字符)
pub fn generate_printable_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 用户名
    pub username: String,
    /// 显示名称
    pub display_name: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户生成新令牌
    pub fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        display_name: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 订单归属和销售统计范围都以 `id` 为准。
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: i64,
    /// 用户名
    pub username: String,
    /// 显示名称
    pub display_name: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("Invalid subject: {}", claims.sub)))?;
        Ok(Self {
            id,
            username: claims.username,
            display_name: claims.display_name,
        })
    }
}

impl From<&CurrentUser> for shared::models::UserInfo {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret("test-secret-key-that-is-long-enough-0123"))
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let token = service
            .generate_token(7, "baker", "Head Baker")
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "baker");
        assert_eq!(claims.iss, "bakery-server");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.display_name, "Head Baker");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service().generate_token(1, "admin", "Admin").unwrap();
        let other =
            JwtService::with_config(JwtConfig::with_secret("another-secret-key-that-is-long-enough"));
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let mut config = JwtConfig::with_secret("test-secret-key-that-is-long-enough-0123");
        config.expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let token = service.generate_token(1, "admin", "Admin").unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_generated_secret_is_printable() {
        let secret = generate_printable_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
