//! User Model

use serde::{Deserialize, Serialize};

/// User row (includes password hash, never serialized)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub display_name: String,
}

/// Public user info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub id: i64,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Current-session response; `user` is null when anonymous
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: Option<UserInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            display_name: "Administrator".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
    }
}
