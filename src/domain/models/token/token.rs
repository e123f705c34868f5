//! JWT 인증 토큰 구조체
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `nbf`, `exp`)과 사용자 식별 클레임을 담습니다.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, User, UserId};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (사용자 ID 문자열)
/// - `user_id`: 저장소별 사용자 ID (숫자 또는 문자열)
/// - `email`, `username`, `role`: 발급 시점의 사용자 정보
/// - `iat`, `nbf`, `exp`: 발급/유효 시작/만료 시각 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user.id.to_string(),
            user_id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

/// 발급된 토큰과 만료 시각
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
