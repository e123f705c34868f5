use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Role, User, UserId};
use crate::domain::models::token::IssuedToken;

/// 외부에 공개되는 사용자 정보
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            first_name,
            last_name,
            role,
            is_active,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            email,
            username,
            first_name,
            last_name,
            role,
            is_active,
            created_at,
            updated_at,
        }
    }
}

/// 회원가입/로그인 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
    pub expires_at: DateTime<Utc>,
}

impl AuthResponse {
    pub fn new(issued: IssuedToken, user: User) -> Self {
        Self {
            token: issued.token,
            user: UserInfo::from(user),
            expires_at: issued.expires_at,
        }
    }
}
