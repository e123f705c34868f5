//! User Entity Implementation
//!
//! 두 저장소(PostgreSQL, MongoDB)가 공유하는 사용자 엔티티입니다.
//! 식별자는 저장소 고유 타입을 그대로 보존하는 [`UserId`]로 표현합니다.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 저장소별 사용자 식별자
///
/// 외부에는 관계형 ID는 숫자로, 문서형 ID는 16진 문자열로 노출됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUserId", into = "RawUserId")]
pub enum UserId {
    /// PostgreSQL `BIGSERIAL` 키
    Relational(i64),
    /// MongoDB `_id`
    Document(ObjectId),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

impl From<UserId> for RawUserId {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Relational(n) => RawUserId::Number(n),
            UserId::Document(oid) => RawUserId::Text(oid.to_hex()),
        }
    }
}

impl TryFrom<RawUserId> for UserId {
    type Error = String;

    fn try_from(raw: RawUserId) -> Result<Self, Self::Error> {
        match raw {
            RawUserId::Number(n) => Ok(UserId::Relational(n)),
            RawUserId::Text(s) => ObjectId::parse_str(&s)
                .map(UserId::Document)
                .map_err(|_| format!("invalid user id: {}", s)),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Relational(n) => write!(f, "{}", n),
            UserId::Document(oid) => write!(f, "{}", oid.to_hex()),
        }
    }
}

/// 사용자 역할
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// 저장소에서 읽은 역할 문자열을 해석합니다. 알 수 없는 값은 경고 후 `user`.
    pub fn from_stored(raw: &str, owner: impl fmt::Display) -> Role {
        raw.parse().unwrap_or_else(|e| {
            log::warn!("사용자 {}의 역할을 해석할 수 없습니다: {}", owner, e);
            Role::User
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 저장된 사용자
///
/// `password_hash`가 외부로 새지 않도록 직렬화를 구현하지 않습니다.
/// 응답에는 [`crate::domain::dto::UserInfo`]를 사용하세요.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 비어 있지 않은 값만 반영하고 `updated_at`을 갱신합니다.
    ///
    /// 역할과 활성 상태는 이 경로로 바꿀 수 없습니다.
    pub fn apply_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        now: DateTime<Utc>,
    ) {
        if let Some(first_name) = first_name.filter(|v| !v.trim().is_empty()) {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name.filter(|v| !v.trim().is_empty()) {
            self.last_name = last_name;
        }
        if let Some(email) = email.filter(|v| !v.trim().is_empty()) {
            self.email = email;
        }
        self.updated_at = now;
    }
}

/// 등록 시 저장소에 전달되는 새 사용자
///
/// 식별자는 저장소가 발급합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// 기본 역할(`user`), 활성 상태로 새 사용자를 만듭니다.
    pub fn new(
        email: String,
        username: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            username,
            password_hash,
            first_name,
            last_name,
            role: Role::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 저장소가 발급한 식별자를 붙여 [`User`]로 만듭니다.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
