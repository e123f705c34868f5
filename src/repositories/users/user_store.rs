//! # 사용자 저장소 추상화
//!
//! 관계형(PostgreSQL)과 문서형(MongoDB) 구현이 같은 연산 집합을 제공합니다.
//! 어떤 구현을 쓸지는 시작 시 한 번 결정되고, 요청마다 분기하지 않습니다.
//!
//! ```text
//! UserService ──► Arc<dyn UserStore>
//!                    ├── PostgresUserRepository (sqlx)
//!                    └── MongoUserRepository    (mongodb)
//! ```

use std::fmt;

use async_trait::async_trait;

use crate::domain::entities::{NewUser, User, UserId};
use crate::domain::models::pagination::PageRequest;
use crate::errors::AppResult;

/// 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Postgres,
    MongoDb,
}

impl Backend {
    /// 헬스 체크 응답에 쓰이는 서비스 이름
    pub fn service_name(&self) -> &'static str {
        match self {
            Backend::Postgres => "postgresql",
            Backend::MongoDb => "mongodb",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// 사용자 저장소 연산
///
/// 구현체는 요청 간 락을 잡지 않아야 하며, 이메일/사용자명 유일성은
/// 저장소 고유 제약으로 보장하고 위반 시 `AppError::ConflictError`를 돌려줍니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// 이메일 또는 사용자명이 일치하는 사용자를 찾습니다. (중복 사전 확인용)
    async fn find_by_email_or_username(&self, email: &str, username: &str)
        -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 다른 저장소의 식별자가 들어오면 `Ok(None)`을 돌려줍니다.
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 유일성 위반
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// 이메일, 이름, `updated_at`을 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 사라짐
    /// * `AppError::ConflictError` - 바꾼 이메일이 이미 사용 중
    async fn update(&self, user: &User) -> AppResult<User>;

    /// 한 페이지의 사용자와 조건에 맞는 전체 개수를 돌려줍니다.
    async fn list_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)>;

    /// 연결 상태 확인
    async fn health_check(&self) -> AppResult<()>;
}
