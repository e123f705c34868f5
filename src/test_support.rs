//! 테스트용 메모리 사용자 저장소
//!
//! 관계형 저장소처럼 정수 ID를 발급하고 이메일/사용자명 유일성을 지킵니다.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::domain::entities::{NewUser, User, UserId};
use crate::domain::models::pagination::{PageRequest, SortDirection, SortField};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{Backend, UserStore};

pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    backend: Backend,
    down: bool,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self {
            users: Mutex::default(),
            backend: Backend::Postgres,
            down: false,
        }
    }
}

impl MemoryUserStore {
    pub fn shared() -> Arc<dyn UserStore> {
        Arc::new(Self::default())
    }

    /// 헬스 체크가 항상 실패하는 문서형 저장소
    pub fn unreachable() -> Arc<dyn UserStore> {
        Arc::new(Self {
            backend: Backend::MongoDb,
            down: true,
            ..Self::default()
        })
    }

    fn users(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap()
    }
}

fn compare(a: &User, b: &User, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Username => a.username.cmp(&b.username),
        SortField::FirstName => a.first_name.cmp(&b.first_name),
        SortField::LastName => a.last_name.cmp(&b.last_name),
        SortField::Role => a.role.as_str().cmp(b.role.as_str()),
    }
}

fn id_of(user: &User) -> i64 {
    match user.id {
        UserId::Relational(n) => n,
        UserId::Document(_) => 0,
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> Backend {
        self.backend
    }

    async fn find_by_email_or_username(&self, email: &str, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users()
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users().iter().find(|u| &u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users();
        if users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(AppError::ConflictError("unique violation".to_string()));
        }

        let user = user.with_id(UserId::Relational(users.len() as i64 + 1));
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users();
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(AppError::ConflictError("unique violation".to_string()));
        }

        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound(user.id.to_string()))?;
        *stored = user.clone();
        Ok(user.clone())
    }

    async fn list_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)> {
        let term = request.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<User> = self
            .users()
            .iter()
            .filter(|u| match &term {
                Some(t) => [&u.first_name, &u.last_name, &u.email, &u.username]
                    .iter()
                    .any(|v| v.to_lowercase().contains(t.as_str())),
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, request.sort.field).then(id_of(a).cmp(&id_of(b)));
            match request.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn health_check(&self) -> AppResult<()> {
        if self.down {
            Err(AppError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// 테스트 환경 설정 (bcrypt cost 4)
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(&|key: &str| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
        _ => None,
    })
}
