//! # PostgreSQL 사용자 리포지토리
//!
//! `sqlx` 기반 관계형 저장소 구현입니다.
//!
//! - `BIGSERIAL` 정수 키, `email`/`username` UNIQUE 제약
//! - `deleted_at`이 채워진 행은 모든 조회에서 제외 (소프트 삭제)
//! - 목록 검색은 이름/이메일/사용자명에 대한 `ILIKE` 부분 일치

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{NewUser, Role, User, UserId};
use crate::domain::models::pagination::PageRequest;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::user_store::{Backend, UserStore};
use crate::utils::string_utils::escape_like;

const USER_COLUMNS: &str =
    "id, email, username, password_hash, first_name, last_name, role, is_active, created_at, updated_at";

const SEARCH_COLUMNS: [&str; 4] = ["first_name", "last_name", "email", "username"];

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        email         VARCHAR(255) NOT NULL UNIQUE,
        username      VARCHAR(100) NOT NULL UNIQUE,
        password_hash TEXT         NOT NULL,
        first_name    VARCHAR(100) NOT NULL DEFAULT '',
        last_name     VARCHAR(100) NOT NULL DEFAULT '',
        role          VARCHAR(20)  NOT NULL DEFAULT 'user',
        is_active     BOOLEAN      NOT NULL DEFAULT TRUE,
        created_at    TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ  NOT NULL DEFAULT NOW(),
        deleted_at    TIMESTAMPTZ
    )
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_created_at ON users (created_at DESC)";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let role = Role::from_stored(&row.role, row.id);

        User {
            id: UserId::Relational(row.id),
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// 쓰기 실패를 분류합니다. UNIQUE 위반은 409로 갑니다.
fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::ConflictError(format!("{}: {}", action, db.message()))
        }
        _ => AppError::DatabaseError(format!("{}: {}", action, e)),
    }
}

/// 검색어가 있으면 네 컬럼에 대한 `ILIKE` 조건을 덧붙입니다.
fn push_search(qb: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    let Some(term) = search else {
        return;
    };

    let pattern = format!("%{}%", escape_like(term));
    qb.push(" AND (");
    for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
    }
    qb.push(")");
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `users` 테이블과 인덱스가 없으면 만듭니다.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .db_context("users 테이블 생성 실패")?;

        sqlx::query(CREATE_CREATED_AT_INDEX)
            .execute(&self.pool)
            .await
            .db_context("users 인덱스 생성 실패")?;

        log::info!("✅ PostgreSQL users 스키마 확인 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PostgresUserRepository {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE (email = $1 OR username = $2) AND deleted_at IS NULL LIMIT 1",
            USER_COLUMNS
        ))
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .db_context("사용자 중복 조회 실패")?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .db_context("이메일로 사용자 조회 실패")?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let UserId::Relational(id) = id else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .db_context("ID로 사용자 조회 실패")?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users
                (email, username, password_hash, first_name, last_name, role, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "사용자 생성 실패"))?;

        Ok(User::from(row))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let UserId::Relational(id) = &user.id else {
            return Err(AppError::NotFound(format!("user {} is not stored here", user.id)));
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "사용자 수정 실패"))?;

        row.map(User::from)
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", id)))
    }

    async fn list_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)> {
        let search = request.search.as_deref();

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_search(&mut count_query, search);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .db_context("사용자 수 조회 실패")?;

        let mut page_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM users WHERE deleted_at IS NULL",
            USER_COLUMNS
        ));
        push_search(&mut page_query, search);
        // 정렬 컬럼은 허용 목록에서 온 정적 문자열
        page_query.push(format!(
            " ORDER BY {} {}, id {}",
            request.sort.field.column(),
            request.sort.direction.as_sql(),
            request.sort.direction.as_sql()
        ));
        page_query
            .push(" LIMIT ")
            .push_bind(i64::from(request.page_size))
            .push(" OFFSET ")
            .push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

        let rows = page_query
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .db_context("사용자 목록 조회 실패")?;

        let total = u64::try_from(total).unwrap_or_default();
        Ok((rows.into_iter().map(User::from).collect(), total))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .db_context("PostgreSQL ping 실패")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::pagination::SortSpec;

    #[test]
    fn test_search_clause_binds_escaped_pattern() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_search(&mut qb, Some("50%_off"));
        let sql = qb.sql();

        assert!(sql.contains("first_name ILIKE $1"));
        assert!(sql.contains("last_name ILIKE $2"));
        assert!(sql.contains("email ILIKE $3"));
        assert!(sql.contains("username ILIKE $4"));
        assert!(!sql.contains("50%"));
    }

    #[test]
    fn test_no_search_clause_without_term() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM users WHERE deleted_at IS NULL");
        push_search(&mut qb, None);
        assert_eq!(qb.sql(), "SELECT 1 FROM users WHERE deleted_at IS NULL");
    }

    #[test]
    fn test_row_with_unknown_role_degrades_to_user() {
        let now = Utc::now();
        let row = UserRow {
            id: 5,
            email: "e@x.io".to_string(),
            username: "eve".to_string(),
            password_hash: "h".to_string(),
            first_name: "Eve".to_string(),
            last_name: "X".to_string(),
            role: "owner".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let user = User::from(row);
        assert_eq!(user.id, UserId::Relational(5));
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_sort_columns_come_from_allow_list() {
        let sort = SortSpec::parse("last_name:desc").unwrap();
        assert_eq!(sort.field.column(), "last_name");
        assert_eq!(sort.direction.as_sql(), "DESC");
    }
}
