//! # MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션 위의 [`UserStore`] 구현입니다.
//!
//! ## 인덱스
//!
//! - `email_unique`, `username_unique` - 유일성 보장 (위반 시 E11000 → 409)
//! - `created_at_desc` - 기본 목록 정렬
//!
//! ## 검색
//!
//! 검색어는 정규식 메타문자를 이스케이프한 뒤 대소문자 무시 `$regex`로
//! 이름/이메일/사용자명에 부분 일치시킵니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewUser, Role, User, UserId};
use crate::domain::models::pagination::PageRequest;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::user_store::{Backend, UserStore};
use crate::utils::string_utils::escape_regex;

const COLLECTION: &str = "users";
const DUPLICATE_KEY: i32 = 11000;
const SEARCH_FIELDS: [&str; 4] = ["first_name", "last_name", "email", "username"];

/// 컬렉션에 저장되는 문서 형태
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    email: String,
    username: String,
    #[serde(rename = "password")]
    password_hash: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default = "default_role")]
    role: String,
    #[serde(default = "default_active")]
    is_active: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn default_active() -> bool {
    true
}

fn default_role() -> String {
    Role::User.as_str().to_string()
}

fn to_bson_time(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_time(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

impl UserDocument {
    fn from_new(id: ObjectId, user: NewUser) -> Self {
        Self {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            created_at: to_bson_time(user.created_at),
            updated_at: to_bson_time(user.updated_at),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        let role = Role::from_stored(&doc.role, doc.id);

        User {
            id: UserId::Document(doc.id),
            email: doc.email,
            username: doc.username,
            password_hash: doc.password_hash,
            first_name: doc.first_name,
            last_name: doc.last_name,
            role,
            is_active: doc.is_active,
            created_at: from_bson_time(doc.created_at),
            updated_at: from_bson_time(doc.updated_at),
        }
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_write_error(e: mongodb::error::Error, action: &str) -> AppError {
    if is_duplicate_key(&e) {
        AppError::ConflictError(format!("{}: duplicate key", action))
    } else {
        AppError::DatabaseError(format!("{}: {}", action, e))
    }
}

/// 검색어가 있으면 `$or` 정규식 필터, 없으면 빈 필터
fn search_filter(search: Option<&str>) -> Document {
    let Some(term) = search else {
        return Document::new();
    };

    let pattern = escape_regex(term);
    let clauses: Vec<Document> = SEARCH_FIELDS
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": &pattern, "$options": "i" });
            clause
        })
        .collect();

    doc! { "$or": clauses }
}

fn sort_document(request: &PageRequest) -> Document {
    let direction = request.sort.direction.as_mongo();
    let mut sort = Document::new();
    sort.insert(request.sort.field.column(), direction);
    sort.insert("_id", direction);
    sort
}

pub struct MongoUserRepository {
    db: Database,
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(db: Database) -> Self {
        let users = db.collection::<UserDocument>(COLLECTION);
        Self { db, users }
    }

    /// 유니크/정렬 인덱스를 생성합니다. 이미 있으면 변화 없음.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 기존 데이터에 중복이 있어 유니크 인덱스를 만들 수 없음
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.users
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .db_context("users 인덱스 생성 실패")?;

        log::info!("✅ MongoDB users 인덱스 확인 완료");
        Ok(())
    }

    async fn find_one(&self, filter: Document, action: &str) -> AppResult<Option<User>> {
        let found = self.users.find_one(filter).await.db_context(action)?;
        Ok(found.map(User::from))
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    fn backend(&self) -> Backend {
        Backend::MongoDb
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> AppResult<Option<User>> {
        self.find_one(
            doc! { "$or": [ { "email": email }, { "username": username } ] },
            "사용자 중복 조회 실패",
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one(doc! { "email": email }, "이메일로 사용자 조회 실패")
            .await
    }

    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let UserId::Document(oid) = id else {
            return Ok(None);
        };

        self.find_one(doc! { "_id": *oid }, "ID로 사용자 조회 실패")
            .await
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let document = UserDocument::from_new(ObjectId::new(), user);

        self.users
            .insert_one(&document)
            .await
            .map_err(|e| map_write_error(e, "사용자 생성 실패"))?;

        Ok(User::from(document))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let UserId::Document(oid) = &user.id else {
            return Err(AppError::NotFound(format!("user {} is not stored here", user.id)));
        };

        let changes = doc! {
            "$set": {
                "email": &user.email,
                "first_name": &user.first_name,
                "last_name": &user.last_name,
                "updated_at": to_bson_time(user.updated_at),
            }
        };

        let updated = self
            .users
            .find_one_and_update(doc! { "_id": *oid }, changes)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, "사용자 수정 실패"))?;

        updated
            .map(User::from)
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", oid.to_hex())))
    }

    async fn list_page(&self, request: &PageRequest) -> AppResult<(Vec<User>, u64)> {
        let filter = search_filter(request.search.as_deref());

        let total = self
            .users
            .count_documents(filter.clone())
            .await
            .db_context("사용자 수 조회 실패")?;

        let documents: Vec<UserDocument> = self
            .users
            .find(filter)
            .sort(sort_document(request))
            .skip(request.offset())
            .limit(i64::from(request.page_size))
            .await
            .db_context("사용자 목록 조회 실패")?
            .try_collect()
            .await
            .db_context("사용자 목록 읽기 실패")?;

        Ok((documents.into_iter().map(User::from).collect(), total))
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .db_context("MongoDB ping 실패")?;
        Ok(())
    }
}
