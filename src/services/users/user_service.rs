//! # 사용자 관리 서비스 구현
//!
//! 등록, 로그인, 프로필 조회/수정, 관리자용 목록 조회를 담당합니다.
//! 활성 저장소는 시작 시 정해진 `Arc<dyn UserStore>` 하나이며, 서비스는
//! 어떤 구현인지 알지 못합니다.
//!
//! ```text
//! handler ──► UserService ──► PasswordService (bcrypt, blocking pool)
//!                 │       └─► TokenService    (HS256)
//!                 ▼
//!           Arc<dyn UserStore>
//! ```
//!
//! ## 보안
//!
//! - 로그인 실패 사유(이메일 없음 / 비밀번호 불일치)는 응답에서 구분되지 않습니다.
//! - 존재하지 않는 이메일에도 더미 해시 검증을 수행해 응답 시간을 맞춥니다.
//! - 응답에는 비밀번호 해시가 포함되지 않습니다 ([`UserInfo`]).

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::domain::dto::{
    AuthResponse, LoginRequest, PaginatedResponse, Pagination, RegisterRequest,
    UpdateProfileRequest, UserInfo,
};
use crate::domain::entities::{NewUser, UserId};
use crate::domain::models::pagination::PageRequest;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::auth::{PasswordService, TokenService};

/// 사용자 관리 비즈니스 로직 서비스
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// 새 계정을 만들고 바로 세션 토큰을 발급합니다.
    ///
    /// 요청 본문 검증은 핸들러에서 끝난 상태여야 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명이 이미 사용 중
    /// * `AppError::DatabaseError` - 저장소 오류
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let response = user_service.register(request).await?;
    /// assert_eq!(response.user.role, Role::User);
    /// ```
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let started = Instant::now();

        // 중복 가입도 해싱 비용을 똑같이 치릅니다
        let password_hash = self.passwords.hash(&request.password).await?;

        if self
            .store
            .find_by_email_or_username(&request.email, &request.username)
            .await?
            .is_some()
        {
            log::info!("중복 가입 시도: {} / {}", request.email, request.username);
            return Err(AppError::ConflictError(
                "email or username already registered".to_string(),
            ));
        }

        let new_user = NewUser::new(
            request.email,
            request.username,
            password_hash,
            request.first_name,
            request.last_name,
            Utc::now(),
        );

        // 사전 확인과 저장 사이의 경합은 저장소 유니크 제약이 409로 막습니다
        let user = self.store.insert(new_user).await?;
        let issued = self.tokens.issue(&user)?;

        log::info!(
            "✅ 사용자 등록: {} ({}) [{}] in {:?}",
            user.username,
            user.id,
            self.store.backend(),
            started.elapsed()
        );

        Ok(AuthResponse::new(issued, user))
    }

    /// 이메일과 비밀번호로 로그인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidCredentials` - 이메일이 없거나 비밀번호가 틀림
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let Some(user) = self.store.find_by_email(&request.email).await? else {
            self.passwords.verify_dummy(&request.password).await;
            log::warn!("로그인 실패: {} (unknown email)", request.email);
            return Err(AppError::InvalidCredentials);
        };

        if !self
            .passwords
            .verify(&request.password, &user.password_hash)
            .await?
        {
            log::warn!("로그인 실패: {} (password mismatch)", request.email);
            return Err(AppError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&user)?;
        log::info!("로그인 성공: {} ({})", user.username, user.email);

        Ok(AuthResponse::new(issued, user))
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 토큰의 사용자가 더 이상 없음
    pub async fn profile(&self, user_id: &UserId) -> AppResult<UserInfo> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;

        Ok(UserInfo::from(user))
    }

    /// 비어 있지 않은 필드만 반영해 프로필을 수정합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없음
    /// * `AppError::ConflictError` - 바꾸려는 이메일을 다른 계정이 사용 중
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> AppResult<UserInfo> {
        let mut user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;

        user.apply_profile(request.first_name, request.last_name, request.email, Utc::now());

        let updated = self.store.update(&user).await?;
        log::info!("프로필 수정: {} ({})", updated.username, updated.id);

        Ok(UserInfo::from(updated))
    }

    /// 관리자용 사용자 목록
    pub async fn list_users(&self, request: PageRequest) -> AppResult<PaginatedResponse<UserInfo>> {
        let (users, total) = self.store.list_page(&request).await?;

        log::debug!(
            "사용자 목록: page={} size={} sort={} search={:?} -> {}/{}",
            request.page,
            request.page_size,
            request.sort,
            request.search,
            users.len(),
            total
        );

        Ok(PaginatedResponse {
            data: users.into_iter().map(UserInfo::from).collect(),
            pagination: Pagination::new(request.page, request.page_size, total),
        })
    }
}
