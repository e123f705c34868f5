//! 사용자 서비스 백엔드
//!
//! 회원가입, 로그인, 프로필 관리를 제공하는 REST 서비스입니다.
//! 사용자 데이터는 PostgreSQL 또는 MongoDB 중 설정으로 선택한 저장소에 보관합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입, 프로필 조회/수정, 관리자용 사용자 목록
//! - **JWT 인증**: HS256 서명 액세스 토큰 (24시간)
//! - **비밀번호**: bcrypt 해싱
//! - **다국어**: 응답 메시지 영어/아랍어/독일어 지원
//! - **저장소**: PostgreSQL(sqlx) 또는 MongoDB
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 응답 봉투
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← 저장소 추상화
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Postgres/Mongo  │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use user_service_backend::config::AppConfig;
//! use user_service_backend::state::AppState;
//!
//! let config = AppConfig::from_env();
//! config.validate()?;
//!
//! let state = AppState::from_config(&config).await?;
//! let auth = state.user_service.login(request).await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
mod test_support;
