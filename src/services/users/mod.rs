//! 사용자 관리 서비스 모듈
//!
//! # Features
//!
//! - 회원가입 (중복 확인, bcrypt 해싱, 토큰 발급)
//! - 로그인 (타이밍 균등화된 자격 증명 검증)
//! - 프로필 조회 및 수정
//! - 관리자용 페이지 단위 목록
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let service = UserService::new(store, passwords, tokens);
//! let response = service.login(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
