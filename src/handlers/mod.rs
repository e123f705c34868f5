//! # HTTP Request Handlers Module
//!
//! 요청 본문을 검증하고, 요청 언어를 결정하고, 서비스를 호출한 뒤
//! 결과를 공통 응답 봉투([`ApiResponse`])에 담습니다.
//!
//! ```text
//! Client ──► routes ──► handlers ──► services ──► repositories
//! ```
//!
//! 실패는 모두 [`LocalizedError`]로 반환되어 요청 언어의 메시지를 가집니다.
//!
//! [`ApiResponse`]: crate::domain::dto::ApiResponse
//! [`LocalizedError`]: crate::errors::LocalizedError

pub mod auth;
pub mod health;
pub mod users;
