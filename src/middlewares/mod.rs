//! HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - bearer 토큰 인증과 역할 검사
//! - [`RequestTimeout`] - 요청 처리 시간 제한 (408)
//! - [`PanicRecovery`] - 패닉을 500 응답으로 변환
//! - [`RequestIdMiddleware`] - `X-Request-ID` 전달 또는 생성

pub mod auth_middleware;
mod auth_inner;
pub mod recovery;
pub mod request_id;
pub mod timeout;

pub use auth_middleware::AuthMiddleware;
pub use recovery::PanicRecovery;
pub use request_id::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER};
pub use timeout::RequestTimeout;
