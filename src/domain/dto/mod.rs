//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 계약입니다. 응답은 모두 [`common::ApiResponse`] 봉투에 담깁니다.

pub mod common;
pub mod users;

pub use common::*;
pub use users::*;
