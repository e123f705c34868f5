//! 인증 및 보안 서비스 모듈
//!
//! # Features
//!
//! - bcrypt 비밀번호 해싱/검증 ([`PasswordService`])
//! - HS256 JWT 세션 토큰 발급/검증 ([`TokenService`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{PasswordService, TokenService};
//!
//! let hash = passwords.hash("secret1").await?;
//! let issued = tokens.issue(&user)?;
//! let claims = tokens.verify(&issued.token)?;
//! ```

pub mod password_service;
pub mod token_service;

pub use password_service::PasswordService;
pub use token_service::TokenService;
