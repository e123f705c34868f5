//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 저장소가 영속화하는 사용자 엔티티
//! ├── DTOs          - 요청/응답 계약
//! └── Models        - 토큰 클레임, 인증 사용자, 요청 언어, 페이지 요청
//! ```

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::{NewUser, Role, User, UserId};
pub use models::*;
