//! 데이터 액세스 계층
//!
//! 사용자 저장소 추상화([`users::UserStore`])와 두 구현을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{PostgresUserRepository, UserStore};
//!
//! let repo = PostgresUserRepository::new(pool);
//! let user = repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
