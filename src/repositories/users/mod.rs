//! 사용자 리포지토리 모듈
//!
//! - [`UserStore`] - 저장소 공통 연산
//! - [`PostgresUserRepository`] - sqlx 기반 관계형 구현
//! - [`MongoUserRepository`] - 문서형 구현

pub mod mongo_user_repo;
pub mod postgres_user_repo;
pub mod user_store;

pub use mongo_user_repo::MongoUserRepository;
pub use postgres_user_repo::PostgresUserRepository;
pub use user_store::{Backend, UserStore};
