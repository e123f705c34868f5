//! 요청 처리 중에 쓰이는 모델 (인증 정보, 토큰 클레임, 요청 언어, 페이지 요청)

pub mod auth;
pub mod language;
pub mod pagination;
pub mod token;

pub use auth::*;
pub use language::Lang;
pub use pagination::{PageRequest, SortDirection, SortField, SortSpec};
pub use token::*;
