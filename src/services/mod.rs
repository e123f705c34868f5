//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 시작 시 한 번 만들어져 [`crate::state::AppState`]를 통해
//! 핸들러에 주입됩니다. 저장소는 `Arc<dyn UserStore>`로만 보입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let response = state.user_service.register(request).await?;
//! let report = state.health_service.check().await;
//! ```

pub mod auth;
pub mod health;
pub mod users;
