//! # 공통 응답 봉투
//!
//! 모든 응답은 `{success, message, data?, error?}` 형태를 가집니다.
//!
//! ```json
//! { "success": true, "message": "Login successful", "data": { "token": "..." } }
//! { "success": false, "message": "Validation error", "error": "email: invalid" }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 통일된 응답 봉투
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    /// 실패 응답에 진단용 데이터를 함께 싣습니다.
    pub fn error_with_data(message: impl Into<String>, error: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::error(message, error)
        }
    }
}

/// 페이지 메타데이터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_page: u64,
}

impl Pagination {
    /// `total_page = ceil(total / page_size)`
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let total_page = if page_size == 0 {
            0
        } else {
            total.div_ceil(u64::from(page_size))
        };

        Self {
            page,
            page_size,
            total,
            total_page,
        }
    }
}

/// 페이지 단위 목록 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

pub const HEALTHY: &str = "healthy";
pub const UNHEALTHY: &str = "unhealthy";

/// 헬스 체크 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// 저장소 이름 → `healthy` | `unhealthy`
    pub services: BTreeMap<String, String>,
    pub version: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(3, 10, 25).total_page, 3);
        assert_eq!(Pagination::new(1, 10, 30).total_page, 3);
        assert_eq!(Pagination::new(1, 10, 0).total_page, 0);
        assert_eq!(Pagination::new(1, 100, 1).total_page, 1);
    }

    #[test]
    fn test_envelope_omits_empty_fields() {
        let ok = serde_json::to_value(ApiResponse::ok("done", 1)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "message": "done", "data": 1}));

        let err = serde_json::to_value(ApiResponse::<()>::error("Bad request", "page: range")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "message": "Bad request", "error": "page: range"})
        );
    }
}
