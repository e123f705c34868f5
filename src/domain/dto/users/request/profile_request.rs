//! 프로필 수정 및 사용자 목록 조회 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::models::pagination::{PageRequest, SortSpec};
use crate::errors::AppResult;
use crate::utils::string_utils::{clean_optional_string, deserialize_optional_string};

/// 프로필 수정 요청
///
/// 빈 문자열(공백 포함)은 "변경하지 않음"으로 해석됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, alias = "firstName", deserialize_with = "deserialize_optional_string")]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName", deserialize_with = "deserialize_optional_string")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn default_sort() -> String {
    "created_at:desc".to_string()
}

/// `GET /users` 쿼리 파라미터
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_page_size", alias = "pageSize")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub page_size: u32,

    #[serde(default = "default_sort")]
    pub sort: String,

    #[serde(default)]
    pub search: Option<String>,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort: default_sort(),
            search: None,
        }
    }
}

impl ListUsersQuery {
    /// 검증된 저장소 요청으로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 범위를 벗어난 페이지 값 또는 허용되지 않은 정렬
    pub fn into_page_request(self) -> AppResult<PageRequest> {
        self.validate()?;

        Ok(PageRequest {
            page: self.page,
            page_size: self.page_size,
            sort: SortSpec::parse(&self.sort)?,
            search: clean_optional_string(self.search),
        })
    }
}
