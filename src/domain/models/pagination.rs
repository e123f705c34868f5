//! 목록 조회 요청의 정규화된 형태
//!
//! 정렬 파라미터는 `field:direction` 형식이며 허용 목록에 있는 필드만 받습니다.
//! 저장소는 검증이 끝난 [`SortSpec`]만 보게 되므로 임의의 컬럼명이
//! 쿼리로 흘러 들어가지 않습니다.

use std::fmt;

use crate::errors::{AppError, AppResult};

/// 정렬 가능한 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Email,
    Username,
    FirstName,
    LastName,
    Role,
}

impl SortField {
    /// 컬럼명과 문서 필드명 (두 저장소에서 동일)
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Email => "email",
            SortField::Username => "username",
            SortField::FirstName => "first_name",
            SortField::LastName => "last_name",
            SortField::Role => "role",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "created_at" | "createdAt" => Some(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Some(SortField::UpdatedAt),
            "email" => Some(SortField::Email),
            "username" => Some(SortField::Username),
            "first_name" | "firstName" => Some(SortField::FirstName),
            "last_name" | "lastName" => Some(SortField::LastName),
            "role" => Some(SortField::Role),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// MongoDB 정렬 값 (1 | -1)
    pub fn as_mongo(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

/// 검증된 정렬 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// 최신 가입자 우선
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// `field[:asc|desc]` 문자열을 해석합니다. 방향이 없으면 오름차순.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 허용되지 않은 필드 또는 방향
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let (field_raw, direction_raw) = match raw.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (raw, None),
        };

        let field = SortField::parse(field_raw)
            .ok_or_else(|| AppError::ValidationError(format!("sort: unknown field '{}'", field_raw)))?;

        let direction = match direction_raw.map(|d| d.to_lowercase()).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(AppError::ValidationError(format!(
                    "sort: unknown direction '{}'",
                    other
                )))
            }
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field.column(), direction)
    }
}

/// 저장소에 전달되는 페이지 요청 (1부터 시작하는 페이지)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort: SortSpec,
    pub search: Option<String>,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}
