//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를
//! 통일된 응답 봉투(`{success, message, data?, error?}`)로 변환합니다.
//!
//! 핸들러는 [`AppError`]를 그대로 반환하지 않고, 요청 언어로 메시지를
//! 번역한 [`LocalizedError`]로 감싸서 반환합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find(store: &dyn UserStore, id: &UserId) -> AppResult<User> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound("user does not exist".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::dto::common::ApiResponse;
use crate::utils::localizer::Localizer;

/// 5xx 응답에 노출되는 고정 진단 문자열
pub const HIDDEN_DETAIL: &str = "Something went wrong";

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 HTTP 상태 코드, 번역 키, 외부 노출용 진단 문자열을 가집니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 토큰 누락, 위조, 만료 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 로그인 자격 증명 불일치 (401 Unauthorized)
    ///
    /// 알 수 없는 이메일과 잘못된 비밀번호를 구분하지 않습니다.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 요청 처리 시간 초과 (408 Request Timeout)
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TimeoutError(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 사용자 메시지를 찾기 위한 번역 키
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::AuthenticationError(_) => "unauthorized",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::NotFound(_) => "user_not_found",
            AppError::TimeoutError(_) => "request_timeout",
            AppError::ConflictError(_) => "email_exists",
            AppError::DatabaseError(_) | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 응답 봉투의 `error` 필드에 들어갈 진단 문자열
    ///
    /// 서버 내부 에러는 원인을 숨기고 [`HIDDEN_DETAIL`]을 돌려줍니다.
    /// 중복 에러는 어느 필드가 충돌했는지 드러내지 않습니다.
    pub fn public_detail(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::TimeoutError(msg) => msg.clone(),
            AppError::InvalidCredentials => "Authentication failed".to_string(),
            AppError::ConflictError(_) => "User already exists".to_string(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => HIDDEN_DETAIL.to_string(),
        }
    }

    /// 번역된 메시지를 붙여 응답 가능한 에러로 변환합니다.
    pub fn localized(self, message: impl Into<String>) -> LocalizedError {
        LocalizedError {
            error: self,
            message: message.into(),
        }
    }

    fn log(&self) {
        if self.status_code().is_server_error() {
            log::error!("❌ 요청 처리 실패: {}", self);
        } else {
            log::warn!("⚠️ 요청 거부: {}", self);
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    /// 요청 언어 정보가 없을 때는 기본 언어 메시지로 응답합니다.
    fn error_response(&self) -> HttpResponse {
        self.log();
        let message = Localizer::default().get(Localizer::FALLBACK_LANGUAGE, self.message_key());
        HttpResponse::build(AppError::status_code(self))
            .json(ApiResponse::<()>::error(message, self.public_detail()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// 필드별 검증 실패를 `field: message; ...` 형태로 모읍니다.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    let reason = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, reason)
                })
            })
            .collect();
        details.sort();

        AppError::ValidationError(details.join("; "))
    }
}

/// 요청 언어로 번역된 메시지를 가진 에러
#[derive(Debug, Error)]
#[error("{error}")]
pub struct LocalizedError {
    pub error: AppError,
    pub message: String,
}

impl ResponseError for LocalizedError {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        self.error.log();
        HttpResponse::build(self.error.status_code())
            .json(ApiResponse::<()>::error(self.message.clone(), self.error.public_detail()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 저장소 계층 에러로 변환합니다.
    fn db_context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn db_context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::DatabaseError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (AppError::AuthenticationError("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::AuthorizationError("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::TimeoutError("x".into()), StatusCode::REQUEST_TIMEOUT),
            (AppError::ConflictError("x".into()), StatusCode::CONFLICT),
            (AppError::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.error_response().status(), expected, "{}", error);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = AppError::DatabaseError("connection refused at 10.0.0.3".to_string());
        assert_eq!(error.public_detail(), HIDDEN_DETAIL);

        let error = AppError::ConflictError("email a@b.c taken".to_string());
        assert_eq!(error.public_detail(), "User already exists");
    }

    #[actix_web::test]
    async fn test_localized_error_envelope() {
        let error = AppError::InvalidCredentials.localized("Ungültige Anmeldedaten");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Ungültige Anmeldedaten");
        assert_eq!(json["error"], "Authentication failed");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        match result.context("Additional context") {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }

        let result: Result<(), &str> = Err("pool closed");
        assert!(matches!(result.db_context("insert"), Err(AppError::DatabaseError(_))));
    }
}
