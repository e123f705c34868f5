//! Authentication HTTP Handlers
//!
//! 회원가입과 로컬 로그인 엔드포인트입니다. 두 엔드포인트 모두 성공 시
//! 세션 토큰과 사용자 정보를 담은 [`AuthResponse`]를 돌려줍니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/register` → 201
//! - `POST /api/v1/auth/login` → 200
//!
//! [`AuthResponse`]: crate::domain::dto::AuthResponse

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::{ApiResponse, LoginRequest, RegisterRequest};
use crate::domain::models::language::Lang;
use crate::errors::LocalizedError;
use crate::state::AppState;

/// 회원가입 핸들러
///
/// # Errors
///
/// * 400 - 본문 검증 실패
/// * 409 - 이메일 또는 사용자명 중복
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    lang: Lang,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, LocalizedError> {
    let request = payload.into_inner();
    request.validate().map_err(|e| lang.localize(e.into()))?;

    let response = state
        .user_service
        .register(request)
        .await
        .map_err(|e| lang.localize(e))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(lang.text("user_created"), response)))
}

/// 로컬 로그인 핸들러
///
/// 알 수 없는 이메일과 틀린 비밀번호는 같은 401 응답이 됩니다.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    lang: Lang,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, LocalizedError> {
    let request = payload.into_inner();
    request.validate().map_err(|e| lang.localize(e.into()))?;

    let response = state
        .user_service
        .login(request)
        .await
        .map_err(|e| lang.localize(e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(lang.text("login_successful"), response)))
}
