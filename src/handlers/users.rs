//! User HTTP Handlers
//!
//! 인증된 사용자의 프로필 조회/수정과 관리자용 사용자 목록입니다.
//! 모든 엔드포인트는 `/api/v1/users` 스코프의 [`AuthMiddleware`] 뒤에 있습니다.
//!
//! [`AuthMiddleware`]: crate::middlewares::AuthMiddleware

use actix_web::{get, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::{ApiResponse, ListUsersQuery, UpdateProfileRequest};
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::domain::models::language::Lang;
use crate::errors::LocalizedError;
use crate::middlewares::AuthMiddleware;
use crate::state::AppState;

/// 내 프로필 조회
///
/// # Endpoint
/// `GET /api/v1/users/profile`
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    lang: Lang,
    user: AuthenticatedUser,
) -> Result<HttpResponse, LocalizedError> {
    let profile = state
        .user_service
        .profile(&user.user_id)
        .await
        .map_err(|e| lang.localize(e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(lang.text("profile_retrieved"), profile)))
}

/// 내 프로필 수정
///
/// 빈 문자열 필드는 기존 값을 유지합니다.
///
/// # Endpoint
/// `PUT /api/v1/users/profile`
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    lang: Lang,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, LocalizedError> {
    let request = payload.into_inner();
    request.validate().map_err(|e| lang.localize(e.into()))?;

    let profile = state
        .user_service
        .update_profile(&user.user_id, request)
        .await
        .map_err(|e| lang.localize(e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(lang.text("user_updated"), profile)))
}

/// 사용자 목록 (admin, superadmin)
///
/// # Endpoint
/// `GET /api/v1/users?page=1&page_size=10&sort=created_at:desc&search=term`
#[get(
    "",
    wrap = "AuthMiddleware::required_with_roles(RequiredRole::administrators())"
)]
pub async fn list_users(
    state: web::Data<AppState>,
    lang: Lang,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, LocalizedError> {
    let request = query
        .into_inner()
        .into_page_request()
        .map_err(|e| lang.localize(e))?;

    let page = state
        .user_service
        .list_users(request)
        .await
        .map_err(|e| lang.localize(e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(lang.text("users_retrieved"), page)))
}
