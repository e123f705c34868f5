//! Health Check Handler

use actix_web::{get, web, HttpResponse};

use crate::domain::dto::ApiResponse;
use crate::domain::models::language::Lang;
use crate::state::AppState;

/// 활성 저장소 상태 점검
///
/// 모두 정상이면 200, 하나라도 실패하면 보고서를 담은 503을 돌려줍니다.
///
/// # Endpoint
/// `GET /api/v1/health`
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>, lang: Lang) -> HttpResponse {
    let report = state.health_service.check().await;

    if report.is_healthy() {
        HttpResponse::Ok().json(ApiResponse::ok(lang.text("system_healthy"), report))
    } else {
        log::warn!("⚠️ 상태 점검 실패: {:?}", report.services);
        HttpResponse::ServiceUnavailable().json(ApiResponse::error_with_data(
            lang.text("system_unhealthy"),
            "One or more services are down",
            report,
        ))
    }
}
