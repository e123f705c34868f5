//! # Route Configuration
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 있습니다.
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/api/v1/health` | - |
//! | POST | `/api/v1/auth/register` | - |
//! | POST | `/api/v1/auth/login` | - |
//! | GET | `/api/v1/users/profile` | bearer |
//! | PUT | `/api/v1/users/profile` | bearer |
//! | GET | `/api/v1/users` | bearer + admin/superadmin |

use actix_web::{error, web, HttpRequest};

use crate::domain::models::language::Lang;
use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(
        web::scope("/api/v1")
            .service(handlers::health::health_check)
            .configure(configure_auth_routes)
            .configure(configure_user_routes),
    );
}

/// 본문/쿼리 파싱 실패를 400 봉투로 바꿉니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(
        |err: error::JsonPayloadError, req: &HttpRequest| {
            bad_request(req, format!("invalid request body: {}", err))
        },
    ))
    .app_data(web::QueryConfig::default().error_handler(
        |err: error::QueryPayloadError, req: &HttpRequest| {
            bad_request(req, format!("invalid query: {}", err))
        },
    ));
}

fn bad_request(req: &HttpRequest, detail: String) -> actix_web::Error {
    Lang::resolve(req)
        .localize(AppError::ValidationError(detail))
        .into()
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
            .service(handlers::users::list_users),
    );
}
