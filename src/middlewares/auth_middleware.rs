//! JWT 인증 미들웨어
//!
//! `Authorization: Bearer <token>` 헤더를 검증해 [`AuthenticatedUser`]를
//! request extension에 넣습니다. 바깥 계층에서 이미 인증된 요청이면
//! 토큰을 다시 검증하지 않고 역할만 확인합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! web::scope("/users")
//!     .wrap(AuthMiddleware::required())
//!     .service(
//!         web::resource("")
//!             .wrap(AuthMiddleware::required_with_roles(RequiredRole::administrators()))
//!             .route(web::get().to(list_users)),
//!     )
//! ```
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어 팩토리
///
/// 유효한 bearer 토큰이 반드시 필요하며, 역할 조건이 있으면 함께 검사합니다.
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 유효한 토큰 필수
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 유효한 토큰과 역할 조건 필수
    pub fn required_with_roles(required: RequiredRole) -> Self {
        Self {
            required_role: Some(required),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::entities::{NewUser, Role, UserId};
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::TokenService;
    use crate::state::AppState;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::Utc;
    use crate::test_support::{test_config, MemoryUserStore, TEST_JWT_SECRET};

    fn token_for(role: Role) -> String {
        let mut user = NewUser::new(
            "m@example.com".to_string(),
            "mid".to_string(),
            "hash".to_string(),
            "Mid".to_string(),
            "Dle".to_string(),
            Utc::now(),
        )
        .with_id(UserId::Relational(7));
        user.role = role;

        TokenService::new(&JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiration_hours: 24,
        })
        .issue(&user)
        .unwrap()
        .token
    }

    fn state() -> web::Data<AppState> {
        let store = MemoryUserStore::shared();
        web::Data::new(AppState::new(&test_config(), store.clone(), vec![store]).unwrap())
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    #[actix_web::test]
    async fn test_missing_token_is_rejected_with_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .service(web::resource("/me").wrap(AuthMiddleware::required()).to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Accept-Language", "de"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Nicht autorisierter Zugriff");
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .service(web::resource("/me").wrap(AuthMiddleware::required()).to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token_for(Role::User))))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "mid");
    }

    #[actix_web::test]
    async fn test_role_check_returns_forbidden() {
        let app = test::init_service(
            App::new().app_data(state()).service(
                web::resource("/admin")
                    .wrap(AuthMiddleware::required_with_roles(RequiredRole::administrators()))
                    .to(whoami),
            ),
        )
        .await;

        let user_req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token_for(Role::User))))
            .to_request();
        assert_eq!(test::call_service(&app, user_req).await.status(), StatusCode::FORBIDDEN);

        let admin_req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token_for(Role::Superadmin))))
            .to_request();
        assert_eq!(test::call_service(&app, admin_req).await.status(), StatusCode::OK);
    }
}
