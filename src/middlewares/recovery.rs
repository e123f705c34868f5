//! 패닉 복구 미들웨어
//!
//! 안쪽 서비스에서 발생한 패닉을 잡아 내부 정보 없이 500 봉투로 응답합니다.

use std::any::Any;
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::domain::models::language::Lang;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PanicRecovery;

impl<S, B> Transform<S, ServiceRequest> for PanicRecovery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = PanicRecoveryService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicRecoveryService { service }))
    }
}

pub struct PanicRecoveryService<S> {
    service: S,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl<S, B> Service<ServiceRequest> for PanicRecoveryService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res.map(ServiceResponse::map_into_left_body),
                Err(payload) => {
                    log::error!(
                        "❌ 패닉 복구: {} {} - {}",
                        request.method(),
                        request.path(),
                        panic_message(payload.as_ref())
                    );
                    let err = AppError::InternalError("handler panicked".to_string());
                    let response = Lang::resolve(&request).localize(err).error_response();
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn boom() -> HttpResponse {
        panic!("secret internals");
    }

    #[actix_web::test]
    async fn test_panic_becomes_internal_error_envelope() {
        let app = test::init_service(
            App::new()
                .wrap(PanicRecovery)
                .route("/boom", web::get().to(boom)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Something went wrong");
        assert!(!body.to_string().contains("secret internals"));
    }
}
