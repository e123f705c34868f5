//! 요청 처리 시간 제한 미들웨어
//!
//! 안쪽 서비스가 제한 시간 안에 응답하지 못하면 408 봉투로 응답합니다.
//! 버려진 future는 drop되지만, 이미 저장소로 나간 호출이 중단된다는 보장은 없습니다.

use std::future::{ready, Ready};
use std::time::Duration;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    rt::time::timeout,
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::language::Lang;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy)]
pub struct RequestTimeout {
    duration: Duration,
}

impl RequestTimeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequestTimeoutService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeoutService {
            service,
            duration: self.duration,
        }))
    }
}

pub struct RequestTimeoutService<S> {
    service: S,
    duration: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestTimeoutService<S>
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
        let duration = self.duration;
        let fut = self.service.call(req);

        Box::pin(async move {
            match timeout(duration, fut).await {
                Ok(res) => res.map(ServiceResponse::map_into_left_body),
                Err(_) => {
                    let err = AppError::TimeoutError(format!(
                        "request exceeded {}s",
                        duration.as_secs_f32()
                    ));
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

    async fn slow() -> HttpResponse {
        actix_web::rt::time::sleep(Duration::from_millis(500)).await;
        HttpResponse::Ok().finish()
    }

    async fn fast() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_slow_request_times_out() {
        let app = test::init_service(
            App::new()
                .wrap(RequestTimeout::new(Duration::from_millis(50)))
                .route("/slow", web::get().to(slow))
                .route("/fast", web::get().to(fast)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/slow").to_request()).await;
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Request timeout");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/fast").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
