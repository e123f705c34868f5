//! 요청 언어 추출자
//!
//! `Accept-Language` 헤더, `lang` 쿼리 파라미터, 기본 언어 순서로 언어를
//! 결정하고 기본 서브태그만 남깁니다.

use std::future::{ready, Ready};

use actix_web::{http::header, web, FromRequest, HttpRequest};
use serde::Deserialize;

use crate::errors::{AppError, LocalizedError};
use crate::state::AppState;
use crate::utils::localizer::{primary_subtag, Localizer};

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// 요청 언어와 번역기
#[derive(Debug, Clone)]
pub struct Lang {
    code: String,
    localizer: Localizer,
}

impl Lang {
    /// 요청에서 언어를 결정합니다.
    pub fn resolve(req: &HttpRequest) -> Self {
        let localizer = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.localizer.clone())
            .unwrap_or_default();

        let from_header = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(primary_subtag);

        let code = from_header
            .or_else(|| {
                web::Query::<LangQuery>::from_query(req.query_string())
                    .ok()
                    .and_then(|query| query.into_inner().lang)
                    .as_deref()
                    .and_then(primary_subtag)
            })
            .unwrap_or_else(|| localizer.default_language().to_string());

        Self { code, localizer }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// 메시지 키를 요청 언어로 번역합니다.
    pub fn text(&self, key: &str) -> String {
        self.localizer.get(&self.code, key)
    }

    /// 에러에 요청 언어의 메시지를 붙입니다.
    pub fn localize(&self, error: AppError) -> LocalizedError {
        let message = self.text(error.message_key());
        error.localized(message)
    }
}

impl FromRequest for Lang {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(Lang::resolve(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_header_wins_over_query() {
        let req = TestRequest::get()
            .uri("/api/v1/health?lang=ar")
            .insert_header((header::ACCEPT_LANGUAGE, "de-DE,de;q=0.9"))
            .to_http_request();
        assert_eq!(Lang::resolve(&req).code(), "de");
    }

    #[test]
    fn test_query_then_default() {
        let req = TestRequest::get().uri("/api/v1/health?lang=ar-EG").to_http_request();
        let lang = Lang::resolve(&req);
        assert_eq!(lang.code(), "ar");
        assert_eq!(lang.text("forbidden"), "الوصول محظور");

        let req = TestRequest::get().uri("/api/v1/health").to_http_request();
        assert_eq!(Lang::resolve(&req).code(), "en");
    }

    #[test]
    fn test_unsupported_language_falls_back_in_text() {
        let req = TestRequest::get()
            .insert_header((header::ACCEPT_LANGUAGE, "fr-FR"))
            .to_http_request();
        let lang = Lang::resolve(&req);
        assert_eq!(lang.code(), "fr");
        assert_eq!(lang.text("user_not_found"), "User not found");
        assert_eq!(lang.localize(AppError::NotFound("x".into())).message, "User not found");
    }
}
