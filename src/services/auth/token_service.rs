//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256으로 서명된 세션 토큰을 발급하고 검증합니다.
//! 검증은 저장소를 조회하지 않으며 폐기 목록도 없습니다.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::User;
use crate::domain::models::token::{IssuedToken, TokenClaims};
use crate::errors::{AppError, AppResult};

/// JWT 토큰 관리 서비스
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            lifetime: Duration::hours(config.expiration_hours),
        }
    }

    /// 현재 시각 기준으로 사용자 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let issued = token_service.issue(&user)?;
    /// println!("expires at {}", issued.expires_at);
    /// ```
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    /// 지정한 시각을 발급 시각으로 토큰을 만듭니다.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = now + self.lifetime;
        let claims = TokenClaims::for_user(user, now, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// 현재 시각 기준으로 토큰을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 서명 불일치, 형식 오류, 유효 기간 밖
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        self.verify_at(token, Utc::now())
    }

    /// `now`가 `[nbf, exp]` 안에 있을 때만 클레임을 돌려줍니다.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // 시간 검사는 아래에서 `now` 기준으로 직접 수행
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims =
            HashSet::from(["exp".to_string(), "nbf".to_string(), "iat".to_string()]);

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::AuthenticationError(format!("invalid token: {}", e)))?;

        let ts = now.timestamp();
        if ts < claims.nbf {
            return Err(AppError::AuthenticationError("token not yet valid".to_string()));
        }
        if ts > claims.exp {
            return Err(AppError::AuthenticationError("token expired".to_string()));
        }

        Ok(claims)
    }

    /// `Authorization: Bearer <token>` 헤더에서 토큰 부분만 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        let (scheme, token) = auth_header
            .trim()
            .split_once(' ')
            .ok_or_else(|| AppError::AuthenticationError("invalid authorization header".to_string()))?;

        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AppError::AuthenticationError(
                "invalid authorization header".to_string(),
            ));
        }

        Ok(token)
    }
}
