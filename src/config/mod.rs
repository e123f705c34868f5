//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한 번에 읽어 타입이 있는 [`AppConfig`]로 만듭니다.
//! 시작 시 [`AppConfig::validate`]를 통과하지 못하면 서버는 뜨지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 환경, 패스워드, MongoDB/PostgreSQL 설정
//! - [`auth_config`] - JWT 설정
//!
//! ## 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"    # development, test, staging, production
//! export PORT="8080"
//! export LOG_LEVEL="info"
//! export DEFAULT_LANGUAGE="en"
//! export JWT_SECRET="your-super-secret-key"
//!
//! export MONGODB_ENABLED="true"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export MONGODB_DATABASE="user_service"
//!
//! export POSTGRES_ENABLED="false"
//! export POSTGRES_HOST="localhost"
//! export POSTGRES_PORT="5432"
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::{
    Environment, Lookup, MongoConfig, PasswordConfig, PostgresConfig, ServerConfig,
};

use crate::errors::{AppError, AppResult};
use data_config::read_string;

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub log_level: String,
    pub default_language: String,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub mongodb: MongoConfig,
    pub postgres: PostgresConfig,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// 임의의 조회 함수에서 설정을 읽습니다.
    pub fn from_lookup(get: Lookup) -> Self {
        let environment = Environment::from_lookup(get);

        Self {
            environment,
            server: ServerConfig::from_lookup(get),
            log_level: read_string(get, "LOG_LEVEL", "info").to_lowercase(),
            default_language: read_string(get, "DEFAULT_LANGUAGE", "en").to_lowercase(),
            jwt: JwtConfig::from_lookup(get),
            password: PasswordConfig::from_lookup(get),
            mongodb: MongoConfig::from_lookup(get),
            postgres: PostgresConfig::from_lookup(get),
        }
    }

    /// 시작 전에 설정 조합을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장소가 하나도 활성화되지 않았거나 JWT 키가 비어 있음
    pub fn validate(&self) -> AppResult<()> {
        if !self.mongodb.enabled && !self.postgres.enabled {
            return Err(AppError::InternalError(
                "no storage backend enabled: set MONGODB_ENABLED or POSTGRES_ENABLED".to_string(),
            ));
        }

        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InternalError("JWT_SECRET must not be empty".to_string()));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(AppError::InternalError(
                "JWT_EXPIRATION_HOURS must be positive".to_string(),
            ));
        }

        if self.environment.is_production() && self.jwt.uses_development_secret() {
            log::warn!("⚠️ 프로덕션 환경에서 기본 JWT_SECRET을 사용하고 있습니다");
        }

        Ok(())
    }

    /// env_logger 필터 문자열
    pub fn log_filter(&self) -> String {
        format!("{},actix_web=info", self.log_level)
    }
}
