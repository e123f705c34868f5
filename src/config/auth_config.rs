//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명 설정을 관리합니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```

use crate::config::data_config::{read_optional, read_parsed, Lookup};

/// `JWT_SECRET`이 없을 때 사용하는 개발용 키
///
/// 프로덕션에서 이 값이 쓰이면 시작 시 경고가 출력됩니다.
pub const DEVELOPMENT_JWT_SECRET: &str = "your-secret-key-change-this-in-production";

/// JWT 토큰 설정
///
/// 프로세스 시작 시 한 번 읽혀서 토큰 서비스에 주입됩니다.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    pub fn from_lookup(get: Lookup) -> Self {
        Self {
            secret: read_optional(get, "JWT_SECRET")
                .unwrap_or_else(|| DEVELOPMENT_JWT_SECRET.to_string()),
            expiration_hours: read_parsed(get, "JWT_EXPIRATION_HOURS", 24),
        }
    }

    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::from_lookup(&|_: &str| None);
        assert_eq!(config.expiration_hours, 24);
        assert!(config.uses_development_secret());
    }

    #[test]
    fn test_secret_is_not_printed() {
        let config = JwtConfig::from_lookup(&|key: &str| {
            (key == "JWT_SECRET").then(|| "top-secret-value".to_string())
        });
        assert!(!config.uses_development_secret());
        assert!(!format!("{:?}", config).contains("top-secret-value"));
    }
}
