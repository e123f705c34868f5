//! 인증 요청관련 DTO
//!
//! 회원가입과 로그인 요청 본문을 매핑합니다. 필드명은 snake_case이며
//! camelCase 별칭도 받습니다.
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,

    #[serde(alias = "firstName")]
    #[validate(length(min = 1, message = "is required"))]
    pub first_name: String,

    #[serde(alias = "lastName")]
    #[validate(length(min = 1, message = "is required"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(json: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_register_validation() {
        let valid = register(serde_json::json!({
            "email": "ada@example.com",
            "username": "ada",
            "password": "secret1",
            "firstName": "Ada",
            "last_name": "Lovelace"
        }));
        assert!(valid.validate().is_ok());
        assert_eq!(valid.first_name, "Ada");

        let invalid = register(serde_json::json!({
            "email": "not-an-email",
            "username": "ab",
            "password": "12345",
            "first_name": "",
            "last_name": "L"
        }));
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("first_name"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_login_validation() {
        let login: LoginRequest =
            serde_json::from_str(r#"{"email": "ada@example.com", "password": "short"}"#).unwrap();
        assert!(login.validate().is_err());
    }
}
