//! # 다국어 메시지 변환기
//!
//! 메시지 키를 언어별 문자열로 바꿉니다. 조회 순서는 요청 언어 테이블,
//! 기본 언어 테이블, 마지막으로 키 자체입니다. 실패 경로는 없습니다.
//!
//! ```rust,ignore
//! let localizer = Localizer::new("en");
//! assert_eq!(localizer.get("de", "forbidden"), "Zugriff verboten");
//! assert_eq!(localizer.get("fr", "forbidden"), "Access forbidden");
//! assert_eq!(localizer.get("de", "no_such_key"), "no_such_key");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

type Table = HashMap<&'static str, &'static str>;

static TRANSLATIONS: Lazy<HashMap<&'static str, Table>> = Lazy::new(|| {
    let mut languages = HashMap::new();

    languages.insert(
        "en",
        Table::from([
            ("welcome", "Welcome"),
            ("user_not_found", "User not found"),
            ("invalid_credentials", "Invalid credentials"),
            ("user_created", "User created successfully"),
            ("login_successful", "Login successful"),
            ("logout_successful", "Logout successful"),
            ("user_updated", "User updated successfully"),
            ("user_deleted", "User deleted successfully"),
            ("email_exists", "Email already exists"),
            ("username_exists", "Username already exists"),
            ("validation_error", "Validation error"),
            ("internal_error", "Internal server error"),
            ("unauthorized", "Unauthorized access"),
            ("forbidden", "Access forbidden"),
            ("not_found", "Resource not found"),
            ("bad_request", "Bad request"),
            ("profile_retrieved", "Profile retrieved successfully"),
            ("users_retrieved", "Users retrieved successfully"),
            ("system_healthy", "System is healthy"),
            ("system_unhealthy", "System is unhealthy"),
            ("request_timeout", "Request timeout"),
            ("rate_limited", "Too many requests"),
        ]),
    );

    languages.insert(
        "ar",
        Table::from([
            ("welcome", "أهلا وسهلا"),
            ("user_not_found", "المستخدم غير موجود"),
            ("invalid_credentials", "بيانات الاعتماد غير صحيحة"),
            ("user_created", "تم إنشاء المستخدم بنجاح"),
            ("login_successful", "تم تسجيل الدخول بنجاح"),
            ("logout_successful", "تم تسجيل الخروج بنجاح"),
            ("user_updated", "تم تحديث المستخدم بنجاح"),
            ("user_deleted", "تم حذف المستخدم بنجاح"),
            ("email_exists", "البريد الإلكتروني موجود بالفعل"),
            ("username_exists", "اسم المستخدم موجود بالفعل"),
            ("validation_error", "خطأ في التحقق"),
            ("internal_error", "خطأ في الخادم الداخلي"),
            ("unauthorized", "الوصول غير مصرح"),
            ("forbidden", "الوصول محظور"),
            ("not_found", "المورد غير موجود"),
            ("bad_request", "طلب خاطئ"),
            ("profile_retrieved", "تم استرجاع الملف الشخصي بنجاح"),
            ("users_retrieved", "تم استرجاع المستخدمين بنجاح"),
            ("system_healthy", "النظام يعمل بشكل سليم"),
            ("system_unhealthy", "النظام لا يعمل بشكل سليم"),
            ("request_timeout", "انتهت مهلة الطلب"),
        ]),
    );

    languages.insert(
        "de",
        Table::from([
            ("welcome", "Willkommen"),
            ("user_not_found", "Benutzer nicht gefunden"),
            ("invalid_credentials", "Ungültige Anmeldedaten"),
            ("user_created", "Benutzer erfolgreich erstellt"),
            ("login_successful", "Anmeldung erfolgreich"),
            ("logout_successful", "Abmeldung erfolgreich"),
            ("user_updated", "Benutzer erfolgreich aktualisiert"),
            ("user_deleted", "Benutzer erfolgreich gelöscht"),
            ("email_exists", "E-Mail bereits vorhanden"),
            ("username_exists", "Benutzername bereits vorhanden"),
            ("validation_error", "Validierungsfehler"),
            ("internal_error", "Interner Serverfehler"),
            ("unauthorized", "Nicht autorisierter Zugriff"),
            ("forbidden", "Zugriff verboten"),
            ("not_found", "Ressource nicht gefunden"),
            ("bad_request", "Fehlerhafte Anfrage"),
            ("profile_retrieved", "Profil erfolgreich abgerufen"),
            ("users_retrieved", "Benutzer erfolgreich abgerufen"),
            ("system_healthy", "System ist betriebsbereit"),
            ("system_unhealthy", "System ist gestört"),
            ("request_timeout", "Zeitüberschreitung der Anfrage"),
        ]),
    );

    languages
});

/// 언어별 메시지 조회기
#[derive(Debug, Clone)]
pub struct Localizer {
    default_language: String,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Self::FALLBACK_LANGUAGE)
    }
}

impl Localizer {
    /// 설정이 없을 때 사용하는 기본 언어
    pub const FALLBACK_LANGUAGE: &'static str = "en";

    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into().to_lowercase(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// 메시지 키를 번역합니다.
    ///
    /// # Arguments
    ///
    /// * `language` - 기본 서브태그 형태의 언어 코드 (`en`, `de`, ...)
    /// * `key` - 메시지 키
    ///
    /// # Returns
    ///
    /// 번역 문자열. 어느 테이블에도 없으면 `key`를 그대로 돌려줍니다.
    pub fn get(&self, language: &str, key: &str) -> String {
        [language, self.default_language.as_str()]
            .iter()
            .filter_map(|lang| TRANSLATIONS.get(*lang))
            .find_map(|table| table.get(key))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// 내장 테이블이 있는 언어인지 확인합니다.
    pub fn supports(&self, language: &str) -> bool {
        TRANSLATIONS.contains_key(language)
    }
}

/// 언어 태그에서 기본 서브태그만 추출합니다.
///
/// `de-DE,de;q=0.9,en;q=0.8` → `de`. 비어 있으면 `None`.
pub fn primary_subtag(raw: &str) -> Option<String> {
    let first = raw.split(',').next()?;
    let first = first.split(';').next()?;
    let primary = first.split(['-', '_']).next()?.trim();

    if primary.is_empty() || primary == "*" {
        None
    } else {
        Some(primary.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_order() {
        let localizer = Localizer::new("en");

        assert_eq!(localizer.get("de", "user_not_found"), "Benutzer nicht gefunden");
        assert_eq!(localizer.get("ar", "forbidden"), "الوصول محظور");
        // 지원하지 않는 언어는 기본 언어로
        assert_eq!(localizer.get("fr", "user_not_found"), "User not found");
        // 테이블에 없는 키는 키 자체
        assert_eq!(localizer.get("de", "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_missing_key_in_language_falls_back_to_default() {
        let localizer = Localizer::new("en");
        assert_eq!(localizer.get("de", "rate_limited"), "Too many requests");

        let german_default = Localizer::new("DE");
        assert_eq!(german_default.default_language(), "de");
        assert_eq!(german_default.get("fr", "welcome"), "Willkommen");
    }

    #[test]
    fn test_every_language_has_the_core_keys() {
        let localizer = Localizer::default();
        let core_keys = [
            "welcome", "user_not_found", "invalid_credentials", "user_created",
            "login_successful", "logout_successful", "user_updated", "user_deleted",
            "email_exists", "username_exists", "validation_error", "internal_error",
            "unauthorized", "forbidden", "not_found", "bad_request",
        ];

        for language in ["en", "ar", "de"] {
            assert!(localizer.supports(language));
            for key in core_keys {
                assert_ne!(localizer.get(language, key), key, "{}:{}", language, key);
            }
        }
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("de-DE,de;q=0.9,en;q=0.8"), Some("de".to_string()));
        assert_eq!(primary_subtag("AR"), Some("ar".to_string()));
        assert_eq!(primary_subtag("en_US"), Some("en".to_string()));
        assert_eq!(primary_subtag("en;q=0.5"), Some("en".to_string()));
        assert_eq!(primary_subtag(""), None);
        assert_eq!(primary_subtag("  "), None);
        assert_eq!(primary_subtag("*"), None);
    }
}
