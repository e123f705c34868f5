//! 비밀번호 해싱 서비스
//!
//! bcrypt는 호출마다 무작위 솔트를 생성해 결과 문자열에 포함시키고,
//! 검증 시 상수 시간 비교를 수행합니다. 해싱은 CPU를 오래 점유하므로
//! actix 블로킹 스레드 풀(`web::block`)에서 실행합니다.

use std::sync::Arc;

use actix_web::web;

use crate::config::PasswordConfig;
use crate::errors::{AppResult, ErrorContext};

const DUMMY_PASSWORD: &str = "timing-equalizer-password";

#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
    /// 존재하지 않는 계정 로그인 시 대신 검증할 해시
    dummy_hash: Arc<str>,
}

impl PasswordService {
    /// 설정된 cost로 서비스를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 더미 해시 생성 실패 (잘못된 cost)
    pub fn new(config: &PasswordConfig) -> AppResult<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, config.bcrypt_cost)
            .context("bcrypt 더미 해시 생성 실패")?;

        Ok(Self {
            cost: config.bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// 비밀번호를 해싱합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 난수 생성 실패 등 해싱 실패
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        let started = std::time::Instant::now();
        let hashed = web::block(move || bcrypt::hash(password, cost))
            .await
            .context("블로킹 작업 실행 실패")?
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", started.elapsed());

        Ok(hashed)
    }

    /// 비밀번호가 저장된 해시와 일치하는지 확인합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(false)` - 불일치
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장된 해시 형식이 잘못됨
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        web::block(move || bcrypt::verify(password, &hash))
            .await
            .context("블로킹 작업 실행 실패")?
            .context("저장된 비밀번호 해시가 손상되었습니다")
    }

    /// 결과를 버리는 검증 한 번을 수행합니다.
    ///
    /// 알 수 없는 이메일과 틀린 비밀번호의 응답 시간을 맞추기 위해 사용합니다.
    pub async fn verify_dummy(&self, password: &str) {
        let dummy_hash = self.dummy_hash.clone();
        if let Err(e) = self.verify(password, &dummy_hash).await {
            log::warn!("더미 비밀번호 검증 실패: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn service() -> PasswordService {
        PasswordService::new(&PasswordConfig { bcrypt_cost: 4 }).unwrap()
    }

    #[actix_web::test]
    async fn test_hash_and_verify() {
        let passwords = service();
        let hash = passwords.hash("correct horse").await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(passwords.verify("correct horse", &hash).await.unwrap());
        assert!(!passwords.verify("correct horsf", &hash).await.unwrap());
        assert!(!passwords.verify("", &hash).await.unwrap());
    }

    #[actix_web::test]
    async fn test_salt_differs_per_call() {
        let passwords = service();
        let first = passwords.hash("same-password").await.unwrap();
        let second = passwords.hash("same-password").await.unwrap();

        assert_ne!(first, second);
        assert!(passwords.verify("same-password", &second).await.unwrap());
    }

    #[actix_web::test]
    async fn test_malformed_hash_is_an_error() {
        let passwords = service();
        let result = passwords.verify("anything", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[actix_web::test]
    async fn test_verify_dummy_does_not_fail() {
        service().verify_dummy("whatever").await;
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        assert!(PasswordService::new(&PasswordConfig { bcrypt_cost: 99 }).is_err());
    }
}
