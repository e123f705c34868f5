//! 저장소 상태 점검 서비스
//!
//! 활성화된 모든 저장소를 순서대로 확인합니다. 하나라도 실패하면
//! 전체 상태는 `unhealthy`입니다.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::dto::common::{HealthResponse, HEALTHY, UNHEALTHY};
use crate::repositories::users::UserStore;

pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Clone)]
pub struct HealthService {
    probes: Vec<Arc<dyn UserStore>>,
}

impl HealthService {
    pub fn new(probes: Vec<Arc<dyn UserStore>>) -> Self {
        Self { probes }
    }

    /// 상태 보고서를 만듭니다. 응답 코드는 [`HealthResponse::is_healthy`]로 결정합니다.
    pub async fn check(&self) -> HealthResponse {
        let mut services = BTreeMap::new();
        let mut all_healthy = true;

        for probe in &self.probes {
            let name = probe.backend().service_name();
            let state = match probe.health_check().await {
                Ok(()) => HEALTHY,
                Err(e) => {
                    log::error!("❌ {} 상태 점검 실패: {}", name, e);
                    all_healthy = false;
                    UNHEALTHY
                }
            };
            services.insert(name.to_string(), state.to_string());
        }

        HealthResponse {
            status: if all_healthy { HEALTHY } else { UNHEALTHY }.to_string(),
            timestamp: Utc::now(),
            services,
            version: SERVICE_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewUser, User, UserId};
    use crate::domain::models::pagination::PageRequest;
    use crate::errors::{AppError, AppResult};
    use crate::repositories::users::Backend;
    use async_trait::async_trait;

    struct Probe {
        backend: Backend,
        up: bool,
    }

    #[async_trait]
    impl UserStore for Probe {
        fn backend(&self) -> Backend {
            self.backend
        }

        async fn find_by_email_or_username(&self, _: &str, _: &str) -> AppResult<Option<User>> {
            Ok(None)
        }

        async fn find_by_email(&self, _: &str) -> AppResult<Option<User>> {
            Ok(None)
        }

        async fn find_by_id(&self, _: &UserId) -> AppResult<Option<User>> {
            Ok(None)
        }

        async fn insert(&self, user: NewUser) -> AppResult<User> {
            Ok(user.with_id(UserId::Relational(1)))
        }

        async fn update(&self, user: &User) -> AppResult<User> {
            Ok(user.clone())
        }

        async fn list_page(&self, _: &PageRequest) -> AppResult<(Vec<User>, u64)> {
            Ok((Vec::new(), 0))
        }

        async fn health_check(&self) -> AppResult<()> {
            if self.up {
                Ok(())
            } else {
                Err(AppError::DatabaseError("connection refused".to_string()))
            }
        }
    }

    fn probe(backend: Backend, up: bool) -> Arc<dyn UserStore> {
        Arc::new(Probe { backend, up })
    }

    #[actix_web::test]
    async fn test_all_probes_healthy() {
        let service = HealthService::new(vec![probe(Backend::Postgres, true), probe(Backend::MongoDb, true)]);
        let report = service.check().await;

        assert!(report.is_healthy());
        assert_eq!(report.version, "1.0.0");
        assert_eq!(report.services["postgresql"], "healthy");
        assert_eq!(report.services["mongodb"], "healthy");
    }

    #[actix_web::test]
    async fn test_one_failing_probe_marks_report_unhealthy() {
        let service = HealthService::new(vec![probe(Backend::Postgres, true), probe(Backend::MongoDb, false)]);
        let report = service.check().await;

        assert!(!report.is_healthy());
        assert_eq!(report.status, "unhealthy");
        assert_eq!(report.services["postgresql"], "healthy");
        assert_eq!(report.services["mongodb"], "unhealthy");
    }
}
