//! 애플리케이션 공유 상태
//!
//! 시작 시 한 번 조립되어 `web::Data<AppState>`로 모든 워커에 공유됩니다.
//! 요청 처리 중에는 읽기만 하므로 락이 없습니다.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::config::AppConfig;
use crate::db::{connect_mongo, connect_postgres};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{MongoUserRepository, PostgresUserRepository, UserStore};
use crate::services::auth::{PasswordService, TokenService};
use crate::services::health::HealthService;
use crate::services::users::UserService;
use crate::utils::localizer::Localizer;

pub struct AppState {
    pub user_service: UserService,
    pub health_service: HealthService,
    pub token_service: TokenService,
    pub localizer: Localizer,
    pub request_timeout: Duration,
}

impl AppState {
    /// 이미 준비된 저장소로 상태를 조립합니다.
    ///
    /// `store`는 사용자 연산에 쓰이고, `probes`는 헬스 체크 대상입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 잘못된 bcrypt cost
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn UserStore>,
        probes: Vec<Arc<dyn UserStore>>,
    ) -> AppResult<Self> {
        let passwords = PasswordService::new(&config.password)?;
        let tokens = TokenService::new(&config.jwt);

        let localizer = Localizer::new(config.default_language.clone());
        if !localizer.supports(localizer.default_language()) {
            warn!(
                "⚠️ 지원하지 않는 기본 언어 '{}', 번역은 '{}'로 대체됩니다",
                config.default_language,
                Localizer::FALLBACK_LANGUAGE
            );
        }

        Ok(Self {
            user_service: UserService::new(store, passwords, tokens.clone()),
            health_service: HealthService::new(probes),
            token_service: tokens,
            localizer,
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        })
    }

    /// 활성화된 저장소에 연결하고 상태를 조립합니다.
    ///
    /// 둘 다 활성화되어 있으면 PostgreSQL이 사용자 저장소가 되고,
    /// MongoDB는 헬스 체크에만 참여합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 활성화된 저장소 연결 또는 스키마 준비 실패
    /// * `AppError::InternalError` - 활성화된 저장소가 없음
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let mut probes: Vec<Arc<dyn UserStore>> = Vec::new();

        if config.postgres.enabled {
            let pool = connect_postgres(&config.postgres).await?;
            let repo = PostgresUserRepository::new(pool);
            repo.ensure_schema().await?;
            probes.push(Arc::new(repo));
        }

        if config.mongodb.enabled {
            let database = connect_mongo(&config.mongodb).await?;
            let repo = MongoUserRepository::new(database);
            repo.create_indexes().await?;
            probes.push(Arc::new(repo));
        }

        let store = probes
            .first()
            .cloned()
            .ok_or_else(|| AppError::InternalError("no user store is enabled".to_string()))?;

        info!("✅ 사용자 저장소: {}", store.backend());
        Self::new(config, store, probes)
    }
}
