//! 사용자 서비스 메인 애플리케이션
//!
//! 설정을 읽고, 활성화된 저장소(PostgreSQL/MongoDB)에 연결한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::io;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use user_service_backend::config::{AppConfig, ServerConfig};
use user_service_backend::middlewares::{
    PanicRecovery, RequestIdMiddleware, RequestTimeout, REQUEST_ID_HEADER,
};
use user_service_backend::routes::configure_all_routes;
use user_service_backend::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();

    let config = AppConfig::from_env();
    init_logging(&config);

    info!("🚀 사용자 서비스 시작중... (environment: {:?})", config.environment);

    if let Err(e) = config.validate() {
        error!("❌ 설정 오류: {}", e);
        return Err(io::Error::other(e.to_string()));
    }

    info!("📡 데이터베이스 연결 중...");
    let state = match AppState::from_config(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("❌ 서비스 초기화 실패: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(config.server, state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 요청은 바깥부터 rate limit → CORS → 접근 로그 → 경로 정규화 →
/// 시간 제한 → 패닉 복구 순서로 처리됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 잘못된 rate limit 설정, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(server: ServerConfig, state: web::Data<AppState>) -> io::Result<()> {
    let bind_address = server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/v1/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(server.rate_limit_per_second)
        .burst_size(server.rate_limit_burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::other("RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST_SIZE must be positive")
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        server.rate_limit_per_second, server.rate_limit_burst_size
    );

    let request_timeout = state.request_timeout;
    let allowed_origins = server.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_all_routes)
            // 마지막에 wrap한 미들웨어가 가장 바깥
            .wrap(PanicRecovery)
            .wrap(RequestTimeout::new(request_timeout))
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(configure_cors(&allowed_origins))
            .wrap(Governor::new(&governor_conf))
            .wrap(RequestIdMiddleware)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전이므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("Current profile: {} ({} 파일 로드 됨)", profile, file),
        Err(e) => eprintln!("Current profile: {} (env 파일 없음: {})", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 있으면 그 값을, 없으면 `LOG_LEVEL` 기반 필터를 사용합니다.
///
/// ```bash
/// LOG_LEVEL=debug cargo run
/// RUST_LOG=user_service_backend::services=debug cargo run
/// ```
fn init_logging(config: &AppConfig) {
    env_logger::init_from_env(Env::default().default_filter_or(config.log_filter()));
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`(쉼표 구분)에서 옵니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .supports_credentials()
        .max_age(3600)
}
