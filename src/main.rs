//! Edemy 강의 마켓플레이스 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결과 외부 연동용 HTTP 클라이언트를 준비한 뒤
//! 쿠키 기반 JWT 인증 REST API를 제공합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use edemy_backend::caching::redis::RedisClient;
use edemy_backend::config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
use edemy_backend::core::registry::ServiceLocator;
use edemy_backend::db::Database;
use edemy_backend::errors::AppError;
use edemy_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 Edemy 백엔드 시작중...");

    JwtConfig::secret().map_err(to_io_error)?;

    let (database, redis_client) = initialize_data_stores().await.map_err(to_io_error)?;
    let http_client = build_http_client().map_err(to_io_error)?;

    // ServiceLocator에 인프라 핸들 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(http_client);

    ServiceLocator::initialize_all().await.map_err(to_io_error)?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

fn to_io_error(e: AppError) -> io::Error {
    error!("❌ 시작 실패: {}", e);
    io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate limiting, CORS, 접근 로그, 경로 정규화 미들웨어를 적용합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let json_limit = ServerConfig::json_limit_bytes();

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> Result<(Arc<Database>, Arc<RedisClient>), AppError> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await?);
    info!("✅ MongoDB 연결 성공");

    let redis_client = Arc::new(RedisClient::new().await?);
    info!("✅ Redis 연결 성공");

    Ok((database, redis_client))
}

/// 스토리지, 이메일, 결제 연동이 함께 쓰는 HTTP 클라이언트
fn build_http_client() -> Result<Arc<reqwest::Client>, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

    Ok(Arc::new(client))
}

/// CORS 설정 (`CLIENT_ORIGIN` 목록, 쿠키 인증을 위해 credentials 허용)
fn configure_cors() -> Cors {
    let cors = CorsConfig::allowed_origins()
        .into_iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(&origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-csrf-token"),
        ])
        .supports_credentials()
        .max_age(3600)
}
