//! MongoDB 연결 관리 모듈

use log::info;
use mongodb::{options::ClientOptions, Client};

use crate::config::DatabaseConfig;
use crate::errors::{AppResult, ErrorContext};

/// MongoDB 클라이언트와 사용할 데이터베이스 이름을 묶은 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI`로 접속하고 `ping`으로 연결을 확인합니다.
    pub async fn new() -> AppResult<Self> {
        let mongodb_uri = DatabaseConfig::uri();
        let database_name = DatabaseConfig::name();

        let mut client_options = ClientOptions::parse(&mongodb_uri)
            .await
            .context("MONGODB_URI 파싱 실패")?;
        client_options.app_name = Some("edemy_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
