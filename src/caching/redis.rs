//! Redis 읽기 캐시 클라이언트
//!
//! 값은 JSON 문자열로 저장합니다. 리포지토리는 이 클라이언트의 실패를
//! 경고 로그로만 남기고 데이터베이스 결과를 그대로 사용합니다.
//!
//! 연결은 시작 시 만든 `ConnectionManager` 하나를 복제해 쓰며, 끊기면
//! 매니저가 다시 연결합니다.

use log::info;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CacheConfig;
use crate::errors::AppResult;

#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL`로 접속하고 `PING`으로 연결을 확인합니다.
    pub async fn new() -> AppResult<Self> {
        let client = Client::open(CacheConfig::redis_url())?;

        let mut connection = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<()>(&mut connection).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization failed",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization failed",
                e.to_string(),
            ))
        })?;
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection.clone();
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection.clone();
        conn.del(keys).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shared_handle<T: Clone + Send + Sync + 'static>() {}

    #[test]
    fn test_client_is_a_shared_connection_handle() {
        assert_shared_handle::<ConnectionManager>();
        assert_shared_handle::<RedisClient>();
    }
}
