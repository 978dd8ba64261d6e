//! S3 호환 오브젝트 스토리지 서비스
//!
//! 버킷의 virtual-hosted 엔드포인트(`{bucket}.s3.{region}.amazonaws.com`)에
//! Signature V4로 서명한 `PUT`/`DELETE`를 보냅니다. 업로드한 객체는
//! `public-read` ACL로 공개됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::OnceCell;
use reqwest::Method;

use crate::config::StorageConfig;
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::entities::media::StoredObject;
use crate::errors::{AppError, AppResult};
use crate::services::integrations::sigv4::{sha256_hex, SigV4Signer, SignableRequest};

static STORAGE_SERVICE: OnceCell<Arc<StorageService>> = OnceCell::new();

pub struct StorageService {
    http: Arc<reqwest::Client>,
}

impl StorageService {
    pub fn instance() -> Arc<Self> {
        STORAGE_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    http: ServiceLocator::get::<reqwest::Client>(),
                })
            })
            .clone()
    }

    pub fn bucket_host(bucket: &str, region: &str) -> String {
        format!("{}.s3.{}.amazonaws.com", bucket, region)
    }

    /// 새 객체 키 `<uuid>.<ext>`
    pub fn object_key(extension: &str) -> String {
        let extension: String = extension
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        if extension.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            format!("{}.{}", uuid::Uuid::new_v4(), extension)
        }
    }

    /// 바이트를 업로드하고 저장 위치를 반환합니다.
    pub async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<StoredObject> {
        let bucket = StorageConfig::bucket();
        let region = StorageConfig::region();
        let host = Self::bucket_host(&bucket, &region);
        let payload_hash = sha256_hex(&bytes);

        let headers = vec![
            ("content-type".to_string(), content_type.to_string()),
            ("x-amz-acl".to_string(), "public-read".to_string()),
            ("x-amz-content-sha256".to_string(), payload_hash.clone()),
        ];

        let response = self
            .send(Method::PUT, &host, key, &region, headers, payload_hash, bytes)
            .await?;

        let etag = response
            .headers()
            .get("etag")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let stored = StoredObject {
            location: format!("https://{}/{}", host, key),
            bucket,
            key: key.to_string(),
            etag,
        };

        info!("✅ 오브젝트 업로드 완료: {}", stored.location);
        Ok(stored)
    }

    /// 객체를 삭제합니다. 설정된 버킷이 아닌 객체는 거부합니다.
    pub async fn delete(&self, object: &StoredObject) -> AppResult<()> {
        let bucket = StorageConfig::bucket();
        if object.bucket != bucket {
            return Err(AppError::ValidationError(format!(
                "허용되지 않은 버킷입니다: {}",
                object.bucket
            )));
        }

        let region = StorageConfig::region();
        let host = Self::bucket_host(&bucket, &region);
        let payload_hash = sha256_hex(b"");
        let headers = vec![("x-amz-content-sha256".to_string(), payload_hash.clone())];

        self.send(Method::DELETE, &host, &object.key, &region, headers, payload_hash, Vec::new())
            .await?;

        info!("🗑️ 오브젝트 삭제 완료: {}/{}", bucket, object.key);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn send(
        &self,
        method: Method,
        host: &str,
        key: &str,
        region: &str,
        headers: Vec<(String, String)>,
        payload_hash: String,
        body: Vec<u8>,
    ) -> AppResult<reqwest::Response> {
        let credentials = StorageConfig::credentials()?;
        let signer = SigV4Signer::new(&credentials, region, "s3");

        let signable = SignableRequest {
            method: method.as_str().to_string(),
            host: host.to_string(),
            path: format!("/{}", key),
            query: Vec::new(),
            headers,
            payload_hash,
        };
        let auth_headers = signer.sign(&signable, Utc::now())?;

        let url = format!("https://{}{}", host, super::sigv4::uri_encode(&signable.path, false));
        let mut request = self.http.request(method, &url).body(body);
        for (name, value) in signable.headers.iter().chain(auth_headers.iter()) {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("스토리지 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ 스토리지 응답 오류 {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "스토리지 요청 실패 ({})",
                status
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl Service for StorageService {
    fn name(&self) -> &str {
        "storage"
    }
}

fn construct_storage_service() -> Arc<dyn Service> {
    StorageService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "storage_service",
        constructor: construct_storage_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_has_extension() {
        let key = StorageService::object_key("png");

        assert!(key.ends_with(".png"));
        assert_eq!(key.len(), 36 + 4);
    }

    #[test]
    fn test_object_key_sanitizes_extension() {
        assert!(StorageService::object_key("../MP4").ends_with(".mp4"));
        assert!(!StorageService::object_key("").contains('.'));
    }

    #[test]
    fn test_bucket_host() {
        assert_eq!(
            StorageService::bucket_host("edemy-bucket", "eu-west-1"),
            "edemy-bucket.s3.eu-west-1.amazonaws.com"
        );
    }
}
