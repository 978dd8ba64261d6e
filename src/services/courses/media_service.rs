//! 강의 이미지와 레슨 동영상 업로드/삭제
//!
//! 이미지는 JSON 본문의 base64 data URL로, 동영상은 요청 본문 그대로
//! (`Content-Type: video/<ext>`) 받습니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::core::registry::{Service, ServiceRegistration};
use crate::domain::dto::courses::UploadImageRequest;
use crate::domain::entities::media::StoredObject;
use crate::errors::{AppError, AppResult};
use crate::services::courses::course_service::ensure_same_instructor;
use crate::services::integrations::StorageService;
use crate::utils::string_utils::parse_data_url;

static MEDIA_SERVICE: OnceCell<Arc<MediaService>> = OnceCell::new();

pub struct MediaService {
    storage: Arc<StorageService>,
}

/// `video/mp4` → `mp4`. 동영상 타입이 아니면 400.
pub fn video_extension(content_type: &str) -> AppResult<String> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    match mime.strip_prefix("video/") {
        Some(ext) if !ext.is_empty() => Ok(ext.to_string()),
        _ => Err(AppError::ValidationError(format!(
            "동영상 형식이 아닙니다: {}",
            content_type
        ))),
    }
}

impl MediaService {
    pub fn instance() -> Arc<Self> {
        MEDIA_SERVICE
            .get_or_init(|| {
                Arc::new(Self {
                    storage: StorageService::instance(),
                })
            })
            .clone()
    }

    pub async fn upload_image(&self, request: UploadImageRequest) -> AppResult<StoredObject> {
        let raw = request
            .image
            .filter(|image| !image.trim().is_empty())
            .ok_or_else(|| AppError::ValidationError("Please provide an image.".to_string()))?;

        let data = parse_data_url(&raw)?;
        if !data.mime_type.starts_with("image/") {
            return Err(AppError::ValidationError(format!(
                "이미지 형식이 아닙니다: {}",
                data.mime_type
            )));
        }

        let key = StorageService::object_key(data.extension());
        let content_type = data.mime_type.clone();
        let stored = self.storage.upload(&key, data.bytes, &content_type).await?;

        info!("🖼️ 강의 이미지 업로드: {}", stored.key);
        Ok(stored)
    }

    pub async fn remove_image(&self, image: &StoredObject) -> AppResult<()> {
        self.storage.delete(image).await
    }

    /// 경로의 강사 id가 호출자와 같을 때만 동영상을 올립니다.
    pub async fn upload_video(
        &self,
        instructor_param: &ObjectId,
        user_id: &ObjectId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredObject> {
        ensure_same_instructor(instructor_param, user_id)?;
        if bytes.is_empty() {
            return Err(AppError::ValidationError("Please provide a video.".to_string()));
        }

        let extension = video_extension(content_type)?;
        let key = StorageService::object_key(&extension);
        let size = bytes.len();
        let stored = self
            .storage
            .upload(&key, bytes, &format!("video/{}", extension))
            .await?;

        info!("🎬 동영상 업로드: {} ({} bytes)", stored.key, size);
        Ok(stored)
    }

    pub async fn remove_video(
        &self,
        instructor_param: &ObjectId,
        user_id: &ObjectId,
        video: &StoredObject,
    ) -> AppResult<()> {
        ensure_same_instructor(instructor_param, user_id)?;

        self.storage.delete(video).await
    }
}

#[async_trait]
impl Service for MediaService {
    fn name(&self) -> &str {
        "media"
    }
}

fn construct_media_service() -> Arc<dyn Service> {
    MediaService::instance()
}

inventory::submit! {
    ServiceRegistration {
        name: "media_service",
        constructor: construct_media_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extension() {
        assert_eq!(video_extension("video/mp4").unwrap(), "mp4");
        assert_eq!(video_extension("Video/WebM; codecs=vp9").unwrap(), "webm");
    }

    #[test]
    fn test_video_extension_rejects_other_types() {
        assert!(matches!(
            video_extension("image/png"),
            Err(AppError::ValidationError(_))
        ));
        assert!(video_extension("video/").is_err());
        assert!(video_extension("").is_err());
    }
}
