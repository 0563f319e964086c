use crate::error::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use utoipa::ToSchema;
use uuid::Uuid;

/// URL prefix under which stored files are served back.
pub const MEDIA_URL_PREFIX: &str = "/media";

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5 MB

#[derive(Clone)]
pub struct UploadConfig {
    pub upload_dir: String,
}

/// What an uploaded image is for; decides where it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Thumbnail,
    ContentImage,
    OgImage,
}

impl UploadKind {
    /// Storage directory relative to the upload root. Article images are
    /// partitioned by year and month.
    fn directory(self, today: NaiveDate) -> String {
        match self {
            UploadKind::Thumbnail => format!(
                "articles/thumbnails/{:04}/{:02}",
                today.year(),
                today.month()
            ),
            UploadKind::ContentImage => format!(
                "articles/content_images/{:04}/{:02}",
                today.year(),
                today.month()
            ),
            UploadKind::OgImage => "seo/og_images".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// Check the file signature against the declared format.
    fn matches(self, data: &[u8]) -> bool {
        match self {
            Self::Jpeg => data.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::Png => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
            Self::Gif => data.starts_with(b"GIF8"),
            Self::Webp => data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        }
    }
}

/// Where a stored file ended up.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredFile {
    /// Path relative to the upload root; this is what article fields store
    pub path: String,
    /// Public URL of the file
    pub url: String,
}

pub fn media_url(path: &str) -> String {
    format!("{}/{}", MEDIA_URL_PREFIX, path.trim_start_matches('/'))
}

pub struct UploadService;

impl UploadService {
    pub async fn save_image(
        config: &UploadConfig,
        kind: UploadKind,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<StoredFile> {
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::PayloadTooLarge);
        }

        let format = ImageFormat::from_content_type(content_type).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported file type: {}. Allowed: jpeg, png, gif, webp",
                content_type
            ))
        })?;

        if !format.matches(data) {
            return Err(AppError::Validation(
                "File content does not match declared content type".to_string(),
            ));
        }

        let subdirectory = kind.directory(chrono::Utc::now().date_naive());
        let filename = format!("{}.{}", Uuid::new_v4(), format.extension());
        let dir = Path::new(&config.upload_dir).join(&subdirectory);

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;
        fs::write(dir.join(&filename), data)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write file: {}", e))?;

        let path = format!("{}/{}", subdirectory, filename);
        tracing::info!(path = %path, bytes = data.len(), "image stored");
        Ok(StoredFile {
            url: media_url(&path),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_signature() {
        assert!(ImageFormat::Jpeg.matches(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]));
    }

    #[test]
    fn png_signature() {
        assert!(ImageFormat::Png.matches(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]));
    }

    #[test]
    fn gif_signature() {
        assert!(ImageFormat::Gif.matches(b"GIF89a"));
    }

    #[test]
    fn webp_signature() {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(b"WEBP");
        assert!(ImageFormat::Webp.matches(&data));
        assert!(!ImageFormat::Webp.matches(b"RIFF"));
    }

    #[test]
    fn mismatched_signature_rejected() {
        assert!(!ImageFormat::Jpeg.matches(&[0x89, 0x50, 0x4E, 0x47]));
        assert!(!ImageFormat::Png.matches(&[]));
    }

    #[test]
    fn unknown_content_type() {
        assert_eq!(ImageFormat::from_content_type("application/pdf"), None);
        assert_eq!(
            ImageFormat::from_content_type("image/webp"),
            Some(ImageFormat::Webp)
        );
    }

    #[test]
    fn directories_are_partitioned_by_month() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            UploadKind::Thumbnail.directory(day),
            "articles/thumbnails/2025/03"
        );
        assert_eq!(
            UploadKind::ContentImage.directory(day),
            "articles/content_images/2025/03"
        );
        assert_eq!(UploadKind::OgImage.directory(day), "seo/og_images");
    }

    #[test]
    fn media_urls() {
        assert_eq!(media_url("seo/og_images/a.png"), "/media/seo/og_images/a.png");
        assert_eq!(media_url("/x.jpg"), "/media/x.jpg");
    }

    #[tokio::test]
    async fn oversized_upload_rejected() {
        let config = UploadConfig {
            upload_dir: std::env::temp_dir().to_string_lossy().into_owned(),
        };
        let data = vec![0xFF; MAX_FILE_SIZE + 1];
        let err = UploadService::save_image(&config, UploadKind::Thumbnail, &data, "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge));
    }

    #[tokio::test]
    async fn stores_under_kind_directory() {
        let root = std::env::temp_dir().join(format!("edebai-upload-{}", Uuid::new_v4()));
        let config = UploadConfig {
            upload_dir: root.to_string_lossy().into_owned(),
        };
        let stored = UploadService::save_image(
            &config,
            UploadKind::OgImage,
            &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            "image/png",
        )
        .await
        .unwrap();

        assert!(stored.path.starts_with("seo/og_images/"));
        assert!(stored.path.ends_with(".png"));
        assert_eq!(stored.url, format!("/media/{}", stored.path));
        assert!(root.join(&stored.path).exists());

        let _ = std::fs::remove_dir_all(root);
    }
}
