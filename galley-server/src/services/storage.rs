//! Upload file storage
//!
//! Files land under `<work_dir>/uploads/`; images are re-encoded to JPEG
//! before storage. Content-hash rows in `upload_file` deduplicate repeat
//! uploads: the same bytes always answer with the first stored file.

use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::db::repository::upload;
use shared::error::{AppError, AppResult};
use shared::models::UploadFile;

/// Maximum accepted upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Image formats accepted by the image endpoint
const SUPPORTED_IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: work_dir.into().join("uploads"),
        }
    }

    /// Store an uploaded image: validate, re-encode to JPEG, dedup by hash
    pub async fn save_image(
        &self,
        pool: &SqlitePool,
        original_name: &str,
        data: Vec<u8>,
    ) -> AppResult<UploadFile> {
        validate_size(&data)?;
        let ext = extension_of(original_name)?;
        if !SUPPORTED_IMAGE_FORMATS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported image format '{ext}'. Supported: {}",
                SUPPORTED_IMAGE_FORMATS.join(", ")
            )));
        }

        let compressed = compress_to_jpeg(&data)?;
        self.store(pool, original_name, compressed, "jpg", "images")
            .await
    }

    /// Store an arbitrary uploaded file without transformation
    pub async fn save_file(
        &self,
        pool: &SqlitePool,
        original_name: &str,
        data: Vec<u8>,
    ) -> AppResult<UploadFile> {
        validate_size(&data)?;
        let ext = extension_of(original_name)?;
        self.store(pool, original_name, data, &ext, "files").await
    }

    async fn store(
        &self,
        pool: &SqlitePool,
        original_name: &str,
        data: Vec<u8>,
        format: &str,
        subdir: &str,
    ) -> AppResult<UploadFile> {
        let hash = hex::encode(Sha256::digest(&data));

        if let Some(existing) = upload::find_by_hash(pool, &hash).await.map_err(AppError::from)? {
            tracing::info!(
                original_name,
                stored = %existing.stored_name,
                "Duplicate upload, answering with the existing file"
            );
            return Ok(existing);
        }

        let dir = self.root.join(subdir);
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::storage(format!("Failed to create upload dir: {e}")))?;

        let stored_name = format!("{}.{format}", uuid::Uuid::new_v4());
        let path = dir.join(&stored_name);
        std::fs::write(&path, &data)
            .map_err(|e| AppError::storage(format!("Failed to save file: {e}")))?;

        let url = format!("/api/uploads/{subdir}/{stored_name}");
        let record = upload::insert(
            pool,
            original_name,
            &stored_name,
            &hash,
            data.len() as i64,
            format,
            &url,
        )
        .await
        .map_err(AppError::from)?;

        tracing::info!(
            original_name,
            stored = %record.stored_name,
            size = record.size,
            "File stored"
        );
        Ok(record)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn validate_size(data: &[u8]) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }
    Ok(())
}

fn extension_of(filename: &str) -> AppResult<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {filename}")))
}

/// Decode whatever came in and re-encode as JPEG
fn compress_to_jpeg(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| AppError::storage(format!("Failed to compress image: {e}")))?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.PNG").unwrap(), "png");
        assert_eq!(extension_of("menu.v2.jpeg").unwrap(), "jpeg");
        assert!(extension_of("noext").is_err());
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(&[]).is_err());
        assert!(validate_size(&[0u8; 16]).is_ok());
        assert!(validate_size(&vec![0u8; MAX_FILE_SIZE + 1]).is_err());
    }

    #[test]
    fn test_compress_rejects_garbage() {
        assert!(compress_to_jpeg(b"definitely not an image").is_err());
    }

    #[tokio::test]
    async fn test_save_file_dedups_by_content_hash() {
        let db = crate::db::DbService::new_in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let first = storage
            .save_file(&db.pool, "menu.pdf", b"same bytes".to_vec())
            .await
            .unwrap();
        let second = storage
            .save_file(&db.pool, "copy-of-menu.pdf", b"same bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.stored_name, second.stored_name);
        assert!(dir.path().join("uploads/files").join(&first.stored_name).exists());
    }

    #[test]
    fn test_compress_roundtrips_a_real_image() {
        let mut png = Vec::new();
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 40]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let jpeg = compress_to_jpeg(&png).unwrap();
        assert!(image::load_from_memory(&jpeg).is_ok());
    }
}
