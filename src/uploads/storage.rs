use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload not found")]
    NotFound,
    #[error("unsupported content type '{0}', only images are accepted")]
    UnsupportedType(String),
    #[error("file size ({size} bytes) exceeds maximum allowed size ({max} bytes)")]
    TooLarge { size: usize, max: usize },
    #[error("file is empty")]
    Empty,
    #[error("invalid upload name")]
    InvalidName,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    fn from_io(e: std::io::Error) -> Self {
        if e.kind() == ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub name: String,
    pub url: String,
    pub size: usize,
}

/// Image blobs on the local filesystem under `<data_dir>/uploads`.
pub struct UploadStorage {
    base_path: PathBuf,
}

impl UploadStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            base_path: data_dir.join("uploads"),
        }
    }

    fn object_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(Uuid::new_v4().to_string())
    }

    pub async fn put(
        &self,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        if !content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedType(content_type.to_string()));
        }
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: data.len(),
                max: MAX_UPLOAD_BYTES,
            });
        }

        let temp_path = self.temp_path();
        let committed = self.commit(&temp_path, original_name, data).await;
        if committed.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        let name = committed?;

        Ok(StoredUpload {
            url: format!("{UPLOAD_URL_PREFIX}/{name}"),
            size: data.len(),
            name,
        })
    }

    /// Writes `data` to `temp_path`, then renames it to a fresh object name.
    async fn commit(
        &self,
        temp_path: &Path,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, UploadError> {
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut temp_file = File::create(temp_path).await?;
        temp_file.write_all(data).await?;
        temp_file.sync_all().await?;

        let sanitized = sanitize_file_name(original_name);
        let mut stamp = Utc::now().timestamp_millis();
        let mut name = format!("{stamp}-{sanitized}");
        while fs::try_exists(self.object_path(&name)).await? {
            stamp += 1;
            name = format!("{stamp}-{sanitized}");
        }

        fs::rename(temp_path, self.object_path(&name)).await?;
        Ok(name)
    }

    pub async fn get(&self, name: &str) -> Result<(BufReader<File>, u64), UploadError> {
        validate_name(name)?;
        let path = self.object_path(name);
        let file = File::open(&path).await.map_err(UploadError::from_io)?;

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(UploadError::NotFound);
        }

        Ok((BufReader::new(file), metadata.len()))
    }
}

/// Replaces everything outside `[A-Za-z0-9.-]` with `_`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

fn validate_name(name: &str) -> Result<(), UploadError> {
    if name.is_empty() || name.starts_with('.') || sanitize_file_name(name) != name {
        return Err(UploadError::InvalidName);
    }
    Ok(())
}

#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());

        let stored = storage
            .put("my photo.png", "image/png", b"\x89PNG data")
            .await
            .unwrap();

        assert!(stored.name.ends_with("-my_photo.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.name));
        assert_eq!(stored.size, 9);

        let (mut reader, size) = storage.get(&stored.name).await.unwrap();
        assert_eq!(size, 9);

        let mut content = Vec::new();
        reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"\x89PNG data");
    }

    #[tokio::test]
    async fn test_same_name_gets_distinct_objects() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());

        let a = storage.put("a.png", "image/png", b"one").await.unwrap();
        let b = storage.put("a.png", "image/png", b"two").await.unwrap();
        assert_ne!(a.name, b.name);
    }

    #[tokio::test]
    async fn test_rejects_non_images() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());

        assert!(matches!(
            storage.put("notes.txt", "text/plain", b"hi").await,
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            storage.put("empty.png", "image/png", b"").await,
            Err(UploadError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());
        let data = vec![0u8; MAX_UPLOAD_BYTES + 1];

        assert!(matches!(
            storage.put("big.png", "image/png", &data).await,
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_put_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());
        let long_name = format!("{}.png", "a".repeat(300));

        assert!(matches!(
            storage.put(&long_name, "image/png", b"data").await,
            Err(UploadError::Io(_))
        ));

        let mut leftovers = fs::read_dir(temp_dir.path().join("uploads").join(".tmp"))
            .await
            .unwrap();
        assert!(leftovers.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_rejects_traversal_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path());

        assert!(matches!(
            storage.get("../folio.db").await,
            Err(UploadError::InvalidName)
        ));
        assert!(matches!(
            storage.get(".tmp").await,
            Err(UploadError::InvalidName)
        ));
        assert!(matches!(
            storage.get("123-missing.png").await,
            Err(UploadError::NotFound)
        ));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Résumé (1).JPG"), "R_sum___1_.JPG");
        assert_eq!(sanitize_file_name("a/b\\c.png"), "a_b_c.png");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("1-a.PNG"), "image/png");
        assert_eq!(content_type_for("1-a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("1-a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
