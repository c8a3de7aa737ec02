//! Local-disk photo storage.
//!
//! Stored names are `<uuid-v7>_<sanitized client name>`; they are unique,
//! sort by upload time and never contain path separators.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use paddock_core::error::CoreError;
use paddock_core::store::{PhotoStore, PhotoUpload};
use uuid::Uuid;

/// Image extensions accepted for task photos.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Whether a client-supplied name has an accepted image extension.
pub fn is_allowed_image(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// Reduce a client-supplied name to a safe single path segment.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "photo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Photos kept as plain files under one directory.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
}

impl LocalPhotoStore {
    /// Use `root`, creating it if needed.
    pub async fn create(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, CoreError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename.starts_with('.')
        {
            return Err(CoreError::Validation(format!(
                "Invalid photo filename '{filename}'"
            )));
        }
        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn save(
        &self,
        task_index: usize,
        uploads: Vec<PhotoUpload>,
    ) -> Result<Vec<String>, CoreError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            if !is_allowed_image(&upload.file_name) {
                tracing::debug!(
                    task_index,
                    file_name = %upload.file_name,
                    "Skipping upload with unsupported extension",
                );
                continue;
            }

            let name = format!(
                "{}_{}",
                Uuid::now_v7().simple(),
                sanitize_file_name(&upload.file_name)
            );
            let path = self.path_for(&name)?;
            tokio::fs::write(&path, &upload.bytes)
                .await
                .map_err(|e| CoreError::Storage(format!("Failed to write {name}: {e}")))?;

            tracing::debug!(task_index, file = %name, bytes = upload.bytes.len(), "Stored photo");
            stored.push(name);
        }

        Ok(stored)
    }

    async fn delete(&self, filename: &str) -> Result<(), CoreError> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Storage(format!(
                "Failed to delete {filename}: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_image("cow.JPG"));
        assert!(is_allowed_image("goat.jpeg"));
        assert!(is_allowed_image("feed.gif"));
        assert!(!is_allowed_image("notes.txt"));
        assert!(!is_allowed_image("png"));
        assert!(!is_allowed_image(".png"));
    }

    #[test]
    fn test_sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\pics\\my cow.png"), "my_cow.png");
        assert_eq!(sanitize_file_name("...hidden.png"), "hidden.png");
        assert_eq!(sanitize_file_name(""), "photo");
    }

    #[tokio::test]
    async fn test_save_skips_disallowed_and_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPhotoStore::create(dir.path()).await.unwrap();

        let stored = store
            .save(
                2,
                vec![
                    PhotoUpload {
                        file_name: "trough.png".into(),
                        bytes: vec![1, 2, 3],
                    },
                    PhotoUpload {
                        file_name: "readme.txt".into(),
                        bytes: vec![4],
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 1);
        assert!(stored[0].ends_with("_trough.png"));
        let path = dir.path().join(&stored[0]);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), vec![1, 2, 3]);

        store.delete(&stored[0]).await.unwrap();
        assert!(!path.exists());
        store.delete(&stored[0]).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPhotoStore::create(dir.path()).await.unwrap();
        assert!(matches!(
            store.delete("../secret.png").await,
            Err(CoreError::Validation(_))
        ));
    }
}
