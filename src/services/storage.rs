use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

/// Upload cap for service images.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// File extension for the accepted image MIME types; anything else is
/// rejected before reaching the store.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores the bytes under `key` and returns a public URL.
    async fn put(&self, key: &str, bytes: &[u8], mime: &str) -> anyhow::Result<String>;

    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Local-disk store serving files under `/uploads/{key}`. Stands in for
/// the object-storage vendor, which is an external collaborator with
/// exactly this contract.
pub struct LocalDiskStore {
    root: PathBuf,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStore for LocalDiskStore {
    async fn put(&self, key: &str, bytes: &[u8], _mime: &str) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("failed to create upload directory")?;

        let path = self.root.join(key);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write upload: {key}"))?;

        Ok(format!("/uploads/{key}"))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.root.join(key);
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("failed to delete upload: {key}"))?;
        Ok(())
    }
}
