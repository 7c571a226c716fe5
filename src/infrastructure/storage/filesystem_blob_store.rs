use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::invoice::{BlobId, BlobStore, StoreError};

const METADATA_EXTENSION: &str = "meta.json";

/// Name and media type a document was stored with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
  pub name: String,
  pub content_type: String,
}

/// Documents stored as files named after their SHA-256 digest.
///
/// Layout: `<root>/<first two hex digits>/<digest>`, with the name and media
/// type in `<digest>.meta.json` next to it. Writes go to a temporary file
/// first and are renamed into place, so readers never see partial files.
pub struct FilesystemBlobStore {
  root: PathBuf,
}

impl FilesystemBlobStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Metadata recorded when the blob was first stored.
  pub async fn metadata(&self, id: &BlobId) -> Result<Option<BlobMetadata>, StoreError> {
    let path = self.metadata_path_for(id);
    let raw = match fs::read(&path).await {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(io_error("read", &path, e)),
    };
    serde_json::from_slice(&raw)
      .map(Some)
      .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))
  }

  fn path_for(&self, id: &BlobId) -> PathBuf {
    self.root.join(&id.value()[..2]).join(id.value())
  }

  fn metadata_path_for(&self, id: &BlobId) -> PathBuf {
    self.path_for(id).with_extension(METADATA_EXTENSION)
  }
}

fn io_error(action: &str, path: &Path, error: std::io::Error) -> StoreError {
  StoreError::ConnectionFailed(format!("{} {}: {}", action, path.display(), error))
}

async fn exists(path: &Path) -> bool {
  fs::try_exists(path).await.unwrap_or(false)
}

/// Writes `bytes` to a staging file beside `path` and renames it into place.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir)
      .await
      .map_err(|e| io_error("create", dir, e))?;
  }

  let staging = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
  fs::write(&staging, bytes)
    .await
    .map_err(|e| io_error("write", &staging, e))?;
  if let Err(e) = fs::rename(&staging, path).await {
    let _ = fs::remove_file(&staging).await;
    return Err(io_error("rename", path, e));
  }
  Ok(())
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
  async fn put(
    &self,
    name: &str,
    bytes: Vec<u8>,
    content_type: &str,
  ) -> Result<BlobId, StoreError> {
    let id = BlobId::for_content(&bytes);

    let metadata_path = self.metadata_path_for(&id);
    if !exists(&metadata_path).await {
      let metadata = BlobMetadata {
        name: name.to_string(),
        content_type: content_type.to_string(),
      };
      let raw = serde_json::to_vec(&metadata)
        .map_err(|e| StoreError::Corrupt(format!("metadata for {}: {}", id, e)))?;
      write_atomically(&metadata_path, &raw).await?;
    }

    let path = self.path_for(&id);
    if exists(&path).await {
      tracing::debug!(blob_id = %id, name, "Blob already stored");
      return Ok(id);
    }
    write_atomically(&path, &bytes).await?;

    tracing::debug!(
      blob_id = %id,
      name,
      content_type,
      size = bytes.len(),
      "Blob stored"
    );
    Ok(id)
  }

  async fn get(&self, id: &BlobId) -> Result<Option<Vec<u8>>, StoreError> {
    let path = self.path_for(id);
    match fs::read(&path).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(io_error("read", &path, e)),
    }
  }
}
