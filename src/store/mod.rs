pub mod naming;
pub mod sqlite;
pub mod supabase;

pub use naming::*;
pub use sqlite::*;
pub use supabase::*;

use std::path::Path;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::projects::{Project, ProjectFields};

/// Binary image picked by the user, before upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }
}

/// Content type guessed from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Record and blob access for projects.
///
/// This is the only network-facing seam. Implementations map each call 1:1
/// onto the backend; nothing is cached or retried.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Whole table, no filter or pagination.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// `Ok(None)` when no record has this id.
    async fn get_project(&self, id: &str) -> Result<Option<Project>, StoreError>;

    /// Persists a new record and returns it with its assigned id.
    async fn insert_project(&self, draft: &ProjectFields) -> Result<Project, StoreError>;

    /// Overwrites every column of the record. Not a merge.
    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<(), StoreError>;

    async fn delete_project(&self, id: &str) -> Result<(), StoreError>;

    /// Stores the blob under a generated key and returns its public URL.
    async fn upload_image(&self, file: &ImageUpload) -> Result<String, StoreError>;
}
