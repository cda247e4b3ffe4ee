//! Asset records consumed by the share link manager

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Asset metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Stored file, if one has been uploaded
    pub file: Option<AssetFile>,
}

/// File backing an asset in object storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    /// Object storage key
    pub storage_key: String,
    /// Original filename
    pub file_name: String,
    /// MIME content type
    pub content_type: Option<String>,
    /// Size in bytes
    pub size_bytes: Option<u64>,
}

impl Asset {
    /// Create an asset without a file
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            file: None,
        }
    }

    /// Attach a stored file
    pub fn with_file(mut self, file: AssetFile) -> Self {
        self.file = Some(file);
        self
    }
}

impl AssetFile {
    pub fn new(storage_key: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            file_name: file_name.into(),
            content_type: None,
            size_bytes: None,
        }
    }
}
