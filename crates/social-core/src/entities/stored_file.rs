//! Stored file - a binary object in the upload store

use chrono::{DateTime, Utc};

/// Binary object addressed by its unique filename
#[derive(Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn new(filename: String, content_type: String, data: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            data,
            uploaded_at: Utc::now(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Keep the payload out of logs
impl std::fmt::Debug for StoredFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .field("uploaded_at", &self.uploaded_at)
            .finish()
    }
}
