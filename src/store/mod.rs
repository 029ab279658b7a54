//! Storage for posts.
//!
//! Handlers only see [`PostStore`]. Production runs against MongoDB; the
//! in-memory backend backs tests and `memory://` URLs.

mod memory;
mod mongo;

pub use memory::MemoryPostStore;
pub use mongo::MongoPostStore;

use crate::models::{Post, PostPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

/// Exact-match filter for listing. An empty filter matches every post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub title: Option<String>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.title.as_deref().is_none_or(|title| post.title == title)
    }
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    async fn insert(&self, post: Post) -> Result<Post, StoreError>;

    /// Merges `patch` into the stored post. `Ok(None)` when no post has `id`.
    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Returns whether a post was actually removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn close(&self) -> Result<(), StoreError>;
}

/// Opens the backend named by the URL scheme.
pub async fn connect(url: &str) -> Result<Arc<dyn PostStore>, StoreError> {
    if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
        Ok(Arc::new(MongoPostStore::connect(url).await?))
    } else if url.starts_with("memory://") {
        Ok(Arc::new(MemoryPostStore::new()))
    } else {
        Err(StoreError::Connection(format!(
            "unsupported database url: {}",
            url
        )))
    }
}
