use super::{PostFilter, PostStore, StoreError};
use crate::models::{Post, PostPatch};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;

/// `DashMap` backed store. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<DashMap<String, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        // Sort by creation date (newest first)
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        match self.posts.entry(post.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::Query(format!("duplicate id {}", post.id))),
            Entry::Vacant(slot) => {
                slot.insert(post.clone());
                Ok(post)
            }
        }
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get_mut(id).map(|mut entry| {
            patch.apply(entry.value_mut());
            entry.value().clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.posts.remove(id).is_some())
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
