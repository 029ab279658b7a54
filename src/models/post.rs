use crate::dto::PostResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A blog post as it is stored in the `blogposts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Post {
    /// Builds a fresh post with a new id, stamped with the current time.
    pub fn new(title: String, content: String, author: Author) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            author,
            created_at: Utc::now(),
        }
    }

    /// External shape of a post: the author collapses to a display name and
    /// the creation time is left out.
    pub fn api_response(&self) -> PostResponse {
        PostResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.full_name(),
        }
    }
}

/// The fields an update is allowed to touch. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }

    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(first_name) = &self.first_name {
            post.author.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            post.author.last_name = last_name.clone();
        }
    }
}
