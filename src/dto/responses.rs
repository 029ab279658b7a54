use crate::models::Post;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        post.api_response()
    }
}

/// GET /posts wrapper
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}
