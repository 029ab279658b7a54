use crate::{
    errors::ApiError,
    models::{Author, Post, PostPatch},
    store::PostFilter,
};
use serde::Deserialize;
use validator::Validate;

/// Every field is optional on the wire so that a missing one can be reported
/// by name instead of failing deserialization wholesale.
#[derive(Debug, Default, Validate, Deserialize)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub author: Option<AuthorRequest>,
}

#[derive(Debug, Default, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Validate, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub author: Option<AuthorRequest>,
}

/// GET /posts query string. Only `title` is filterable.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub title: Option<String>,
}

impl From<ListPostsQuery> for PostFilter {
    fn from(query: ListPostsQuery) -> Self {
        // `?title=` with no value means no filter.
        PostFilter {
            title: query.title.filter(|title| !title.is_empty()),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ApiError::ValidationError(format!(
            "Cannot complete request, missing required field: {}",
            field
        ))
    })
}

fn validate_all(request: &impl Validate, author: Option<&AuthorRequest>) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;
    if let Some(author) = author {
        author
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;
    }
    Ok(())
}

impl CreatePostRequest {
    /// Checks each required field on its own, then builds the post to insert.
    pub fn into_post(self) -> Result<Post, ApiError> {
        validate_all(&self, self.author.as_ref())?;

        let title = required(self.title, "title")?;
        let content = required(self.content, "content")?;
        let author = self.author.unwrap_or_default();
        let first_name = required(author.first_name, "firstName")?;
        let last_name = required(author.last_name, "lastName")?;

        Ok(Post::new(
            title,
            content,
            Author {
                first_name,
                last_name,
            },
        ))
    }
}

impl UpdatePostRequest {
    /// The body id must be present and equal to the id in the path.
    pub fn check_id(&self, path_id: &str) -> Result<(), ApiError> {
        match self.id.as_deref() {
            Some(body_id) if body_id == path_id => Ok(()),
            body_id => Err(ApiError::ValidationError(format!(
                "Id provided in the parameters: {} does not match id provided in the body: {}",
                path_id,
                body_id.unwrap_or("undefined")
            ))),
        }
    }

    pub fn into_patch(self) -> Result<PostPatch, ApiError> {
        validate_all(&self, self.author.as_ref())?;

        let author = self.author.unwrap_or_default();
        Ok(PostPatch {
            title: self.title,
            content: self.content,
            first_name: author.first_name,
            last_name: author.last_name,
        })
    }
}
