mod requests;
mod responses;

pub use requests::{AuthorRequest, CreatePostRequest, ListPostsQuery, UpdatePostRequest};
pub use responses::{PostListResponse, PostResponse};
