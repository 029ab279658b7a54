mod post;

pub use post::{Author, Post, PostPatch};
