// ============================================================================
// BLOG POSTS REST API
// ============================================================================

// - List, fetch, create, update and delete blog posts
// - MongoDB storage, with an in-memory backend for tests
// - Input validation
// - Proper error handling
// - Structured logging

pub mod app;
pub mod config;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod models;
pub mod routes;
pub mod states;
pub mod store;

pub use app::{Application, ServerError, router};
pub use config::Config;
pub use states::AppState;
