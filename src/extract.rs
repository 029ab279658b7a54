use crate::errors::ApiError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections go through [`ApiError`], so a malformed or
/// mistyped body gets the same `{"message": ...}` 400 as any other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
