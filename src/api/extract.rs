//! Body and query extractors that reject with an [`ErrorMessage`] body.

use super::error::ErrorMessage;
use axum::extract::{FromRequest, FromRequestParts, Query};

/// `axum::Json` with JSON error bodies on rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ErrorMessage))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with JSON error bodies on rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ErrorMessage))]
pub struct ApiQuery<T>(pub T);
