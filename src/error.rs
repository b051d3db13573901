//! Error types for the Eat Rate Love client
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use std::fmt;

use thiserror::Error;

/// Logical backend operation, used to label normalized request failures.
///
/// Every HTTP call made by [`crate::api::ApiClient`] belongs to exactly one
/// operation. When a call fails, the operation's fixed message is the only
/// detail that reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    AnalyzeSentiment,
    Signup,
    Login,
    CurrentUser,
    CreatePost,
    Feed,
    UploadMedia,
    SearchRestaurants,
    UploadReview,
    ListReviews,
}

impl ApiOperation {
    /// Human-readable failure message shown to the user.
    pub fn failure_message(self) -> &'static str {
        match self {
            ApiOperation::AnalyzeSentiment => "Sentiment request failed",
            ApiOperation::Signup => "Signup failed",
            ApiOperation::Login => "Login failed",
            ApiOperation::CurrentUser => "Unauthorized",
            ApiOperation::CreatePost => "Create post failed",
            ApiOperation::Feed => "Feed fetch failed",
            ApiOperation::UploadMedia => "Image upload failed",
            ApiOperation::SearchRestaurants => "Restaurant search failed",
            ApiOperation::UploadReview => "Upload review failed",
            ApiOperation::ListReviews => "List reviews failed",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiOperation::AnalyzeSentiment => "analyze_sentiment",
            ApiOperation::Signup => "auth_signup",
            ApiOperation::Login => "auth_login",
            ApiOperation::CurrentUser => "auth_me",
            ApiOperation::CreatePost => "create_post",
            ApiOperation::Feed => "get_feed",
            ApiOperation::UploadMedia => "upload_image",
            ApiOperation::SearchRestaurants => "search_restaurants",
            ApiOperation::UploadReview => "upload_review",
            ApiOperation::ListReviews => "list_reviews",
        };
        f.write_str(name)
    }
}

/// Main error type for Eat Rate Love client operations
#[derive(Error, Debug)]
pub enum EatRateLoveError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalized backend failure (transport error, non-success status or
    /// undecodable body). Displays only the operation's fixed message.
    #[error("{}", .0.failure_message())]
    Api(ApiOperation),

    /// Input rejected before any request was issued
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Local storage errors (token and preference files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl EatRateLoveError {
    /// Returns the operation when this is a normalized backend failure.
    pub fn api_operation(&self) -> Option<ApiOperation> {
        match self {
            EatRateLoveError::Api(op) => Some(*op),
            _ => None,
        }
    }
}

/// Result type alias for Eat Rate Love operations
///
/// Uses `anyhow::Error` so callers can attach context while still being able
/// to downcast to [`EatRateLoveError`].
pub type Result<T> = anyhow::Result<T>;
