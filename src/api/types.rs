//! Request and response bodies for the review backend

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::pagination::PageSize;

/// Identity of an authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Backend-assigned identifier
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Body returned by signup and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Result of analyzing one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Echo of the analyzed text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// Metadata of a review the backend just stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedReview {
    pub id: i64,
    pub review: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A previously submitted review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    /// The review text as submitted
    pub review: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Creation time as sent by the backend
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ReviewRecord {
    /// Parse `created_at`, accepting RFC 3339 and the SQLite
    /// `YYYY-MM-DD HH:MM:SS` form (interpreted as UTC).
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// One row of the restaurant dataset.
///
/// The dataset is a CSV with loosely defined columns, so only the columns the
/// views render are typed and the rest are kept verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A social post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub caption: String,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: Post,
}

/// Body returned by media upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUpload {
    pub url: String,
}

/// A bounded slice of a server-side collection.
///
/// `total` is the size of the whole collection, not of this page. Endpoints
/// that omit either field decode as an empty page with a zero total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Restaurant search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// Matched against name and categories
    pub text: String,
    pub city: String,
    pub limit: PageSize,
    pub offset: u64,
}

impl SearchQuery {
    /// Query-string pairs. Blank filters are left out entirely; others are
    /// sent as typed.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if !self.text.trim().is_empty() {
            params.push(("q", self.text.clone()));
        }
        if !self.city.trim().is_empty() {
            params.push(("city", self.city.clone()));
        }
        params.push(("limit", self.limit.get().to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewBody<'a> {
    pub review: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePostBody<'a> {
    pub image_url: &'a str,
    pub caption: &'a str,
}
