//! HTTP client for the review backend
//!
//! [`ApiClient`] turns each logical backend operation into exactly one HTTP
//! request. It never retries. Every failure (transport error, non-success
//! status, undecodable body) collapses into
//! [`EatRateLoveError::Api`] carrying the operation, whose display is a fixed
//! human-readable message. The status and body are logged, not propagated.
//!
//! # Authentication
//!
//! The client holds no credential. Operations that need one take
//! `token: Option<&str>` and attach `Authorization: Bearer <token>` only when
//! a token is given; a missing token is left for the backend to reject.

pub mod types;

pub use types::{
    AuthResponse, CreatedReview, MediaUpload, PageResult, Post, Restaurant, ReviewRecord,
    SearchQuery, SentimentAnalysis, UserSummary,
};

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiOperation, EatRateLoveError, Result};
use types::{CreatePostBody, LoginBody, PostEnvelope, ReviewBody, SignupBody};

/// Image types the media endpoint accepts, keyed by file extension.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

/// Typed client for the review backend
///
/// # Examples
///
/// ```no_run
/// use eatratelove::api::{ApiClient, SearchQuery};
/// use eatratelove::config::ApiConfig;
///
/// # async fn example() -> eatratelove::error::Result<()> {
/// let client = ApiClient::new(&ApiConfig::default())?;
/// let page = client.search_restaurants(&SearchQuery::default()).await?;
/// println!("{} restaurants", page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `config.base_url` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EatRateLoveError::Config`] if the base URL does not parse,
    /// or [`EatRateLoveError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            EatRateLoveError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
        })?;
        // Joining relative paths drops the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(EatRateLoveError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST /sentiment/analyze
    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentAnalysis> {
        let op = ApiOperation::AnalyzeSentiment;
        let url = self.endpoint("sentiment/analyze")?;
        let request = self.client.post(url).json(&ReviewBody { review: text });
        self.execute(op, request).await
    }

    /// POST /auth/signup
    pub async fn auth_signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let op = ApiOperation::Signup;
        let url = self.endpoint("auth/signup")?;
        let request = self.client.post(url).json(&SignupBody {
            username,
            email,
            password,
        });
        self.execute(op, request).await
    }

    /// POST /auth/login
    pub async fn auth_login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let op = ApiOperation::Login;
        let url = self.endpoint("auth/login")?;
        let request = self
            .client
            .post(url)
            .json(&LoginBody { username, password });
        self.execute(op, request).await
    }

    /// GET /auth/me
    pub async fn auth_me(&self, token: Option<&str>) -> Result<UserSummary> {
        let op = ApiOperation::CurrentUser;
        let url = self.endpoint("auth/me")?;
        let request = authorize(self.client.get(url), token);
        self.execute(op, request).await
    }

    /// POST /posts/create
    pub async fn create_post(
        &self,
        token: Option<&str>,
        image_url: &str,
        caption: &str,
    ) -> Result<Post> {
        let op = ApiOperation::CreatePost;
        let url = self.endpoint("posts/create")?;
        let request = authorize(self.client.post(url), token)
            .json(&CreatePostBody { image_url, caption });
        let envelope: PostEnvelope = self.execute(op, request).await?;
        Ok(envelope.post)
    }

    /// GET /posts/feed
    pub async fn get_feed(
        &self,
        token: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<PageResult<Post>> {
        let op = ApiOperation::Feed;
        let url = self.endpoint("posts/feed")?;
        let request = authorize(self.client.get(url), token).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ]);
        self.execute(op, request).await
    }

    /// POST /media/upload as multipart form field `file`
    ///
    /// # Errors
    ///
    /// Besides the normalized [`ApiOperation::UploadMedia`] failure, returns
    /// [`EatRateLoveError::Validation`] for unsupported file types and an I/O
    /// error if the file cannot be read. Neither issues a request.
    pub async fn upload_image(&self, token: Option<&str>, path: &Path) -> Result<MediaUpload> {
        let op = ApiOperation::UploadMedia;
        let mime = image_mime(path)?;
        let bytes = tokio::fs::read(path).await.map_err(EatRateLoveError::Io)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(EatRateLoveError::Http)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.endpoint("media/upload")?;
        let request = authorize(self.client.post(url), token).multipart(form);
        self.execute(op, request).await
    }

    /// GET /yelp/restaurants
    pub async fn search_restaurants(&self, query: &SearchQuery) -> Result<PageResult<Restaurant>> {
        let op = ApiOperation::SearchRestaurants;
        let url = self.endpoint("yelp/restaurants")?;
        let request = self.client.get(url).query(&query.to_params());
        self.execute(op, request).await
    }

    /// POST /upload/review
    pub async fn upload_review(&self, text: &str) -> Result<CreatedReview> {
        let op = ApiOperation::UploadReview;
        let url = self.endpoint("upload/review")?;
        let request = self.client.post(url).json(&ReviewBody { review: text });
        self.execute(op, request).await
    }

    /// GET /upload/reviews
    pub async fn list_reviews(&self, limit: u32, offset: u64) -> Result<PageResult<ReviewRecord>> {
        let op = ApiOperation::ListReviews;
        let url = self.endpoint("upload/reviews")?;
        let request = self.client.get(url).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ]);
        self.execute(op, request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            EatRateLoveError::Config(format!("Invalid endpoint path {}: {}", path, e)).into()
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        op: ApiOperation,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation = %op, "Request failed: {}", e);
            EatRateLoveError::Api(op)
        })?;

        let status = response.status();
        tracing::debug!(operation = %op, status = %status, "Backend responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation = %op, "Backend returned {}: {}", status, body);
            return Err(EatRateLoveError::Api(op).into());
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(operation = %op, "Failed to decode response: {}", e);
            EatRateLoveError::Api(op).into()
        })
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => request.bearer_auth(token),
        _ => request,
    }
}

fn image_mime(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| {
            EatRateLoveError::Validation(format!(
                "Unsupported image type for {} (expected jpg, png, webp or gif)",
                path.display()
            ))
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base.to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_onto_root() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint("auth/me").unwrap().as_str(),
            "http://localhost:8000/auth/me"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let api = client("https://example.com/api");
        assert_eq!(
            api.endpoint("upload/reviews").unwrap().as_str(),
            "https://example.com/api/upload/reviews"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base() {
        let result = ApiClient::new(&ApiConfig {
            base_url: "::nope".to_string(),
            timeout_seconds: 5,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a.JPG")).unwrap(), "image/jpeg");
        assert_eq!(image_mime(Path::new("dir/b.webp")).unwrap(), "image/webp");
        assert!(image_mime(Path::new("notes.txt")).is_err());
        assert!(image_mime(Path::new("no_extension")).is_err());
    }
}
