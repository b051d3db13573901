//! Application state and user flows
//!
//! [`App`] owns everything the views render: form inputs, the last sentiment
//! result, the current restaurant and review pages with their pagers, loading
//! flags, the dismissible error banner and a short-lived toast. Each flow
//! clears the banner when it starts and sets it on failure; no failure ends
//! the session.
//!
//! Pagers only move after the page they point at has loaded, so a failed
//! Prev/Next leaves the view where it was.
//!
//! Restaurant searches carry a ticket. A response whose ticket is older than
//! the latest search is dropped instead of overwriting newer results.

use tokio::sync::watch;

use crate::api::{
    ApiClient, PageResult, Restaurant, ReviewRecord, SearchQuery, SentimentAnalysis,
};
use crate::config::UiConfig;
use crate::error::Result;
use crate::pagination::{PageSize, Pager};
use crate::session::{Session, SessionStore};

/// Toast shown after a review is analyzed and stored.
pub const REVIEW_SAVED_TOAST: &str = "Review analyzed and saved!";

/// A restaurant search that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: u64,
    pub query: SearchQuery,
}

/// View controller state
#[derive(Debug)]
pub struct App {
    api: ApiClient,
    session: SessionStore,
    session_rx: watch::Receiver<Session>,

    /// Review text being composed
    pub review_input: String,
    /// Restaurant name/category filter
    pub search_text: String,
    /// Restaurant city filter
    pub search_city: String,

    sentiment: Option<SentimentAnalysis>,
    restaurants: Vec<Restaurant>,
    search_pager: Pager,
    search_ticket: u64,
    reviews: Vec<ReviewRecord>,
    reviews_pager: Pager,

    analyzing: bool,
    loading_restaurants: bool,
    loading_reviews: bool,
    error: Option<String>,
    toast: Option<String>,
}

impl App {
    /// Create the view state and subscribe to session changes.
    pub fn new(api: ApiClient, session: SessionStore, ui: &UiConfig) -> Self {
        let session_rx = session.subscribe();
        Self {
            api,
            session,
            session_rx,
            review_input: String::new(),
            search_text: String::new(),
            search_city: String::new(),
            sentiment: None,
            restaurants: Vec::new(),
            search_pager: Pager::new(ui.search_limit),
            search_ticket: 0,
            reviews: Vec::new(),
            reviews_pager: Pager::new(ui.reviews_limit),
            analyzing: false,
            loading_restaurants: false,
            loading_reviews: false,
            error: None,
            toast: None,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Session published since the last poll, if it changed.
    pub fn poll_session(&mut self) -> Option<Session> {
        match self.session_rx.has_changed() {
            Ok(true) => Some(self.session_rx.borrow_and_update().clone()),
            _ => None,
        }
    }

    pub fn sentiment(&self) -> Option<&SentimentAnalysis> {
        self.sentiment.as_ref()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn search_pager(&self) -> &Pager {
        &self.search_pager
    }

    pub fn reviews(&self) -> &[ReviewRecord] {
        &self.reviews
    }

    pub fn reviews_pager(&self) -> &Pager {
        &self.reviews_pager
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_loading_restaurants(&self) -> bool {
        self.loading_restaurants
    }

    pub fn is_loading_reviews(&self) -> bool {
        self.loading_reviews
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Take the pending toast, clearing it.
    pub fn take_toast(&mut self) -> Option<String> {
        self.toast.take()
    }

    /// Analyze the composed review, store it, and reload the first page of
    /// reviews. Each step starts only after the previous one finished.
    ///
    /// Returns `true` when every step succeeded.
    pub async fn analyze(&mut self) -> bool {
        if self.review_input.trim().is_empty() {
            self.error = Some("Enter a review to analyze.".to_string());
            return false;
        }

        self.analyzing = true;
        self.error = None;
        let text = self.review_input.clone();
        let result = self.analyze_and_store(&text).await;
        self.analyzing = false;

        match result {
            Ok(()) => {
                self.toast = Some(REVIEW_SAVED_TOAST.to_string());
                true
            }
            Err(e) => {
                self.fail(&e, "Something went wrong.");
                false
            }
        }
    }

    async fn analyze_and_store(&mut self, text: &str) -> Result<()> {
        let analysis = self.api.analyze_sentiment(text).await?;
        self.sentiment = Some(analysis);

        let created = self.api.upload_review(text).await?;
        tracing::debug!("Stored review {}", created.id);

        let limit = self.reviews_pager.limit();
        let page = self.api.list_reviews(limit.get(), 0).await?;
        self.apply_reviews(Pager::new(limit), page);
        Ok(())
    }

    /// Run a restaurant search at the current page.
    pub async fn search(&mut self) -> bool {
        let offset = self.search_pager.offset();
        self.search_at(offset).await
    }

    /// Start a fresh search from the first page.
    pub async fn search_first(&mut self) -> bool {
        self.search_at(0).await
    }

    /// Load the next page of restaurants. No request when Next is disabled.
    pub async fn search_next(&mut self) -> bool {
        match self.search_pager.next_offset() {
            Some(offset) => self.search_at(offset).await,
            None => false,
        }
    }

    /// Load the previous page of restaurants. No request when Prev is
    /// disabled.
    pub async fn search_prev(&mut self) -> bool {
        match self.search_pager.prev_offset() {
            Some(offset) => self.search_at(offset).await,
            None => false,
        }
    }

    async fn search_at(&mut self, offset: u64) -> bool {
        let request = self.begin_search(offset);
        let result = self.api.search_restaurants(&request.query).await;
        self.finish_search(request.ticket, &request.query, result)
    }

    /// Issue a search ticket for `offset`, superseding any outstanding one.
    pub fn begin_search(&mut self, offset: u64) -> SearchRequest {
        self.search_ticket += 1;
        self.loading_restaurants = true;
        self.error = None;
        let limit = self.search_pager.limit();
        SearchRequest {
            ticket: self.search_ticket,
            query: SearchQuery {
                text: self.search_text.clone(),
                city: self.search_city.clone(),
                limit,
                offset: Pager::at(limit, offset).offset(),
            },
        }
    }

    /// Apply a search response. Responses for superseded tickets are dropped
    /// and `false` is returned.
    pub fn finish_search(
        &mut self,
        ticket: u64,
        query: &SearchQuery,
        result: Result<PageResult<Restaurant>>,
    ) -> bool {
        if ticket != self.search_ticket {
            tracing::debug!(
                "Dropping stale search response (ticket {}, latest {})",
                ticket,
                self.search_ticket
            );
            return false;
        }

        self.loading_restaurants = false;
        match result {
            Ok(page) => {
                let mut pager = Pager::at(query.limit, query.offset);
                pager.set_total(page.total);
                self.search_pager = pager;
                self.restaurants = page.items;
                true
            }
            Err(e) => {
                self.fail(&e, "Search failed.");
                false
            }
        }
    }

    /// Reload the current page of reviews.
    pub async fn refresh_reviews(&mut self) -> bool {
        let offset = self.reviews_pager.offset();
        self.load_reviews_at(offset).await
    }

    pub async fn reviews_next(&mut self) -> bool {
        match self.reviews_pager.next_offset() {
            Some(offset) => self.load_reviews_at(offset).await,
            None => false,
        }
    }

    pub async fn reviews_prev(&mut self) -> bool {
        match self.reviews_pager.prev_offset() {
            Some(offset) => self.load_reviews_at(offset).await,
            None => false,
        }
    }

    async fn load_reviews_at(&mut self, offset: u64) -> bool {
        self.loading_reviews = true;
        self.error = None;
        let limit = self.reviews_pager.limit();
        let pager = Pager::at(limit, offset);
        let result = self.api.list_reviews(limit.get(), pager.offset()).await;
        self.loading_reviews = false;

        match result {
            Ok(page) => {
                self.apply_reviews(pager, page);
                true
            }
            Err(e) => {
                self.fail(&e, "Failed to load reviews.");
                false
            }
        }
    }

    /// Change the restaurant page size; the next search starts on page one.
    pub fn set_search_limit(&mut self, limit: PageSize) {
        self.search_pager.set_limit(limit);
    }

    /// Change the review page size; the next load starts on page one.
    pub fn set_reviews_limit(&mut self, limit: PageSize) {
        self.reviews_pager.set_limit(limit);
    }

    fn apply_reviews(&mut self, mut pager: Pager, page: PageResult<ReviewRecord>) {
        pager.set_total(page.total);
        self.reviews_pager = pager;
        self.reviews = page.items;
    }

    fn fail(&mut self, error: &anyhow::Error, fallback: &str) {
        let message = error.to_string();
        tracing::warn!("{}", message);
        self.error = Some(if message.is_empty() {
            fallback.to_string()
        } else {
            message
        });
    }
}
