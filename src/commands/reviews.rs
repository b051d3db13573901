//! Review analysis and listing

use super::render;
use super::Context;
use crate::app::{App, REVIEW_SAVED_TOAST};
use crate::error::{EatRateLoveError, Result};
use crate::pagination::{PageSize, Pager};

/// Analyze `text`, store it and show the first page of reviews.
pub async fn analyze(context: Context, text: String) -> Result<()> {
    let palette = context.palette();
    let mut app = App::new(context.api, context.session, &context.config.ui);
    app.review_input = text;
    let ok = app.analyze().await;

    if let Some(analysis) = app.sentiment() {
        render::print_sentiment(palette, analysis);
    }
    if !ok {
        let message = app.error().unwrap_or("Something went wrong.").to_string();
        return Err(anyhow::anyhow!(message));
    }

    render::print_toast(app.take_toast().as_deref().unwrap_or(REVIEW_SAVED_TOAST));
    println!();
    render::print_reviews(palette, app.reviews(), app.reviews_pager());
    Ok(())
}

pub async fn list(context: &Context, limit: PageSize, offset: u64) -> Result<()> {
    let pager = Pager::at(limit, offset);
    if pager.offset() != offset {
        return Err(EatRateLoveError::Validation(format!(
            "offset must be a multiple of the page size {}",
            limit
        ))
        .into());
    }

    let page = context.api.list_reviews(limit.get(), offset).await?;
    let mut pager = pager;
    pager.set_total(page.total);
    render::print_reviews(context.palette(), &page.items, &pager);
    Ok(())
}
