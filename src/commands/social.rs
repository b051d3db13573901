//! Feed, posts and media upload
//!
//! These endpoints require a bearer token. The token comes from the hydrated
//! session; without one the request is still sent and the backend's
//! rejection is reported.

use std::path::Path;

use colored::Colorize;

use super::render;
use super::Context;
use crate::error::Result;

pub async fn feed(context: &Context, limit: u32, offset: u64) -> Result<()> {
    let token = context.session.token();
    if token.is_none() {
        tracing::warn!("No session token; the feed will likely be rejected");
    }
    let page = context.api.get_feed(token.as_deref(), limit, offset).await?;
    render::print_posts(context.palette(), &page.items);
    Ok(())
}

pub async fn create_post(context: &Context, image_url: &str, caption: &str) -> Result<()> {
    let token = context.require_token("Posting")?;
    let post = context
        .api
        .create_post(Some(&token), image_url, caption)
        .await?;
    println!("{}", format!("Created post {}", post.id).green());
    Ok(())
}

pub async fn upload(context: &Context, file: &Path) -> Result<()> {
    let token = context.require_token("Uploading media")?;
    let upload = context.api.upload_image(Some(&token), file).await?;
    println!("{} {}", "Uploaded:".green(), upload.url);
    Ok(())
}
