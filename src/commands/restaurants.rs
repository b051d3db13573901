//! Restaurant search

use super::render;
use super::Context;
use crate::api::SearchQuery;
use crate::error::{EatRateLoveError, Result};
use crate::pagination::{PageSize, Pager};

pub async fn search(
    context: &Context,
    text: Option<String>,
    city: Option<String>,
    limit: PageSize,
    offset: u64,
) -> Result<()> {
    let mut pager = Pager::at(limit, offset);
    if pager.offset() != offset {
        return Err(EatRateLoveError::Validation(format!(
            "offset must be a multiple of the page size {}",
            limit
        ))
        .into());
    }

    let query = SearchQuery {
        text: text.unwrap_or_default(),
        city: city.unwrap_or_default(),
        limit,
        offset,
    };
    tracing::debug!("Searching restaurants: {:?}", query);

    let page = context.api.search_restaurants(&query).await?;
    pager.set_total(page.total);
    render::print_restaurants(context.palette(), &page.items, &pager);
    Ok(())
}
