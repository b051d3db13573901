//! Terminal rendering for command output

use colored::{Color, Colorize};
use prettytable::{format, Table};

use crate::api::{Post, Restaurant, ReviewRecord, SentimentAnalysis, UserSummary};
use crate::pagination::Pager;
use crate::preferences::Theme;

/// Colors derived from the active theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub muted: Color,
}

impl From<Theme> for Palette {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                accent: Color::BrightCyan,
                muted: Color::BrightBlack,
            },
            Theme::Light => Palette {
                accent: Color::Blue,
                muted: Color::Black,
            },
        }
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn print_toast(message: &str) {
    println!("{}", message.green());
}

pub fn print_user(palette: Palette, user: Option<&UserSummary>) {
    match user {
        Some(user) => println!(
            "Signed in as {}",
            user.username.color(palette.accent).bold()
        ),
        None => println!("{}", "Not signed in.".yellow()),
    }
}

pub fn print_sentiment(palette: Palette, analysis: &SentimentAnalysis) {
    let sentiment = match analysis.sentiment.as_str() {
        "positive" => analysis.sentiment.green(),
        "negative" => analysis.sentiment.red(),
        _ => analysis.sentiment.color(palette.accent),
    };
    println!("{} {}", "Sentiment:".bold(), sentiment);
    println!(
        "{} {}",
        "Keywords:".bold(),
        analysis.keywords.join(", ").color(palette.muted)
    );
}

/// Pagination footer: total, page position and which controls are live.
pub fn pager_line(pager: &Pager) -> String {
    let prev = if pager.prev_disabled() {
        "[prev]".dimmed()
    } else {
        "[prev]".normal()
    };
    let next = if pager.next_disabled() {
        "[next]".dimmed()
    } else {
        "[next]".normal()
    };
    format!("Total: {}  {}  {} {}", pager.total(), pager, prev, next)
}

pub fn print_restaurants(palette: Palette, restaurants: &[Restaurant], pager: &Pager) {
    if restaurants.is_empty() {
        println!("{}", "No restaurants found".yellow());
        println!("{}", "Try adjusting your search terms".color(palette.muted));
        println!("{}", pager_line(pager));
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Name".bold(),
        "City".bold(),
        "Categories".bold(),
        "Rating".bold()
    ]);

    for restaurant in restaurants {
        let rating = restaurant
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(prettytable::row![
            restaurant
                .name
                .as_deref()
                .unwrap_or("Unknown")
                .color(palette.accent),
            restaurant.city.as_deref().unwrap_or("-"),
            truncate(restaurant.categories.as_deref().unwrap_or("-"), 40),
            rating
        ]);
    }

    table.printstd();
    println!("{}", pager_line(pager));
}

pub fn print_reviews(palette: Palette, reviews: &[ReviewRecord], pager: &Pager) {
    if reviews.is_empty() {
        println!("{}", "No reviews yet".yellow());
        println!(
            "{}",
            "Analyze a review to see it here".color(palette.muted)
        );
        println!("{}", pager_line(pager));
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Sentiment".bold(),
        "Review".bold(),
        "Keywords".bold(),
        "Created".bold()
    ]);

    for review in reviews {
        let created = review
            .created_at_utc()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .or_else(|| review.created_at.clone())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(prettytable::row![
            review.id.to_string().color(palette.accent),
            review.sentiment,
            truncate(&review.review, 50),
            review.keywords.join(", "),
            created
        ]);
    }

    table.printstd();
    println!("{}", pager_line(pager));
}

pub fn print_posts(palette: Palette, posts: &[Post]) {
    if posts.is_empty() {
        println!("{}", "Your feed is empty.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Author".bold(),
        "Caption".bold(),
        "Image".bold(),
        "Likes".bold()
    ]);

    for post in posts {
        table.add_row(prettytable::row![
            post.id.to_string().color(palette.accent),
            post.username.as_deref().unwrap_or("-"),
            truncate(&post.caption, 40),
            post.image_url,
            post.likes
        ]);
    }

    table.printstd();
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageSize;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ååååååååååå", 6), "ååå...");
    }

    #[test]
    fn test_pager_line_shows_position() {
        colored::control::set_override(false);
        let mut pager = Pager::new(PageSize::Ten);
        pager.set_total(42);
        let line = pager_line(&pager);
        assert!(line.contains("Total: 42"));
        assert!(line.contains("Page 1 / 5"));
    }
}
