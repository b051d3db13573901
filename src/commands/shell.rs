//! Interactive shell
//!
//! A readline loop over [`App`]. Plain lines are analyzed as reviews, `/`
//! commands drive search, review paging, the session and the theme. After
//! every command the shell reports session changes, the error banner and any
//! toast.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::render::{self, Palette};
use super::shell_commands::{parse_shell_command, print_help, ListTarget, ShellCommand};
use super::Context;
use crate::app::App;
use crate::error::Result;
use crate::preferences::Preferences;
use crate::session::Session;

/// Start the interactive shell
///
/// The context's session should already be hydrated.
pub async fn run_shell(context: Context) -> Result<()> {
    tracing::info!("Starting interactive shell");

    let Context {
        config,
        api,
        session,
        preferences,
    } = context;
    let mut app = App::new(api, session, &config.ui);
    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&app, &preferences);

    loop {
        let prompt = format_prompt(&app.session().session(), palette(&preferences));
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let command = match parse_shell_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        render::print_error(&e.to_string());
                        continue;
                    }
                };

                // Keep credentials out of the history
                if !matches!(
                    command,
                    ShellCommand::Login { .. } | ShellCommand::Signup { .. }
                ) {
                    rl.add_history_entry(trimmed)?;
                }

                if command == ShellCommand::Exit {
                    break;
                }
                handle_command(&mut app, &preferences, command).await;
                report(&mut app, palette(&preferences));
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn handle_command(app: &mut App, preferences: &Preferences, command: ShellCommand) {
    let palette = palette(preferences);
    match command {
        ShellCommand::Analyze(text) => {
            app.review_input = text;
            app.analyze().await;
            if let Some(analysis) = app.sentiment() {
                render::print_sentiment(palette, analysis);
            }
            if app.error().is_none() {
                render::print_reviews(palette, app.reviews(), app.reviews_pager());
            }
        }
        ShellCommand::Search(text) => {
            if let Some(text) = text {
                app.search_text = text;
            }
            if app.search_first().await {
                render::print_restaurants(palette, app.restaurants(), app.search_pager());
            }
        }
        ShellCommand::City(city) => {
            app.search_city = city.unwrap_or_default();
            if app.search_first().await {
                render::print_restaurants(palette, app.restaurants(), app.search_pager());
            }
        }
        ShellCommand::Next(ListTarget::Restaurants) => {
            if app.search_pager().next_disabled() {
                println!("{}", "Already on the last page.".dimmed());
            } else if app.search_next().await {
                render::print_restaurants(palette, app.restaurants(), app.search_pager());
            }
        }
        ShellCommand::Prev(ListTarget::Restaurants) => {
            if app.search_pager().prev_disabled() {
                println!("{}", "Already on the first page.".dimmed());
            } else if app.search_prev().await {
                render::print_restaurants(palette, app.restaurants(), app.search_pager());
            }
        }
        ShellCommand::Limit(ListTarget::Restaurants, size) => {
            app.set_search_limit(size);
            if app.search().await {
                render::print_restaurants(palette, app.restaurants(), app.search_pager());
            }
        }
        ShellCommand::RefreshReviews => {
            if app.refresh_reviews().await {
                render::print_reviews(palette, app.reviews(), app.reviews_pager());
            }
        }
        ShellCommand::Next(ListTarget::Reviews) => {
            if app.reviews_pager().next_disabled() {
                println!("{}", "Already on the last page.".dimmed());
            } else if app.reviews_next().await {
                render::print_reviews(palette, app.reviews(), app.reviews_pager());
            }
        }
        ShellCommand::Prev(ListTarget::Reviews) => {
            if app.reviews_pager().prev_disabled() {
                println!("{}", "Already on the first page.".dimmed());
            } else if app.reviews_prev().await {
                render::print_reviews(palette, app.reviews(), app.reviews_pager());
            }
        }
        ShellCommand::Limit(ListTarget::Reviews, size) => {
            app.set_reviews_limit(size);
            if app.refresh_reviews().await {
                render::print_reviews(palette, app.reviews(), app.reviews_pager());
            }
        }
        ShellCommand::Login { username, password } => {
            if let Err(e) = app.session().login(&username, &password).await {
                render::print_error(&e.to_string());
            }
        }
        ShellCommand::Signup {
            username,
            email,
            password,
        } => {
            if let Err(e) = app.session().signup(&username, &email, &password).await {
                render::print_error(&e.to_string());
            }
        }
        ShellCommand::Logout => {
            if let Err(e) = app.session().logout() {
                render::print_error(&e.to_string());
            }
        }
        ShellCommand::Whoami => {
            render::print_user(palette, app.session().user().as_ref());
        }
        ShellCommand::ToggleTheme => match preferences.toggle_theme() {
            Ok(theme) => println!("Theme: {}", theme),
            Err(e) => render::print_error(&e.to_string()),
        },
        ShellCommand::DismissError => app.dismiss_error(),
        ShellCommand::Help => print_help(),
        ShellCommand::Exit | ShellCommand::None => {}
    }
}

/// Print whatever changed as a side effect of the last command.
fn report(app: &mut App, palette: Palette) {
    if let Some(session) = app.poll_session() {
        render::print_user(palette, session.user());
    }
    if let Some(toast) = app.take_toast() {
        render::print_toast(&toast);
    }
    if let Some(error) = app.error() {
        render::print_error(error);
        println!("{}", "(/dismiss to hide)".dimmed());
    }
}

fn palette(preferences: &Preferences) -> Palette {
    preferences.theme().into()
}

fn format_prompt(session: &Session, palette: Palette) -> String {
    let name = session
        .user()
        .map(|user| user.username.clone())
        .unwrap_or_else(|| "guest".to_string());
    format!("[{}]>> ", name.color(palette.accent))
}

fn print_welcome_banner(app: &App, preferences: &Preferences) {
    let palette = palette(preferences);
    println!(
        "{}",
        "EatRateLove interactive shell".color(palette.accent).bold()
    );
    render::print_user(palette, app.session().user().as_ref());
    println!(
        "{}",
        "Type a review to analyze it, or /help for commands.".color(palette.muted)
    );
    println!();
}
