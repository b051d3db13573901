//! Theme preference

use super::Context;
use crate::cli::ThemeAction;
use crate::error::Result;
use crate::preferences::Theme;

pub fn run_theme(context: &Context, action: Option<ThemeAction>) -> Result<()> {
    let theme = match action {
        None => context.preferences.theme(),
        Some(ThemeAction::Toggle) => context.preferences.toggle_theme()?,
        Some(ThemeAction::Dark) => {
            context.preferences.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        Some(ThemeAction::Light) => {
            context.preferences.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    println!("Theme: {}", theme);
    Ok(())
}
