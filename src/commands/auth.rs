//! Login, signup, logout and whoami

use colored::Colorize;

use super::render;
use super::Context;
use crate::error::Result;

pub async fn login(context: &Context, username: &str, password: &str) -> Result<()> {
    tracing::info!("Logging in as {}", username);
    let user = context.session.login(username, password).await?;
    render::print_user(context.palette(), Some(&user));
    Ok(())
}

pub async fn signup(context: &Context, username: &str, email: &str, password: &str) -> Result<()> {
    tracing::info!("Creating account {}", username);
    let user = context.session.signup(username, email, password).await?;
    println!("{}", "Account created.".green());
    render::print_user(context.palette(), Some(&user));
    Ok(())
}

pub fn logout(context: &Context) -> Result<()> {
    context.session.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Print the user restored by hydration.
pub fn whoami(context: &Context) -> Result<()> {
    let user = context.session.user();
    render::print_user(context.palette(), user.as_ref());
    if let Some(email) = user.as_ref().and_then(|u| u.email.as_deref()) {
        println!("Email: {}", email);
    }
    Ok(())
}
