//! Command parser for the interactive shell
//!
//! Lines starting with `/` are commands; any other non-empty line is review
//! text to analyze. Command names are case-insensitive, arguments are kept
//! as typed.

use thiserror::Error;

use crate::pagination::PageSize;

/// Errors that can occur when parsing shell commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Which paginated list a paging command applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Restaurants,
    Reviews,
}

/// Parsed shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Analyze and store review text
    Analyze(String),
    /// Search restaurants, replacing the text filter when given
    Search(Option<String>),
    /// Set the city filter; `None` clears it
    City(Option<String>),
    /// Reload the current page of reviews
    RefreshReviews,
    Next(ListTarget),
    Prev(ListTarget),
    Limit(ListTarget, PageSize),
    Login {
        username: String,
        password: String,
    },
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    Whoami,
    ToggleTheme,
    DismissError,
    Help,
    Exit,
    /// Blank line
    None,
}

/// Parse one line of shell input
///
/// # Examples
///
/// ```
/// use eatratelove::commands::shell_commands::{parse_shell_command, ListTarget, ShellCommand};
///
/// assert_eq!(parse_shell_command("/next").unwrap(), ShellCommand::Next(ListTarget::Restaurants));
/// assert_eq!(
///     parse_shell_command("Great dosa").unwrap(),
///     ShellCommand::Analyze("Great dosa".to_string())
/// );
/// ```
pub fn parse_shell_command(input: &str) -> Result<ShellCommand, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(ShellCommand::None);
    }

    let lower = trimmed.to_lowercase();
    if lower == "exit" || lower == "quit" {
        return Ok(ShellCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(ShellCommand::Analyze(trimmed.to_string()));
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/help" | "/?" => Ok(ShellCommand::Help),
        "/exit" | "/quit" => Ok(ShellCommand::Exit),
        "/analyze" => {
            if rest.is_empty() {
                Err(missing("/analyze", "/analyze <review text>"))
            } else {
                Ok(ShellCommand::Analyze(rest.to_string()))
            }
        }
        "/search" => Ok(ShellCommand::Search(non_empty(rest))),
        "/city" => Ok(ShellCommand::City(non_empty(rest))),
        "/next" => Ok(ShellCommand::Next(ListTarget::Restaurants)),
        "/prev" => Ok(ShellCommand::Prev(ListTarget::Restaurants)),
        "/limit" => parse_limit("/limit", ListTarget::Restaurants, rest),
        "/reviews" => parse_reviews(rest),
        "/login" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            match args.as_slice() {
                [username, password] => Ok(ShellCommand::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => Err(missing("/login", "/login <username> <password>")),
            }
        }
        "/signup" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            match args.as_slice() {
                [username, email, password] => Ok(ShellCommand::Signup {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                }),
                _ => Err(missing("/signup", "/signup <username> <email> <password>")),
            }
        }
        "/logout" => Ok(ShellCommand::Logout),
        "/whoami" => Ok(ShellCommand::Whoami),
        "/theme" | "/t" => Ok(ShellCommand::ToggleTheme),
        "/dismiss" => Ok(ShellCommand::DismissError),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn parse_reviews(rest: &str) -> Result<ShellCommand, CommandError> {
    let (sub, arg) = match rest.split_once(char::is_whitespace) {
        Some((sub, arg)) => (sub.to_lowercase(), arg.trim()),
        None => (rest.to_lowercase(), ""),
    };
    match sub.as_str() {
        "" | "refresh" => Ok(ShellCommand::RefreshReviews),
        "next" => Ok(ShellCommand::Next(ListTarget::Reviews)),
        "prev" => Ok(ShellCommand::Prev(ListTarget::Reviews)),
        "limit" => parse_limit("/reviews limit", ListTarget::Reviews, arg),
        _ => Err(CommandError::UnsupportedArgument {
            command: "/reviews".to_string(),
            arg: rest.to_string(),
        }),
    }
}

fn parse_limit(command: &str, target: ListTarget, arg: &str) -> Result<ShellCommand, CommandError> {
    if arg.is_empty() {
        return Err(missing(command, &format!("{} <5|10|25>", command)));
    }
    arg.parse::<PageSize>()
        .map(|size| ShellCommand::Limit(target, size))
        .map_err(|_| CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
}

fn missing(command: &str, usage: &str) -> CommandError {
    CommandError::MissingArgument {
        command: command.to_string(),
        usage: usage.to_string(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Print the list of shell commands
pub fn print_help() {
    println!(
        r#"
Shell Commands
==============

REVIEWS:
  <text>                  - Analyze and save a review (same as /analyze <text>)
  /analyze <text>         - Analyze and save a review
  /reviews                - Reload the current page of reviews
  /reviews next|prev      - Page through reviews
  /reviews limit <n>      - Reviews per page (5, 10, 25)

RESTAURANTS:
  /search [text]          - Search by name or category (blank keeps the filter)
  /city [name]            - Set the city filter (blank clears it)
  /next, /prev            - Page through results
  /limit <n>              - Results per page (5, 10, 25)

ACCOUNT:
  /login <user> <pass>    - Log in
  /signup <user> <email> <pass>
  /logout                 - Log out
  /whoami                 - Show the signed-in user

OTHER:
  /theme, /t              - Toggle dark/light theme
  /dismiss                - Hide the error banner
  /help                   - Show this help
  /exit                   - Leave the shell
"#
    );
}
