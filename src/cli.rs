//! Command-line interface definition for the Eat Rate Love client
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pagination::PageSize;

/// Eat Rate Love - restaurant reviews from the terminal
///
/// Analyze review sentiment, search restaurants and browse submitted reviews
/// against an Eat Rate Love backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "eatratelove")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Backend base URL (overrides config and EATRATELOVE_API_BASE)
    #[arg(long)]
    pub api_base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (or set EATRATELOVE_PASSWORD)
        #[arg(short, long, env = "EATRATELOVE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (or set EATRATELOVE_PASSWORD)
        #[arg(short, long, env = "EATRATELOVE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Analyze a review, store it and show the latest reviews
    Analyze {
        /// Review text
        text: String,
    },

    /// Search restaurants
    Search {
        /// Match against name and categories
        #[arg(short, long)]
        q: Option<String>,

        /// Filter by city
        #[arg(long)]
        city: Option<String>,

        /// Page size (5, 10 or 25)
        #[arg(short, long, default_value = "10")]
        limit: PageSize,

        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// List submitted reviews
    Reviews {
        /// Page size (5, 10 or 25)
        #[arg(short, long, default_value = "10")]
        limit: PageSize,

        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Show posts from followed users (requires login)
    Feed {
        #[arg(short, long, default_value_t = 25)]
        limit: u32,

        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Create a post (requires login)
    Post {
        /// URL of an uploaded image
        #[arg(long)]
        image_url: String,

        #[arg(long, default_value = "")]
        caption: String,
    },

    /// Upload an image (requires login)
    Upload {
        /// jpg, png, webp or gif file
        file: PathBuf,
    },

    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },

    /// Start the interactive shell
    Shell,
}

/// Theme subcommand argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Dark,
    Light,
    Toggle,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            api_base: None,
            verbose: false,
            command: Commands::Whoami,
        }
    }
}
