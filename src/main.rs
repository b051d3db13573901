//! Eat Rate Love - restaurant review client
//!
#![doc = "Eat Rate Love - restaurant review client"]
#![doc = "Main entry point for the eatratelove command."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use eatratelove::cli::{Cli, Commands};
use eatratelove::commands::{self, Context};
use eatratelove::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;
    tracing::debug!("Using backend {}", config.api.base_url);

    // Execute command
    match cli.command {
        Commands::Login { username, password } => {
            let context = Context::open(config).await?;
            commands::auth::login(&context, &username, &password).await
        }
        Commands::Signup {
            username,
            email,
            password,
        } => {
            let context = Context::open(config).await?;
            commands::auth::signup(&context, &username, &email, &password).await
        }
        Commands::Logout => {
            let context = Context::open_offline(config)?;
            commands::auth::logout(&context)
        }
        Commands::Whoami => {
            let context = Context::open(config).await?;
            commands::auth::whoami(&context)
        }
        Commands::Analyze { text } => {
            let context = Context::open(config).await?;
            commands::reviews::analyze(context, text).await
        }
        Commands::Search {
            q,
            city,
            limit,
            offset,
        } => {
            let context = Context::open(config).await?;
            commands::restaurants::search(&context, q, city, limit, offset).await
        }
        Commands::Reviews { limit, offset } => {
            let context = Context::open(config).await?;
            commands::reviews::list(&context, limit, offset).await
        }
        Commands::Feed { limit, offset } => {
            let context = Context::open(config).await?;
            commands::social::feed(&context, limit, offset).await
        }
        Commands::Post { image_url, caption } => {
            let context = Context::open(config).await?;
            commands::social::create_post(&context, &image_url, &caption).await
        }
        Commands::Upload { file } => {
            let context = Context::open(config).await?;
            commands::social::upload(&context, &file).await
        }
        Commands::Theme { action } => {
            let context = Context::open_offline(config)?;
            commands::theme::run_theme(&context, action)
        }
        Commands::Shell => {
            let context = Context::open(config).await?;
            commands::shell::run_shell(context).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `--verbose` lifts the crate to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "eatratelove=debug"
    } else {
        "eatratelove=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
