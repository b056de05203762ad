//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod account;
pub mod args;
pub mod cache;
pub mod context;
pub mod login;
pub mod monitor;
pub mod org;
pub mod retry;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// acctctl - companion CLI for the account settings API
#[derive(Parser, Debug)]
#[command(name = "acctctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "ACCTCTL_FORMAT",
        default_value = "pretty",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "ACCTCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API host (e.g. http://localhost:8080)
    #[arg(long, global = true, env = "ACCTCTL_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Access token to send as bearer authorization
    #[arg(long, global = true, env = "ACCTCTL_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ACCTCTL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "ACCTCTL_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save API host, token and session cookie to the config file
    Login {
        /// Access token
        #[arg(long = "with-token")]
        with_token: Option<String>,

        /// Session cookie as name=value
        #[arg(long)]
        cookie: Option<String>,
    },

    /// Show configuration and API availability
    Status,

    /// Print the organization id used for branding
    OrgId,

    /// Show the signed-in user's profile
    Me,

    /// Show account settings
    Settings,

    /// Drop cached responses and re-check API connectivity
    Retry,

    /// Poll the API and offer retry/dismiss while it is unavailable
    Monitor {
        /// Seconds between polls
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Remove all cached responses
    Clear,
    /// Print the cache directory
    Path,
}
