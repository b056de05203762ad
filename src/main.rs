//! acctctl - companion CLI for the account settings API

use clap::Parser;

mod availability;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod identity;
mod output;
mod recovery;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Log to stderr; `ACCTCTL_LOG` takes a standard env_logger filter
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("ACCTCTL_LOG", default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { with_token, cookie } => {
            cli::login::run(&opts, with_token.as_deref(), cookie.as_deref())
        }
        Commands::Status => cli::status::run(&opts).await,
        Commands::OrgId => cli::org::run(&opts).await,
        Commands::Me => cli::account::me(&opts).await,
        Commands::Settings => cli::account::settings(&opts).await,
        Commands::Retry => cli::retry::run(&opts).await,
        Commands::Monitor { interval } => cli::monitor::run(&opts, interval).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(opts.format),
            CacheCommands::Clear => cli::cache::clear(opts.format),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Version => {
            println!("acctctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
