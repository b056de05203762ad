//! Monitor command: poll the API and drive the recovery banner
//!
//! Polls report outages to the session's availability provider; a watcher on
//! the availability signal prints the banner, and stdin lines act as clicks.

use std::time::Duration;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::availability::Availability;
use crate::cli::{CommandContext, GlobalOptions};
use crate::client::AccountApi;
use crate::error::Result;
use crate::recovery::BannerAction;

/// A line typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonitorInput {
    Click(BannerAction),
    Quit,
}

fn parse_input(line: &str) -> Option<MonitorInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "retry" => Some(MonitorInput::Click(BannerAction::Retry)),
        "d" | "dismiss" => Some(MonitorInput::Click(BannerAction::Dismiss)),
        "q" | "quit" | "exit" => Some(MonitorInput::Quit),
        _ => None,
    }
}

/// Run until Ctrl-C or `q`
pub async fn run(opts: &GlobalOptions, interval: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.live_client();
    let banner = ctx.banner();
    let mut signal = ctx.provider.subscribe();

    let mut ticker = tokio::time::interval(Duration::from_secs(interval));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    println!(
        "Monitoring {} every {}s ({} retry, {} dismiss, {} quit)",
        ctx.config.api_host.cyan(),
        interval,
        "r".bold(),
        "d".bold(),
        "q".bold()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match client.get_profile().await {
                    Ok(profile) => log::debug!("Poll ok ({})", profile.email),
                    Err(e) => log::warn!("Poll failed: {}", e),
                }
            }
            changed = signal.changed() => {
                if !changed {
                    break;
                }
                match banner.render(&signal.status()) {
                    Some(text) => eprintln!("{}", text),
                    None if signal.current() == Availability::Available => {
                        println!("{} API reachable", "✓".green());
                    }
                    None => {}
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(input) => match parse_input(&input) {
                        Some(MonitorInput::Click(action)) => {
                            banner.click(action).await;
                        }
                        Some(MonitorInput::Quit) => break,
                        None => {}
                    },
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
