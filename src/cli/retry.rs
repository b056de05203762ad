//! Retry command: the banner's Retry action from the command line

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{ApiError, Result};
use crate::output::json;
use crate::recovery::BannerAction;

/// Invalidate the response cache and re-check connectivity.
///
/// Fails with a network error when the API is still unreachable.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let reachable = ctx
        .banner()
        .click(BannerAction::Retry)
        .await
        .unwrap_or(false);

    match ctx.format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "reachable": reachable });
            println!("{}", json::format_json(&output)?);
        }
        OutputFormat::Pretty if reachable => {
            println!("{} Cache cleared, API reachable", "✓".green());
        }
        OutputFormat::Pretty => ctx.show_banner(),
    }

    if reachable {
        Ok(())
    } else {
        Err(ApiError::Network(format!("{} is unreachable", ctx.config.api_host)).into())
    }
}
