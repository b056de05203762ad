//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::availability::{Availability, AvailabilityActions};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    config_path: String,
    api_host: String,
    token_configured: bool,
    session_cookie_configured: bool,
    cache_enabled: bool,
    availability: Availability,
}

/// Show configuration and check whether the API is reachable
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let config_path = Config::resolve_path(opts.config_ref())?;

    ctx.provider.retry().await;
    let availability = ctx.provider.current();

    if ctx.format == OutputFormat::Json {
        let output = StatusOutput {
            config_path: config_path.display().to_string(),
            api_host: ctx.config.api_host.clone(),
            token_configured: ctx.config.access_token.is_some(),
            session_cookie_configured: ctx.config.session_cookie.is_some(),
            cache_enabled: ctx.cache.is_enabled(),
            availability,
        };
        println!("{}", json::format_json(&output)?);
        return Ok(());
    }

    println!("{}\n", "acctctl Status".bold());

    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }
    println!("API host: {}", ctx.config.api_host.cyan());
    println!();

    if ctx.config.access_token.is_some() {
        println!("{} Access token configured", "✓".green());
    } else {
        println!("{} No access token", "○".dimmed());
        println!("  → Run 'acctctl login --with-token <TOKEN>' to set one");
    }

    if ctx.config.session_cookie.is_some() {
        println!("{} Session cookie configured", "✓".green());
    } else {
        println!("{} No session cookie", "○".dimmed());
    }

    if ctx.cache.is_enabled() {
        println!("{} Response cache enabled", "✓".green());
    } else {
        println!("{} Response cache disabled", "○".dimmed());
    }

    match availability {
        Availability::Available => println!("{} API reachable", "✓".green()),
        Availability::Unavailable { .. } => {
            println!("{} API unreachable", "✗".red());
            println!();
            ctx.show_banner();
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_output_is_camel_case() {
        let output = StatusOutput {
            config_path: "/tmp/config.yaml".to_string(),
            api_host: "https://api.example.com".to_string(),
            token_configured: true,
            session_cookie_configured: false,
            cache_enabled: true,
            availability: Availability::Unavailable { dismissed: false },
        };
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["tokenConfigured"], true);
        assert_eq!(value["sessionCookieConfigured"], false);
        assert_eq!(value["apiHost"], "https://api.example.com");
        assert!(value.get("token_configured").is_none());
        assert_eq!(value["availability"]["state"], "unavailable");
    }
}
