//! Profile and settings commands

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::{AccountApi, AccountSettings, UserProfile};
use crate::error::Result;
use crate::output::json;

/// Run the me command
pub async fn me(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let profile = match ctx.account_client().get_profile().await {
        Ok(profile) => profile,
        Err(e) => {
            ctx.show_banner();
            return Err(e);
        }
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&profile)?),
        OutputFormat::Pretty => print_profile(&profile),
    }
    Ok(())
}

/// Run the settings command
pub async fn settings(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let settings = match ctx.account_client().get_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            ctx.show_banner();
            return Err(e);
        }
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&settings)?),
        OutputFormat::Pretty => print_settings(&settings),
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("{}", "Profile".bold());
    println!();
    println!("  ID:           {}", profile.id);
    println!("  Email:        {}", profile.email);
    println!("  Name:         {}", or_dash(profile.name.as_deref()));
    match profile.organization_id {
        Some(id) => println!("  Organization: {}", id),
        None => println!("  Organization: {}", "-".dimmed()),
    }
}

fn print_settings(settings: &AccountSettings) {
    println!("{}", "Account Settings".bold());
    println!();
    println!("  Display name: {}", or_dash(settings.display_name.as_deref()));
    println!("  Locale:       {}", or_dash(settings.locale.as_deref()));
    println!("  Timezone:     {}", or_dash(settings.timezone.as_deref()));
    println!("  Theme:        {}", settings.theme);
    println!();
    println!("{}", "Notifications".bold());
    println!("  {} Email", check(settings.notifications.email));
    println!("  {} Product updates", check(settings.notifications.product_updates));
    println!("  {} Security alerts", check(settings.notifications.security_alerts));
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn check(enabled: bool) -> colored::ColoredString {
    if enabled { "✓".green() } else { "○".dimmed() }
}
