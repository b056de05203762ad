//! `acctctl cache` subcommands

use std::path::PathBuf;

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::cache::{CacheStorage, ScopeSummary};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheStatusOutput {
    location: PathBuf,
    sessions: Vec<ScopeSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheClearOutput {
    removed: usize,
}

/// List cached sessions and what each one holds
pub fn status(format: OutputFormat) -> Result<()> {
    let location = CacheStorage::default_dir()?;
    let sessions = CacheStorage::open_at(&location)?.summarize()?;

    if format == OutputFormat::Json {
        let output = CacheStatusOutput { location, sessions };
        println!("{}", json::format_json(&output)?);
        return Ok(());
    }

    println!("Response cache: {}", location.display().to_string().cyan());
    if sessions.is_empty() {
        println!("{}", "No cached responses".dimmed());
        return Ok(());
    }

    let now = Utc::now().timestamp();
    for session in &sessions {
        println!();
        println!("{}", session.scope.bold());
        println!(
            "  {} fresh of {} entries, {} bytes",
            session.fresh, session.entries, session.bytes
        );
        println!("  endpoints: {}", session.endpoints.join(", "));
        println!("  last stored {}", age(now - session.last_stored));
    }
    Ok(())
}

/// Drop every cached response
pub fn clear(format: OutputFormat) -> Result<()> {
    let removed = CacheStorage::open()?.clear_all()?;

    match format {
        OutputFormat::Json => println!("{}", json::format_json(&CacheClearOutput { removed })?),
        OutputFormat::Pretty if removed == 0 => println!("Cache was already empty"),
        OutputFormat::Pretty => println!("{} Removed {} cached responses", "✓".green(), removed),
    }
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", CacheStorage::default_dir()?.display());
    Ok(())
}

/// Coarse "N units ago" for a number of elapsed seconds
fn age(seconds: i64) -> String {
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86_400),
    }
}
