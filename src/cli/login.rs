//! Login command: persist connection settings

use colored::Colorize;

use crate::cache::ResponseCache;
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Save the API host, token and session cookie to the config file.
///
/// Values not given keep whatever the file already holds. When the saved
/// session changes, responses cached for the previous one are dropped.
pub fn run(opts: &GlobalOptions, token: Option<&str>, cookie: Option<&str>) -> Result<()> {
    let previous = Config::load_at(opts.config_ref())?;

    let token = token.or(opts.token_ref());
    let mut config = previous.clone().with_overrides(opts.api_host_ref(), token);
    if let Some(cookie) = cookie {
        config.session_cookie = Some(cookie.to_string());
    }
    config.validate()?;

    config.save_at(opts.config_ref())?;

    let removed = forget_previous_session(&previous, &config, &ResponseCache::open(true));
    if removed > 0 {
        log::info!("Dropped {} cached responses from the previous session", removed);
    }

    let path = Config::resolve_path(opts.config_ref())?;
    println!(
        "{} Saved configuration to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Invalidate `previous`'s cached responses if `next` signs in as someone else
fn forget_previous_session(previous: &Config, next: &Config, cache: &ResponseCache) -> usize {
    let old_scope = previous.cache_scope();
    if old_scope == next.cache_scope() {
        return 0;
    }
    cache.invalidate_scope(&old_scope)
}
