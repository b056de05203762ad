//! Cache keys and session scopes

use sha2::{Digest, Sha256};

/// Hex digits of the credential fingerprint kept in a scope
const FINGERPRINT_LEN: usize = 12;

/// Scope identifying one signed-in session against one API host.
///
/// The token and cookie never appear in the scope; only a truncated SHA-256
/// fingerprint of them does. Blank credentials count as absent, matching
/// what the request context sends.
pub fn session_scope(api_host: &str, token: Option<&str>, cookie: Option<&str>) -> String {
    fn present(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    let mut hasher = Sha256::new();
    for part in [present(token), present(cookie)] {
        match part {
            Some(value) => {
                hasher.update(b"1");
                hasher.update(value.as_bytes());
            }
            None => hasher.update(b"0"),
        }
        hasher.update(b"\0");
    }
    let fingerprint = format!("{:x}", hasher.finalize());

    format!(
        "{}#{}",
        api_host.trim_end_matches('/'),
        &fingerprint[..FINGERPRINT_LEN]
    )
}

/// Storage key for `endpoint` within `scope`
pub fn cache_key(endpoint: &str, scope: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scope.as_bytes());
    hasher.update(b"\0");
    hasher.update(endpoint.as_bytes());
    format!("{:x}", hasher.finalize())
}
