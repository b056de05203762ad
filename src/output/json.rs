//! JSON output envelope
//!
//! Every JSON document printed by the CLI has the shape
//! `{"data": ..., "meta": {"timestamp": ..., "version": ...}}`.

use chrono::Utc;
use serde::Serialize;

/// Data plus metadata
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub meta: Meta,
}

/// Metadata attached to every JSON document
#[derive(Debug, Serialize)]
pub struct Meta {
    /// RFC 3339 time the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: &'static str,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Meta {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope::new(data))
}
