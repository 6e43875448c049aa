//! Lyrics lookup against a Leo's Lyrics style XML web service
//!
//! This module provides:
//! - HTTP transport with an optional on-disk archive of raw responses
//! - A forward-only XML cursor shared by both document parsers
//! - Search-result parsing and the candidate matching policy
//! - Full-lyric parsing (writer credit and body)
//! - A per-caller session driving search → match → fetch

pub mod client;
pub mod error;
pub mod fetch;
pub mod models;
pub mod search;
pub mod session;
pub mod transport;
pub mod url;
pub mod xml;

pub use client::LyricsClient;
pub use error::{LyricsError, TransportError, XmlError};
pub use models::{Candidate, LyricRecord, MatchRule, Query};
pub use session::{LyricsSession, SessionStatus};
pub use transport::{HttpTransport, ResponseArchive, Transport};
pub use url::Endpoints;

use tracing::debug;

use crate::config::Config;

/// Build an HTTP-backed client from the user's configuration.
pub fn client_from_config(cfg: &Config) -> Result<LyricsClient<HttpTransport>, TransportError> {
    let transport = HttpTransport::new(&cfg.http)?;
    let client = LyricsClient::new(transport, Endpoints::from_config(&cfg.api));
    if cfg.archive.enabled {
        let archive = ResponseArchive::new(&cfg.archive.dir);
        debug!(dir = %archive.dir().display(), "archiving raw responses");
        Ok(client.with_archive(archive))
    } else {
        Ok(client)
    }
}
