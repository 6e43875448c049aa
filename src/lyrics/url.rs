//! Request URLs for the lyrics service.

use crate::config::ApiConfig;
use crate::lyrics::models::Query;

/// Percent-encode free text for use as a query-string value.
///
/// Everything outside the unreserved set (`A-Z a-z 0-9 - . _ ~`) is escaped,
/// multi-byte characters byte by byte.
pub fn encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
    auth: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>, auth: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: auth.into(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(&api.base_url, &api.auth)
    }

    pub fn search(&self, query: &Query) -> String {
        format!(
            "{}/api_search.php?auth={}&artist={}&songtitle={}",
            self.base_url,
            encode(&self.auth),
            encode(&query.artist),
            encode(&query.title)
        )
    }

    /// Handle ids come from the service and are used verbatim.
    pub fn lyric(&self, handle_id: &str) -> String {
        format!(
            "{}/api_lyrics.php?auth={}&hid={}",
            self.base_url,
            encode(&self.auth),
            handle_id
        )
    }
}
