//! One caller's lyrics lookup: holds the query, runs search → match → fetch
//! and keeps the resulting record.
//!
//! `search` borrows the session mutably, so a session can only ever run one
//! lookup at a time. Raw-response archives are keyed by query, so separate
//! sessions looking up different songs never write the same file.

use tracing::{debug, info, warn};

use crate::lyrics::client::LyricsClient;
use crate::lyrics::error::LyricsError;
use crate::lyrics::models::{LyricRecord, Query};
use crate::lyrics::search;
use crate::lyrics::transport::Transport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Searching,
    Fetching,
    Done,
    NoMatch,
    SearchFailed,
}

#[derive(Debug)]
pub struct LyricsSession<T> {
    client: LyricsClient<T>,
    artist: Option<String>,
    title: Option<String>,
    status: SessionStatus,
    /// Whether the last search or fetch request went through.
    fetched: bool,
    result: Option<LyricRecord>,
}

impl<T: Transport> LyricsSession<T> {
    pub fn new(client: LyricsClient<T>) -> Self {
        Self {
            client,
            artist: None,
            title: None,
            status: SessionStatus::Idle,
            fetched: false,
            result: None,
        }
    }

    pub fn client(&self) -> &LyricsClient<T> {
        &self.client
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.artist = Some(artist.into());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn fetched(&self) -> bool {
        self.fetched
    }

    pub fn result(&self) -> Option<&LyricRecord> {
        self.result.as_ref()
    }

    /// Forget the query and any result.
    pub fn clear(&mut self) {
        self.artist = None;
        self.title = None;
        self.status = SessionStatus::Idle;
        self.fetched = false;
        self.result = None;
    }

    /// Run a lookup and report whether lyrics were found. Failures are logged.
    pub async fn search(&mut self) -> bool {
        match self.try_search().await {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn!(error = %err, "lyrics search failed");
                false
            }
        }
    }

    /// Run a lookup for the current artist and title.
    ///
    /// The previous result is dropped before anything else happens. Returns
    /// `Ok(None)` when the service had nothing acceptable.
    pub async fn try_search(&mut self) -> Result<Option<&LyricRecord>, LyricsError> {
        self.result = None;
        self.fetched = false;

        let query = match (&self.artist, &self.title) {
            (Some(artist), Some(title)) => Query::new(artist.as_str(), title.as_str()),
            _ => {
                self.status = SessionStatus::SearchFailed;
                return Err(LyricsError::MissingQuery);
            }
        };
        if !query.is_complete() {
            self.status = SessionStatus::SearchFailed;
            return Err(LyricsError::MissingQuery);
        }

        self.status = SessionStatus::Searching;
        match self.run(&query).await {
            Ok(Some(record)) => {
                info!(title = %record.title, artist = %record.artist, "lyrics found");
                self.status = SessionStatus::Done;
                self.result = Some(record);
            }
            Ok(None) => {
                info!(artist = %query.artist, title = %query.title, "no matching lyrics");
                self.status = SessionStatus::NoMatch;
            }
            Err(err) => {
                self.status = SessionStatus::SearchFailed;
                return Err(err);
            }
        }
        Ok(self.result.as_ref())
    }

    async fn run(&mut self, query: &Query) -> Result<Option<LyricRecord>, LyricsError> {
        let document = self.client.search_document(query).await?;
        self.fetched = true;

        let Some((candidate, rule)) = search::first_accepted(&document, query)? else {
            return Ok(None);
        };
        let Some(record) = candidate.into_record(rule) else {
            return Ok(None);
        };

        debug!(hid = %record.handle_id, ?rule, "fetching lyric");
        self.status = SessionStatus::Fetching;
        self.fetched = false;
        let record = self.client.complete(record).await?;
        self.fetched = true;
        Ok(Some(record))
    }
}
