use tracing::{debug, info};

use crate::lyrics::error::{LyricsError, TransportError};
use crate::lyrics::fetch;
use crate::lyrics::models::{LyricRecord, Query};
use crate::lyrics::transport::{DocumentKind, ResponseArchive, Transport};
use crate::lyrics::url::Endpoints;

/// Talks to the lyrics service: one call per pipeline step.
#[derive(Debug, Clone)]
pub struct LyricsClient<T> {
    transport: T,
    endpoints: Endpoints,
    archive: Option<ResponseArchive>,
}

impl<T: Transport> LyricsClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            archive: None,
        }
    }

    /// Keep raw responses under `archive` as well.
    pub fn with_archive(mut self, archive: ResponseArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn retrieve(&self, url: &str, kind: DocumentKind, key: &str) -> Result<String, TransportError> {
        info!(url, "requesting");
        let body = self.transport.get(url).await?;
        if let Some(archive) = &self.archive {
            archive.store(kind, key, &body)?;
        }
        Ok(body)
    }

    /// Raw search-results document for `query`.
    pub async fn search_document(&self, query: &Query) -> Result<String, LyricsError> {
        if !query.is_complete() {
            return Err(LyricsError::MissingQuery);
        }
        let url = self.endpoints.search(query);
        let key = format!(
            "{}\n{}",
            query.artist.to_lowercase(),
            query.title.to_lowercase()
        );
        Ok(self.retrieve(&url, DocumentKind::SearchResults, &key).await?)
    }

    /// Raw full-lyric document for a handle id.
    pub async fn lyric_document(&self, handle_id: &str) -> Result<String, TransportError> {
        let url = self.endpoints.lyric(handle_id);
        self.retrieve(&url, DocumentKind::Lyric, handle_id).await
    }

    /// Fetch writer and body for a promoted record.
    pub async fn complete(&self, mut record: LyricRecord) -> Result<LyricRecord, LyricsError> {
        let document = self.lyric_document(&record.handle_id).await?;
        fetch::fill_record(&document, &mut record)?;
        Ok(record)
    }

    /// Fetch a record straight from a handle id, skipping the search.
    pub async fn lyric_by_handle(&self, handle_id: &str) -> Result<LyricRecord, LyricsError> {
        let document = self.lyric_document(handle_id).await?;
        let record = fetch::parse_record(&document, handle_id)?;
        debug!(hid = handle_id, title = %record.title, "fetched lyric by handle");
        Ok(record)
    }
}
