//! HTTP retrieval of search and lyric documents.

use std::fs;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::config::HttpConfig;
use crate::lyrics::error::TransportError;

/// Fetches a URL and hands back the whole response body.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(cfg: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.as_str());
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let request_failed = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_failed)?;
        debug!(url, bytes = body.len(), "fetched document");
        Ok(body)
    }
}

/// Which kind of document a response holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    SearchResults,
    Lyric,
}

impl DocumentKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::SearchResults => "search",
            Self::Lyric => "lyric",
        }
    }
}

/// On-disk copies of raw responses, one file per query or handle id.
#[derive(Debug, Clone)]
pub struct ResponseArchive {
    dir: PathBuf,
}

impl ResponseArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: DocumentKind, key: &str) -> PathBuf {
        let digest = Sha1::digest(key.as_bytes());
        self.dir
            .join(format!("{}-{}.xml", kind.prefix(), hex::encode(digest)))
    }

    /// Replace whatever is stored for `key` with `body`.
    pub fn store(&self, kind: DocumentKind, key: &str, body: &str) -> Result<PathBuf, TransportError> {
        let path = self.path_for(kind, key);
        let archive_failed = |source| TransportError::Archive {
            path: path.clone(),
            source,
        };

        ensure_private_dir(&self.dir).map_err(archive_failed)?;
        // another lookup for the same key may have removed it already
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(archive_failed(err)),
        }
        fs::write(&path, body).map_err(archive_failed)?;

        debug!(path = %path.display(), "archived response");
        Ok(path)
    }
}

fn ensure_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
