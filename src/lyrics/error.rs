use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single lyrics lookup.
///
/// "No candidate matched" is not an error; lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("artist and title must both be set before searching")]
    MissingQuery,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with http status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to archive response to {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("malformed xml: {0}")]
    Malformed(String),

    #[error("expected <{name}> inside <{parent}>")]
    MissingNode {
        parent: &'static str,
        name: &'static str,
    },
}

impl From<roxmltree::Error> for XmlError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
