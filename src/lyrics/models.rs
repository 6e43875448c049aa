use serde::Serialize;

/// Artist and title being looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub artist: String,
    pub title: String,
}

impl Query {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Both fields carry non-blank text.
    pub fn is_complete(&self) -> bool {
        !self.artist.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// One `<result>` entry of a search document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub handle_id: Option<String>,
    pub title: String,
    pub artist: String,
    pub exact_match: bool,
}

impl Candidate {
    /// Promote an accepted candidate. Without a handle id there is nothing to
    /// fetch, so no record is produced.
    pub fn into_record(self, rule: MatchRule) -> Option<LyricRecord> {
        let handle_id = self.handle_id?;
        Some(LyricRecord {
            handle_id,
            title: self.title,
            artist: self.artist,
            writer: None,
            body: None,
            matched_by: Some(rule),
        })
    }
}

/// Rule of the matching policy that accepted a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// The service flagged the entry with `exactMatch="true"`.
    ExactFlag,
    /// Artist and title both equal the query, ignoring ASCII case.
    Full,
    /// Artist equals the query and the titles share their first characters.
    FuzzyTitle,
}

/// Lyrics for one accepted candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricRecord {
    pub handle_id: String,
    pub title: String,
    pub artist: String,
    pub writer: Option<String>,
    pub body: Option<String>,
    pub matched_by: Option<MatchRule>,
}

impl LyricRecord {
    pub fn new(handle_id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            handle_id: handle_id.into(),
            title: title.into(),
            artist: artist.into(),
            writer: None,
            body: None,
            matched_by: None,
        }
    }
}
