//! Search-result documents and the policy deciding which entry answers a query.
//!
//! ```text
//! <leoslyrics>
//!   <response code="0">SUCCESS</response>
//!   <searchResults>
//!     <result hid="..." exactMatch="true|false">
//!       <title>...</title>
//!       <artist><name>...</name></artist>
//!     </result>
//!   </searchResults>
//! </leoslyrics>
//! ```

use tracing::{debug, warn};

use crate::lyrics::error::XmlError;
use crate::lyrics::models::{Candidate, MatchRule, Query};
use crate::lyrics::xml::XmlCursor;

/// Number of leading title characters compared by the fuzzy rule.
pub const FUZZY_PREFIX_CHARS: usize = 5;

/// Decide whether `candidate` answers `query`. Rules are tried in order and
/// the first that holds wins.
pub fn match_candidate(candidate: &Candidate, query: &Query) -> Option<MatchRule> {
    if candidate.exact_match {
        return Some(MatchRule::ExactFlag);
    }

    if !candidate.artist.eq_ignore_ascii_case(&query.artist) {
        return None;
    }

    if candidate.title.eq_ignore_ascii_case(&query.title) {
        return Some(MatchRule::Full);
    }

    // Titles shorter than the prefix only match when the whole prefix agrees,
    // so "Yes" does not match "Yesterday".
    if prefix(&candidate.title).eq_ignore_ascii_case(prefix(&query.title)) {
        return Some(MatchRule::FuzzyTitle);
    }

    None
}

fn prefix(text: &str) -> &str {
    match text.char_indices().nth(FUZZY_PREFIX_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Scan a search document and return the first entry the policy accepts.
///
/// Entries without a handle id are skipped since their lyrics cannot be
/// fetched. `Ok(None)` means the document held no acceptable entry.
pub fn first_accepted(
    document: &str,
    query: &Query,
) -> Result<Option<(Candidate, MatchRule)>, XmlError> {
    let mut cursor = XmlCursor::parse(document)?;

    if !cursor.seek("response") {
        return Err(XmlError::MissingNode {
            parent: "document",
            name: "response",
        });
    }
    let code = cursor.attribute("code").map(str::to_string);
    let status = cursor.read_text();
    debug!(code = ?code, status = ?status, "search response");

    while cursor.seek("result") {
        let candidate = read_candidate(&mut cursor)?;
        debug!(
            hid = ?candidate.handle_id,
            title = %candidate.title,
            artist = %candidate.artist,
            exact = candidate.exact_match,
            "search candidate"
        );

        if candidate.handle_id.is_none() {
            warn!(title = %candidate.title, "skipping search result without hid");
            continue;
        }

        if let Some(rule) = match_candidate(&candidate, query) {
            debug!(?rule, title = %candidate.title, "accepted candidate");
            return Ok(Some((candidate, rule)));
        }
    }

    Ok(None)
}

/// Read the `<result>` element under the cursor.
fn read_candidate(cursor: &mut XmlCursor) -> Result<Candidate, XmlError> {
    let scope = cursor.depth().unwrap_or_default();
    let handle_id = cursor
        .attribute("hid")
        .map(str::trim)
        .filter(|hid| !hid.is_empty())
        .map(str::to_string);
    let exact_match = cursor.attribute("exactMatch") == Some("true");

    let mut title = None;
    let mut artist = None;
    while title.is_none() || artist.is_none() {
        let Some(name) = cursor.next_element_within(scope) else {
            break;
        };
        match name.as_str() {
            "title" if title.is_none() => title = Some(cursor.read_text().unwrap_or_default()),
            "artist" if artist.is_none() => artist = Some(cursor.read_text().unwrap_or_default()),
            _ => {}
        }
    }

    let title = title.ok_or(XmlError::MissingNode {
        parent: "result",
        name: "title",
    })?;
    let artist = artist.ok_or(XmlError::MissingNode {
        parent: "result",
        name: "artist",
    })?;

    Ok(Candidate {
        handle_id,
        title,
        artist,
        exact_match,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(artist: &str, title: &str, exact: bool) -> Candidate {
        Candidate {
            handle_id: Some("hid".to_string()),
            title: title.to_string(),
            artist: artist.to_string(),
            exact_match: exact,
        }
    }

    fn result_xml(hid: Option<&str>, exact: bool, title: &str, artist: &str) -> String {
        let hid = hid.map(|h| format!(r#" hid="{h}""#)).unwrap_or_default();
        format!(
            r#"<result id="1"{hid} exactMatch="{exact}">
      <title>{title}</title>
      <feat/>
      <artist>
        <name>{artist}</name>
      </artist>
    </result>"#
        )
    }

    fn document(results: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<leoslyrics>
  <response code="0">SUCCESS</response>
  <searchResults>
    {}
  </searchResults>
</leoslyrics>"#,
            results.join("\n    ")
        )
    }

    #[test]
    fn test_exact_flag_wins_regardless_of_text() {
        let c = candidate("Somebody Else", "Another Song", true);
        let q = Query::new("The Beatles", "Let It Be");
        assert_eq!(match_candidate(&c, &q), Some(MatchRule::ExactFlag));
    }

    #[test]
    fn test_full_match_ignores_case() {
        let c = candidate("The Beatles", "Let It Be", false);
        let q = Query::new("the beatles", "let it be");
        assert_eq!(match_candidate(&c, &q), Some(MatchRule::Full));
    }

    #[test]
    fn test_fuzzy_title_prefix() {
        let q = Query::new("The Beatles", "Yesterday");
        let c = candidate("the beatles", "YESTErday (Remastered 2009)", false);
        assert_eq!(match_candidate(&c, &q), Some(MatchRule::FuzzyTitle));

        let c = candidate("the beatles", "Yeste", false);
        assert_eq!(match_candidate(&c, &q), Some(MatchRule::FuzzyTitle));
    }

    #[test]
    fn test_fuzzy_needs_matching_artist() {
        let q = Query::new("The Beatles", "Yesterday");
        let c = candidate("Boyz II Men", "Yesterday", false);
        assert_eq!(match_candidate(&c, &q), None);
    }

    #[test]
    fn test_short_titles_compare_whole_prefix() {
        let q = Query::new("Yes", "Yes");
        assert_eq!(
            match_candidate(&candidate("Yes", "Yesterday", false), &q),
            None
        );
        assert_eq!(
            match_candidate(&candidate("yes", "YES", false), &q),
            Some(MatchRule::Full)
        );
    }

    #[test]
    fn test_prefix_respects_char_boundaries() {
        assert_eq!(prefix("Björk's song"), "Björk");
        assert_eq!(prefix("ab"), "ab");
        assert_eq!(prefix(""), "");
    }

    #[test]
    fn test_rejects_unrelated() {
        let c = candidate("The Beatles", "Help!", false);
        let q = Query::new("The Beatles", "Let It Be");
        assert_eq!(match_candidate(&c, &q), None);
    }

    #[test]
    fn test_first_accepted_reads_candidate_fields() {
        let doc = document(&[result_xml(Some("H1"), true, " Let It Be ", "The Beatles")]);
        let (c, rule) = first_accepted(&doc, &Query::new("x", "y")).unwrap().unwrap();
        assert_eq!(rule, MatchRule::ExactFlag);
        assert_eq!(c.handle_id.as_deref(), Some("H1"));
        assert_eq!(c.title, "Let It Be");
        assert_eq!(c.artist, "The Beatles");
        assert!(c.exact_match);
    }

    #[test]
    fn test_first_accepted_stops_at_first_match() {
        let doc = document(&[
            result_xml(Some("H1"), false, "Help!", "The Beatles"),
            result_xml(Some("H2"), false, "Let It Be", "The Beatles"),
            result_xml(Some("H3"), true, "Let It Be", "The Beatles"),
        ]);
        let (c, rule) = first_accepted(&doc, &Query::new("The Beatles", "Let It Be"))
            .unwrap()
            .unwrap();
        assert_eq!(c.handle_id.as_deref(), Some("H2"));
        assert_eq!(rule, MatchRule::Full);
    }

    #[test]
    fn test_first_accepted_skips_missing_hid() {
        let doc = document(&[
            result_xml(None, true, "Let It Be", "The Beatles"),
            result_xml(Some("H2"), false, "Let It Be", "The Beatles"),
        ]);
        let (c, _) = first_accepted(&doc, &Query::new("The Beatles", "Let It Be"))
            .unwrap()
            .unwrap();
        assert_eq!(c.handle_id.as_deref(), Some("H2"));
    }

    #[test]
    fn test_first_accepted_none() {
        let doc = document(&[result_xml(Some("H1"), false, "Help!", "The Beatles")]);
        assert!(first_accepted(&doc, &Query::new("Oasis", "Wonderwall")).unwrap().is_none());

        let empty = document(&[]);
        assert!(first_accepted(&empty, &Query::new("Oasis", "Wonderwall")).unwrap().is_none());
    }

    #[test]
    fn test_direct_artist_text() {
        let doc = document(&[r#"<result hid="H1" exactMatch="false"><title>Wonderwall</title><artist>Oasis</artist></result>"#.to_string()]);
        let (c, rule) = first_accepted(&doc, &Query::new("oasis", "wonderwall")).unwrap().unwrap();
        assert_eq!(c.artist, "Oasis");
        assert_eq!(rule, MatchRule::Full);
    }

    #[test]
    fn test_artist_before_title() {
        let doc = document(&[r#"<result hid="H1" exactMatch="false"><artist><name>Oasis</name></artist><title>Wonderwall</title></result>"#.to_string()]);
        let (c, rule) = first_accepted(&doc, &Query::new("oasis", "wonderwall")).unwrap().unwrap();
        assert_eq!(c.title, "Wonderwall");
        assert_eq!(c.artist, "Oasis");
        assert_eq!(rule, MatchRule::Full);
    }

    #[test]
    fn test_missing_structure_is_reported() {
        let no_response = "<leoslyrics><searchResults/></leoslyrics>";
        assert!(matches!(
            first_accepted(no_response, &Query::new("a", "b")),
            Err(XmlError::MissingNode { name: "response", .. })
        ));

        let no_artist = document(&[r#"<result hid="H1"><title>Song</title></result>"#.to_string()]);
        assert!(matches!(
            first_accepted(&no_artist, &Query::new("a", "b")),
            Err(XmlError::MissingNode { name: "artist", .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            first_accepted("<leoslyrics><response>", &Query::new("a", "b")),
            Err(XmlError::Malformed(_))
        ));
    }
}
