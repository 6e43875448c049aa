//! Full-lyric documents.
//!
//! ```text
//! <leoslyrics>
//!   <response code="0">SUCCESS</response>
//!   <lyric hid="...">
//!     <title>...</title>
//!     <artist><name>...</name></artist>
//!     <writer>...</writer>
//!     <text>...</text>
//!   </lyric>
//! </leoslyrics>
//! ```

use tracing::debug;

use crate::lyrics::error::XmlError;
use crate::lyrics::models::LyricRecord;
use crate::lyrics::xml::{Step, XmlCursor};

/// Fill `record` with the writer credit and lyric body from `document`.
///
/// Every `<writer>` seen before the first `<text>` is captured, the last one
/// winning. Scanning stops at the first `<text>`.
pub fn fill_record(document: &str, record: &mut LyricRecord) -> Result<(), XmlError> {
    let mut cursor = XmlCursor::parse(document)?;

    loop {
        if let Step::EndOfDocument = cursor.advance() {
            break;
        }
        let name = cursor.current_name().to_string();
        match name.as_str() {
            "response" => {
                let code = cursor.attribute("code").map(str::to_string);
                let status = cursor.read_text();
                debug!(code = ?code, status = ?status, "lyric response");
            }
            "writer" => record.writer = cursor.read_text(),
            "text" => {
                record.body = cursor.read_text();
                break;
            }
            _ => {}
        }
    }

    debug!(
        hid = %record.handle_id,
        writer = ?record.writer,
        has_body = record.body.is_some(),
        "parsed lyric document"
    );
    Ok(())
}

/// Build a record from a lyric document alone, taking title and artist from
/// the `<lyric>` entry itself.
pub fn parse_record(document: &str, handle_id: &str) -> Result<LyricRecord, XmlError> {
    let mut cursor = XmlCursor::parse(document)?;
    let mut record = LyricRecord::new(handle_id, "", "");

    if cursor.seek("lyric") {
        let scope = cursor.depth().unwrap_or_default();
        if cursor.seek_within("title", scope) {
            record.title = cursor.read_text().unwrap_or_default();
        }
        if cursor.seek_within("artist", scope) {
            record.artist = cursor.read_text().unwrap_or_default();
        }
    }

    fill_record(document, &mut record)?;
    Ok(record)
}
