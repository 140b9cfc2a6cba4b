//! Timed-XML caption markup parser.
//!
//! Handles the legacy timedtext format served from a track's base URL:
//! `<text start="1.0" dur="2.0">entity-encoded text</text>` nodes. Payloads
//! are entity-encoded, so unescaping is mandatory.

use super::normalize_text;
use crate::error::{Result, TekstError};
use crate::transcript::TranscriptSegment;
use regex::Regex;
use std::sync::OnceLock;

fn text_node_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<text start="([^"]+)" dur="([^"]+)"[^>]*>([^<]*)</text>"#)
            .expect("Invalid regex")
    })
}

/// Parse a timedtext XML payload into segments.
pub fn parse_timedtext(raw: &str) -> Result<Vec<TranscriptSegment>> {
    let mut segments = Vec::new();

    for caps in text_node_regex().captures_iter(raw) {
        let start: f64 = caps[1]
            .parse()
            .map_err(|_| TekstError::CaptionParse(format!("invalid start attribute: {}", &caps[1])))?;
        let dur: f64 = caps[2]
            .parse()
            .map_err(|_| TekstError::CaptionParse(format!("invalid dur attribute: {}", &caps[2])))?;

        let text = normalize_text(&unescape_entities(&caps[3]));
        if text.is_empty() {
            continue;
        }

        segments.push(TranscriptSegment::new(
            (segments.len() + 1).to_string(),
            start,
            start + dur,
            text,
        ));
    }

    Ok(segments)
}

/// Decode the entities the timedtext endpoint actually emits.
///
/// `&amp;` must be decoded last so that double-encoded sequences like
/// `&amp;lt;` come out as the literal `&lt;` rather than `<`.
fn unescape_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
