//! Structured-event (json3) caption parser.

use super::normalize_text;
use crate::error::{Result, TekstError};
use crate::transcript::TranscriptSegment;
use serde::Deserialize;

#[derive(Deserialize)]
struct EventStream {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

/// One timed event. The stream interleaves caption events with window
/// metadata events that carry no `segs`, so every field is optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionEvent {
    t_start_ms: Option<u64>,
    d_duration_ms: Option<u64>,
    segs: Option<Vec<TextFragment>>,
}

#[derive(Deserialize)]
struct TextFragment {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 event-stream payload into segments.
///
/// Events without text fragments (window metadata, empty cues) are dropped
/// entirely rather than emitted as blank segments.
pub fn parse_events(raw: &str) -> Result<Vec<TranscriptSegment>> {
    let stream: EventStream = serde_json::from_str(raw)
        .map_err(|e| TekstError::CaptionParse(format!("invalid json3 payload: {}", e)))?;

    let mut segments = Vec::new();
    for event in stream.events {
        let Some(segs) = event.segs else { continue };

        let text = normalize_text(
            &segs
                .iter()
                .map(|s| s.utf8.as_str())
                .collect::<String>(),
        );
        if text.is_empty() {
            continue;
        }

        let start_ms = event.t_start_ms.unwrap_or(0);
        let duration_ms = event.d_duration_ms.unwrap_or(0);
        let start = start_ms as f64 / 1000.0;
        let end = (start_ms + duration_ms) as f64 / 1000.0;

        segments.push(TranscriptSegment::new(
            (segments.len() + 1).to_string(),
            start,
            end,
            text,
        ));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_events() {
        let raw = r#"{"events":[
            {"tStartMs":0,"dDurationMs":3000,"segs":[{"utf8":"Hi"}]},
            {"tStartMs":3000,"dDurationMs":0,"segs":[]}
        ]}"#;

        let segments = parse_events(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "1");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 3.0);
        assert_eq!(segments[0].text, "Hi");
    }

    #[test]
    fn test_fragments_concatenated_and_newlines_replaced() {
        let raw = r#"{"events":[
            {"tStartMs":1000,"dDurationMs":2000,"segs":[{"utf8":"Hello"},{"utf8":"\nworld"}]}
        ]}"#;

        let segments = parse_events(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Hello world");
    }

    #[test]
    fn test_metadata_events_without_segs_are_dropped() {
        let raw = r#"{"events":[
            {"id":1,"wpWinPosId":2},
            {"tStartMs":500,"dDurationMs":1500,"segs":[{"utf8":"Text"}]}
        ]}"#;

        let segments = parse_events(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, "1");
        assert_eq!(segments[0].start, 0.5);
    }

    #[test]
    fn test_whitespace_only_events_are_dropped() {
        let raw = r#"{"events":[
            {"tStartMs":0,"dDurationMs":1000,"segs":[{"utf8":"\n"}]},
            {"tStartMs":1000,"dDurationMs":1000,"segs":[{"utf8":" ok "}]}
        ]}"#;

        let segments = parse_events(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "ok");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = r#"{"events":[{"tStartMs":0,"dDurationMs":1000,"segs":[{"utf8":"a"}]}]}"#;
        assert_eq!(parse_events(raw).unwrap(), parse_events(raw).unwrap());
    }

    #[test]
    fn test_invalid_payload_is_an_error() {
        assert!(parse_events("<html>blocked</html>").is_err());
    }
}
