//! Video ID extraction from YouTube URLs.
//!
//! Purely syntactic; no network access. The extractor deliberately does not
//! validate ID length or charset, since upstream accepts IDs that look
//! malformed by the usual 11-character rule.

/// URL shape prefixes tried in order. The first match wins.
const URL_MARKERS: [&str; 4] = ["watch?v=", "youtu.be/", "embed/", "/v/"];

/// Extract a video ID from a URL string.
///
/// The ID runs from the first matched marker to the first `&`, `?`, `#`, or
/// newline. Matching is case-sensitive. Returns `None` when no shape matches;
/// callers must treat that as a normal outcome, not an error.
pub fn extract_video_id(input: &str) -> Option<String> {
    for marker in URL_MARKERS {
        if let Some((_, rest)) = input.split_once(marker) {
            let id: &str = rest
                .split(['&', '?', '#', '\n'])
                .next()
                .unwrap_or(rest);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }
    None
}
