//! Caption payload parsers.
//!
//! Three pure, stateless parsers that turn raw caption payloads into the
//! canonical segment sequence: a structured JSON event stream (`json3`),
//! WebVTT cue text, and timed XML markup. Each parser assigns segment IDs as
//! the 1-based ordinal of emission order without re-sorting, and silently
//! drops segments whose trimmed text is empty.

mod events;
mod timedtext;
mod vtt;

pub use events::parse_events;
pub use timedtext::parse_timedtext;
pub use vtt::parse_vtt;

/// Collapse embedded newlines to single spaces and trim.
pub(crate) fn normalize_text(raw: &str) -> String {
    raw.replace('\n', " ").trim().to_string()
}
