//! Canonical transcript data model.
//!
//! A `Transcript` is assembled atomically by the acquirer once a strategy
//! succeeds and is immutable afterwards. The core holds no state between
//! acquisitions; ownership of the transcript passes to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorship kind of a caption track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Manually authored by the uploader.
    Manual,
    /// Auto-generated speech recognition track.
    Auto,
    /// Machine-translated from another track.
    Translated,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Manual => write!(f, "manual"),
            TrackKind::Auto => write!(f, "auto"),
            TrackKind::Translated => write!(f, "translated"),
        }
    }
}

/// One available caption track, as discovered by a strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// BCP-47-ish language code as reported upstream (e.g. "en", "en-US").
    pub language_code: String,
    /// Authorship kind.
    pub kind: TrackKind,
    /// Opaque locator for fetching the raw caption payload.
    pub base_url: String,
}

/// A single timed span of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// 1-based ordinal of emission order, assigned by the parser.
    pub id: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (>= start).
    pub end: f64,
    /// Segment text, non-empty after trimming.
    pub text: String,
    /// Recognition confidence, when upstream reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TranscriptSegment {
    pub fn new(id: String, start: f64, end: f64, text: String) -> Self {
        Self {
            id,
            start,
            end,
            text,
            confidence: None,
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A complete fetched transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Synthetic ID: video ID plus generation timestamp. Not stable across
    /// refetches of the same video.
    pub id: String,
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Video title as reported upstream.
    pub title: String,
    /// Total duration in seconds.
    pub duration: u64,
    /// Language code of the resolved track.
    pub language: String,
    /// Timed segments in upstream emission order.
    pub segments: Vec<TranscriptSegment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Assemble a transcript from a successful strategy result.
    ///
    /// Duration comes from the last segment's end, ceiling-rounded to a whole
    /// second, falling back to the platform-reported length when there are no
    /// segments to read it from.
    pub fn assemble(
        video_id: &str,
        title: String,
        language: String,
        segments: Vec<TranscriptSegment>,
        reported_length: Option<u64>,
    ) -> Self {
        let now = Utc::now();
        let duration = segments
            .last()
            .map(|s| s.end.ceil() as u64)
            .or(reported_length)
            .unwrap_or(0);

        Self {
            id: format!("{}-{}", video_id, now.timestamp_millis()),
            video_id: video_id.to_string(),
            title,
            duration,
            language,
            segments,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full text of the transcript, segments joined with spaces.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
