//! Fallback strategy: third-party community proxy services.
//!
//! A short list of HTTP services that independently resolve caption data for
//! a video ID. Response shapes vary per service, so decoding is adaptive: a
//! bare array of events, an object with a `transcript` field, or an object
//! with a `segments` field, with explicit per-field name fallbacks. The
//! fallbacks go through `Option` rather than truthiness so a legitimate
//! `start` of 0 is never treated as missing.

use super::AcquisitionStrategy;
use crate::config::AcquisitionSettings;
use crate::error::{Result, TekstError};
use crate::parser::normalize_text;
use crate::transcript::{CaptionTrack, Transcript, TranscriptSegment};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Strategy backed by community caption proxy services.
pub struct ProxyServicesStrategy {
    client: reqwest::Client,
    settings: AcquisitionSettings,
}

impl ProxyServicesStrategy {
    pub fn new(client: reqwest::Client, settings: AcquisitionSettings) -> Self {
        Self { client, settings }
    }

    async fn fetch_service(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .send()
            .await
            .map_err(|e| TekstError::CaptionSource(format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| TekstError::CaptionSource(format!("service rejected request: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| TekstError::CaptionSource(format!("response was not JSON: {}", e)))
    }
}

#[async_trait]
impl AcquisitionStrategy for ProxyServicesStrategy {
    fn name(&self) -> &'static str {
        "proxy-services"
    }

    async fn attempt(
        &self,
        video_id: &str,
        preferred_language: Option<&str>,
    ) -> Result<Transcript> {
        for template in &self.settings.proxy_services {
            let url = template.replace("{video_id}", video_id);

            let value = match self.fetch_service(&url).await {
                Ok(value) => value,
                Err(e) => {
                    warn!(url = %url, error = %e, "proxy service request failed");
                    continue;
                }
            };

            match decode_payload(&value) {
                Some(decoded) if !decoded.segments.is_empty() => {
                    debug!(url = %url, segments = decoded.segments.len(), "proxy service produced segments");
                    let language = decoded
                        .language
                        .or_else(|| preferred_language.map(str::to_string))
                        .unwrap_or_else(|| self.settings.default_language.clone());
                    let title = decoded.title.unwrap_or_else(|| video_id.to_string());

                    return Ok(Transcript::assemble(
                        video_id,
                        title,
                        language,
                        decoded.segments,
                        None,
                    ));
                }
                _ => {
                    warn!(url = %url, "proxy service response had no usable segments");
                }
            }
        }

        Err(TekstError::NoCaptions(format!(
            "no proxy service produced captions for {}",
            video_id
        )))
    }

    async fn discover(&self, _video_id: &str) -> Result<Vec<CaptionTrack>> {
        // Proxy services resolve captions directly; they never expose the
        // track list.
        Err(TekstError::NoCaptions(
            "proxy services do not expose track discovery".to_string(),
        ))
    }
}

/// Segments plus whatever metadata the service happened to include.
struct DecodedPayload {
    title: Option<String>,
    language: Option<String>,
    segments: Vec<TranscriptSegment>,
}

/// Decode a proxy response of unknown shape.
fn decode_payload(value: &Value) -> Option<DecodedPayload> {
    let events = events_array(value)?;

    let mut segments = Vec::new();
    for item in events {
        if let Some(segment) = decode_event(item, segments.len() + 1) {
            segments.push(segment);
        }
    }

    Some(DecodedPayload {
        title: string_field(value, &["title", "videoTitle"]),
        language: string_field(value, &["language", "lang"]),
        segments,
    })
}

/// Locate the event list: bare array first, then the known wrapper fields.
fn events_array(value: &Value) -> Option<&Vec<Value>> {
    value
        .as_array()
        .or_else(|| value.get("transcript").and_then(Value::as_array))
        .or_else(|| value.get("segments").and_then(Value::as_array))
}

fn decode_event(item: &Value, ordinal: usize) -> Option<TranscriptSegment> {
    let text = normalize_text(
        item.get("text")
            .or_else(|| item.get("content"))
            .and_then(Value::as_str)?,
    );
    if text.is_empty() {
        return None;
    }

    // `start` may legitimately be 0; these chains must not drop it.
    let start = number_field(item, "start").or_else(|| number_field(item, "offset"))?;
    let duration = number_field(item, "duration")
        .or_else(|| number_field(item, "dur"))
        .unwrap_or(0.0);

    let mut segment = TranscriptSegment::new(ordinal.to_string(), start, start + duration, text);
    segment.confidence = number_field(item, "confidence").filter(|c| (0.0..=1.0).contains(c));
    Some(segment)
}

/// Read a numeric field, accepting both JSON numbers and numeric strings.
fn number_field(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| value.get(k).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_bare_array_shape() {
        let value = json!([
            {"text": "Hello", "start": 0.0, "duration": 2.0},
            {"text": "world", "start": 2.0, "duration": 1.5}
        ]);

        let decoded = decode_payload(&value).unwrap();
        assert_eq!(decoded.segments.len(), 2);
        assert_eq!(decoded.segments[0].id, "1");
        assert_eq!(decoded.segments[0].start, 0.0);
        assert_eq!(decoded.segments[1].end, 3.5);
    }

    #[test]
    fn test_decode_transcript_field_shape() {
        let value = json!({
            "title": "Demo video",
            "transcript": [{"text": "Hi", "offset": 1.0, "dur": 2.0}]
        });

        let decoded = decode_payload(&value).unwrap();
        assert_eq!(decoded.title.as_deref(), Some("Demo video"));
        assert_eq!(decoded.segments[0].start, 1.0);
        assert_eq!(decoded.segments[0].end, 3.0);
    }

    #[test]
    fn test_decode_segments_field_shape() {
        let value = json!({
            "language": "en",
            "segments": [{"content": "Hi", "start": "4.5", "duration": "0.5"}]
        });

        let decoded = decode_payload(&value).unwrap();
        assert_eq!(decoded.language.as_deref(), Some("en"));
        assert_eq!(decoded.segments[0].start, 4.5);
        assert_eq!(decoded.segments[0].end, 5.0);
    }

    #[test]
    fn test_zero_start_is_not_treated_as_missing() {
        let value = json!([{"text": "At zero", "start": 0, "duration": 1}]);
        let decoded = decode_payload(&value).unwrap();

        assert_eq!(decoded.segments.len(), 1);
        assert_eq!(decoded.segments[0].start, 0.0);
    }

    #[test]
    fn test_event_without_any_start_field_is_dropped() {
        let value = json!([
            {"text": "no timing"},
            {"text": "timed", "start": 1.0}
        ]);
        let decoded = decode_payload(&value).unwrap();

        assert_eq!(decoded.segments.len(), 1);
        assert_eq!(decoded.segments[0].id, "1");
        assert_eq!(decoded.segments[0].text, "timed");
    }

    #[test]
    fn test_confidence_only_kept_when_in_range() {
        let value = json!([
            {"text": "a", "start": 0.0, "confidence": 0.93},
            {"text": "b", "start": 1.0, "confidence": 7.0}
        ]);
        let decoded = decode_payload(&value).unwrap();

        assert_eq!(decoded.segments[0].confidence, Some(0.93));
        assert_eq!(decoded.segments[1].confidence, None);
    }

    #[test]
    fn test_unrecognized_shape_yields_none() {
        assert!(decode_payload(&json!({"error": "not found"})).is_none());
        assert!(decode_payload(&json!("plain string")).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_services_decline() {
        use crate::config::AcquisitionSettings;
        use crate::strategy::AcquisitionStrategy;

        let settings = AcquisitionSettings {
            // Nothing listens on port 1; the request fails immediately.
            proxy_services: vec!["http://127.0.0.1:1/{video_id}".to_string()],
            ..AcquisitionSettings::default()
        };
        let strategy = ProxyServicesStrategy::new(reqwest::Client::new(), settings);

        let err = strategy.attempt("abc123", None).await.unwrap_err();
        assert!(matches!(err, TekstError::NoCaptions(_)));
    }
}
