//! Last-resort strategy: scraping the watch page.
//!
//! Fetches the watch page HTML with a browser user agent, locates the
//! embedded player JSON blob, extracts the caption track list, then fetches
//! the chosen track's base URL, which serves timed XML markup.

use super::{select_track, AcquisitionStrategy};
use crate::config::AcquisitionSettings;
use crate::error::{Result, TekstError};
use crate::parser::parse_timedtext;
use crate::transcript::{CaptionTrack, TrackKind, Transcript};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Primary embedding location of the player blob.
const PRIMARY_MARKER: &str = "var ytInitialPlayerResponse = ";
/// Alternate embedding used on some page variants.
const FALLBACK_MARKER: &str = "window[\"ytInitialPlayerResponse\"] = ";

/// Strategy backed by watch-page scraping.
pub struct WatchPageStrategy {
    client: reqwest::Client,
    settings: AcquisitionSettings,
}

impl WatchPageStrategy {
    pub fn new(client: reqwest::Client, settings: AcquisitionSettings) -> Self {
        Self { client, settings }
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let html = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }

    fn player_blob(&self, html: &str) -> Result<Value> {
        extract_player_json(html).ok_or_else(|| {
            TekstError::UpstreamResponse("player blob not found in watch page".to_string())
        })
    }
}

#[async_trait]
impl AcquisitionStrategy for WatchPageStrategy {
    fn name(&self) -> &'static str {
        "watch-page"
    }

    async fn attempt(
        &self,
        video_id: &str,
        preferred_language: Option<&str>,
    ) -> Result<Transcript> {
        let html = self.fetch_watch_page(video_id).await?;
        let player = self.player_blob(&html)?;

        let (title, reported_length, tracks) = decode_player_blob(&player);
        debug!(video_id, tracks = tracks.len(), "watch page listed caption tracks");

        let track = select_track(&tracks, preferred_language, &self.settings)
            .ok_or_else(|| TekstError::NoCaptions(format!("no tracks embedded for {}", video_id)))?;

        let payload = self
            .client
            .get(&track.base_url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_timedtext(&payload)?;
        if segments.is_empty() {
            return Err(TekstError::CaptionParse(format!(
                "track '{}' produced no segments",
                track.language_code
            )));
        }

        Ok(Transcript::assemble(
            video_id,
            title.unwrap_or_else(|| video_id.to_string()),
            track.language_code.clone(),
            segments,
            reported_length,
        ))
    }

    async fn discover(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let html = self.fetch_watch_page(video_id).await?;
        let player = self.player_blob(&html)?;
        let (_, _, tracks) = decode_player_blob(&player);
        Ok(tracks)
    }
}

/// Locate and decode the embedded player JSON, trying the primary marker
/// first.
///
/// The blob is followed by arbitrary script text, so there is no reliable
/// textual terminator. A stream deserializer reads exactly one JSON value
/// from the prefix and ignores whatever trails it.
fn extract_player_json(html: &str) -> Option<Value> {
    for marker in [PRIMARY_MARKER, FALLBACK_MARKER] {
        if let Some(idx) = html.find(marker) {
            let rest = &html[idx + marker.len()..];
            let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
            if let Some(Ok(value)) = stream.next() {
                return Some(value);
            }
        }
    }
    None
}

/// Pull title, reported length, and caption tracks out of the player blob.
fn decode_player_blob(player: &Value) -> (Option<String>, Option<u64>, Vec<CaptionTrack>) {
    let details = player.get("videoDetails");
    let title = details
        .and_then(|d| d.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let reported_length = details
        .and_then(|d| d.get("lengthSeconds"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());

    let tracks = player
        .get("captions")
        .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
        .and_then(|r| r.get("captionTracks"))
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(|t| {
                    let base_url = t.get("baseUrl")?.as_str()?.replace("\\u0026", "&");
                    let language_code = t.get("languageCode")?.as_str()?.to_string();
                    let kind = match t.get("kind").and_then(Value::as_str) {
                        Some("asr") => TrackKind::Auto,
                        Some(_) => TrackKind::Translated,
                        None => TrackKind::Manual,
                    };
                    Some(CaptionTrack {
                        language_code,
                        kind,
                        base_url,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    (title, reported_length, tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_primary_marker() {
        let html = r#"<script>var ytInitialPlayerResponse = {"a":1};</script><p>rest</p>"#;
        assert_eq!(extract_player_json(html), Some(json!({"a": 1})));
    }

    #[test]
    fn test_extract_fallback_marker() {
        let html = r#"<script>window["ytInitialPlayerResponse"] = {"b":2};</script>"#;
        assert_eq!(extract_player_json(html), Some(json!({"b": 2})));
    }

    #[test]
    fn test_extract_without_script_terminator() {
        let html = r#"var ytInitialPlayerResponse = {"c":3}"#;
        assert_eq!(extract_player_json(html), Some(json!({"c": 3})));
    }

    #[test]
    fn test_extract_ignores_trailing_script_statements() {
        // The blob's own script tag can carry more statements after the
        // assignment, so extraction must stop at the end of the JSON value.
        let html = concat!(
            r#"<script>var ytInitialPlayerResponse = {"a":1,"b":"x;y"};"#,
            r#"var meta = {"x":2};</script>"#
        );
        assert_eq!(
            extract_player_json(html),
            Some(json!({"a": 1, "b": "x;y"}))
        );
    }

    #[test]
    fn test_no_marker_returns_none() {
        assert_eq!(extract_player_json("<html><body>consent page</body></html>"), None);
    }

    #[test]
    fn test_unparseable_blob_returns_none() {
        assert_eq!(
            extract_player_json("var ytInitialPlayerResponse = not json at all"),
            None
        );
    }

    #[test]
    fn test_decode_player_blob() {
        let player = json!({
            "videoDetails": {"title": "Scraped", "lengthSeconds": "95"},
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        {"baseUrl": "https://t.example/x", "languageCode": "en", "kind": "asr"},
                        {"baseUrl": "https://t.example/y", "languageCode": "de"}
                    ]
                }
            }
        });

        let (title, length, tracks) = decode_player_blob(&player);
        assert_eq!(title.as_deref(), Some("Scraped"));
        assert_eq!(length, Some(95));
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].kind, TrackKind::Auto);
        assert_eq!(tracks[1].kind, TrackKind::Manual);
    }

    #[test]
    fn test_decode_blob_without_captions() {
        let (title, _, tracks) = decode_player_blob(&json!({"videoDetails": {"title": "x"}}));
        assert_eq!(title.as_deref(), Some("x"));
        assert!(tracks.is_empty());
    }
}
