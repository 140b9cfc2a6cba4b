//! Primary strategy: the platform's internal player metadata endpoint.
//!
//! Issues the same request the web client makes to `youtubei/v1/player`,
//! reads the caption track list plus title and length from the response, then
//! fetches the selected track as a json3 event stream.

use super::{select_track, AcquisitionStrategy};
use crate::config::AcquisitionSettings;
use crate::error::{Result, TekstError};
use crate::parser::parse_events;
use crate::transcript::{CaptionTrack, TrackKind, Transcript};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";
const REFERER: &str = "https://www.youtube.com/";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<Captions>,
    video_details: Option<VideoDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: String,
    /// The endpoint reports this as a decimal string.
    length_seconds: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    kind: Option<String>,
}

impl RawCaptionTrack {
    fn into_track(self) -> CaptionTrack {
        let kind = match self.kind.as_deref() {
            Some("asr") => TrackKind::Auto,
            Some(_) => TrackKind::Translated,
            None => TrackKind::Manual,
        };
        CaptionTrack {
            language_code: self.language_code,
            kind,
            // Track URLs arrive with JSON-escaped ampersands.
            base_url: self.base_url.replace("\\u0026", "&"),
        }
    }
}

fn decode_tracks(captions: Option<Captions>) -> Vec<CaptionTrack> {
    captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default()
        .into_iter()
        .map(RawCaptionTrack::into_track)
        .collect()
}

/// Strategy backed by the internal player endpoint.
pub struct PlayerApiStrategy {
    client: reqwest::Client,
    settings: AcquisitionSettings,
}

impl PlayerApiStrategy {
    pub fn new(client: reqwest::Client, settings: AcquisitionSettings) -> Self {
        Self { client, settings }
    }

    async fn fetch_player_response(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<PlayerResponse> {
        let url = format!("{}?key={}", PLAYER_ENDPOINT, self.settings.player_api_key);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "WEB",
                    "clientVersion": self.settings.player_client_version,
                    "hl": language,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .header(reqwest::header::REFERER, REFERER)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AcquisitionStrategy for PlayerApiStrategy {
    fn name(&self) -> &'static str {
        "player-api"
    }

    async fn attempt(
        &self,
        video_id: &str,
        preferred_language: Option<&str>,
    ) -> Result<Transcript> {
        let hl = preferred_language.unwrap_or(&self.settings.default_language);
        let player = self.fetch_player_response(video_id, hl).await?;

        let details = player.video_details.ok_or_else(|| {
            TekstError::UpstreamResponse("player response is missing video details".to_string())
        })?;

        let tracks = decode_tracks(player.captions);
        debug!(video_id, tracks = tracks.len(), "player endpoint listed caption tracks");

        let track = select_track(&tracks, preferred_language, &self.settings)
            .ok_or_else(|| TekstError::NoCaptions(format!("no tracks listed for {}", video_id)))?;

        let payload_url = format!("{}&fmt=json3", track.base_url);
        let payload = self
            .client
            .get(&payload_url)
            .header(reqwest::header::USER_AGENT, &self.settings.user_agent)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_events(&payload)?;
        if segments.is_empty() {
            return Err(TekstError::CaptionParse(format!(
                "track '{}' produced no segments",
                track.language_code
            )));
        }

        let reported_length = details
            .length_seconds
            .as_deref()
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Transcript::assemble(
            video_id,
            details.title,
            track.language_code.clone(),
            segments,
            reported_length,
        ))
    }

    async fn discover(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let player = self
            .fetch_player_response(video_id, &self.settings.default_language)
            .await?;
        Ok(decode_tracks(player.captions))
    }
}
