//! Caption acquisition strategies.
//!
//! Each strategy obtains caption data from one kind of upstream source and
//! normalizes it into a [`Transcript`]. Strategies are tried in a fixed
//! priority order by the acquirer; an `Err` from `attempt` means the strategy
//! declined and the next one should be tried. Strategies perform outbound
//! network calls only and hold no mutable state.

mod player;
mod proxy;
mod scrape;

pub use player::PlayerApiStrategy;
pub use proxy::ProxyServicesStrategy;
pub use scrape::WatchPageStrategy;

use crate::config::AcquisitionSettings;
use crate::error::Result;
use crate::transcript::{CaptionTrack, TrackKind, Transcript};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for caption acquisition strategies.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to fetch and normalize a transcript for the given video.
    ///
    /// Any error is treated as "strategy declined" by the acquirer and never
    /// crosses the strategy boundary as a surfaced failure.
    async fn attempt(&self, video_id: &str, preferred_language: Option<&str>)
        -> Result<Transcript>;

    /// List the caption tracks this strategy can discover, without fetching
    /// any payload. Strategies whose upstream resolves captions directly and
    /// never exposes a track list decline here.
    async fn discover(&self, video_id: &str) -> Result<Vec<CaptionTrack>>;
}

/// Build the default strategy chain in priority order.
pub fn default_strategies(
    client: reqwest::Client,
    settings: &AcquisitionSettings,
) -> Vec<Arc<dyn AcquisitionStrategy>> {
    vec![
        Arc::new(PlayerApiStrategy::new(client.clone(), settings.clone())),
        Arc::new(ProxyServicesStrategy::new(client.clone(), settings.clone())),
        Arc::new(WatchPageStrategy::new(client, settings.clone())),
    ]
}

/// Select a caption track from a discovered track list.
///
/// This policy is cross-cutting and must behave identically in every
/// strategy:
///
/// 1. With a language preference: exact-match track that is not
///    auto-generated, else an exact-match auto-generated track, else the
///    first listed track.
/// 2. Without a preference: manually-authored track in the default language,
///    else a manually-authored track in the secondary language, else the
///    first listed track.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred: Option<&str>,
    settings: &AcquisitionSettings,
) -> Option<&'a CaptionTrack> {
    if tracks.is_empty() {
        return None;
    }

    if let Some(lang) = preferred {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.language_code == lang && t.kind != TrackKind::Auto)
        {
            return Some(track);
        }
        if let Some(track) = tracks.iter().find(|t| t.language_code == lang) {
            return Some(track);
        }
        // The preferred language has no track at all; the first listed track
        // is the terminal fallback, not the configured defaults.
        return tracks.first();
    }

    tracks
        .iter()
        .find(|t| t.kind == TrackKind::Manual && t.language_code == settings.default_language)
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.kind == TrackKind::Manual && t.language_code == settings.secondary_language)
        })
        .or_else(|| tracks.first())
}
