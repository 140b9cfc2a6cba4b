//! Transcript acquisition orchestrator.
//!
//! Tries the strategy chain in priority order, races the whole chain against
//! a single time limit, and returns either an assembled [`Transcript`] or a
//! classified [`AcquisitionFailure`]. Strategy-level failures are logged and
//! recovered locally; only total exhaustion or the timeout surfaces to the
//! caller.

use crate::config::{Environment, Settings};
use crate::error::{AcquisitionFailure, Result};
use crate::strategy::{default_strategies, AcquisitionStrategy};
use crate::transcript::{CaptionTrack, Transcript, TranscriptSegment};
use crate::video_id::extract_video_id;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Provider of a stand-in transcript when every strategy declines.
///
/// Installed only in non-production environments so surrounding tooling can
/// be exercised without live network access. Production builds never carry
/// one.
pub trait FallbackProvider: Send + Sync {
    fn placeholder(&self, video_id: &str) -> Transcript;
}

/// The fixed illustrative transcript used outside production.
pub struct SampleTranscriptProvider;

impl FallbackProvider for SampleTranscriptProvider {
    fn placeholder(&self, video_id: &str) -> Transcript {
        let lines = [
            (0.0, 3.5, "Welcome to this sample transcript."),
            (3.5, 7.0, "It stands in for live caption data."),
            (7.0, 10.5, "Each line carries a start and an end time."),
            (10.5, 13.5, "Use it to exercise the viewer offline."),
            (13.5, 17.0, "That is all for the sample."),
        ];
        let segments = lines
            .iter()
            .enumerate()
            .map(|(i, (start, end, text))| {
                TranscriptSegment::new((i + 1).to_string(), *start, *end, text.to_string())
            })
            .collect();

        Transcript::assemble(
            video_id,
            "Sample transcript".to_string(),
            "en".to_string(),
            segments,
            None,
        )
    }
}

/// The main transcript acquirer.
pub struct Acquirer {
    strategies: Vec<Arc<dyn AcquisitionStrategy>>,
    fallback: Option<Arc<dyn FallbackProvider>>,
    time_limit: Duration,
}

impl Acquirer {
    /// Create an acquirer with the default strategy chain.
    ///
    /// The sample fallback is installed only when the configured environment
    /// is not production.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let strategies = default_strategies(client, &settings.acquisition);
        let fallback: Option<Arc<dyn FallbackProvider>> =
            match settings.general.environment {
                Environment::Production => None,
                Environment::Development => Some(Arc::new(SampleTranscriptProvider)),
            };

        Ok(Self {
            strategies,
            fallback,
            time_limit: Duration::from_secs(settings.acquisition.timeout_seconds),
        })
    }

    /// Create an acquirer with custom components.
    pub fn with_components(
        strategies: Vec<Arc<dyn AcquisitionStrategy>>,
        fallback: Option<Arc<dyn FallbackProvider>>,
        time_limit: Duration,
    ) -> Self {
        Self {
            strategies,
            fallback,
            time_limit,
        }
    }

    /// Acquire a transcript for a video URL.
    ///
    /// Identifier extraction happens first; nothing touches the network when
    /// the URL does not contain a video ID. The strategy chain is strictly
    /// sequential, with the whole chain raced against the time limit. When
    /// the limit fires, in-flight strategy futures are dropped, not awaited.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn acquire(
        &self,
        url: &str,
        preferred_language: Option<&str>,
    ) -> std::result::Result<Transcript, AcquisitionFailure> {
        let Some(video_id) = extract_video_id(url) else {
            return Err(AcquisitionFailure::invalid_input(url));
        };

        let chain = self.run_chain(&video_id, preferred_language);
        match tokio::time::timeout(self.time_limit, chain).await {
            Ok(Some(transcript)) => {
                info!(
                    video_id,
                    segments = transcript.segments.len(),
                    language = %transcript.language,
                    "transcript acquired"
                );
                Ok(transcript)
            }
            Ok(None) => match &self.fallback {
                Some(provider) => {
                    warn!(video_id, "all strategies declined, serving sample transcript");
                    Ok(provider.placeholder(&video_id))
                }
                None => Err(AcquisitionFailure::no_captions(&video_id)),
            },
            Err(_) => Err(AcquisitionFailure::timeout(
                &video_id,
                self.time_limit.as_secs(),
            )),
        }
    }

    /// List discoverable caption tracks for a video URL.
    pub async fn discover_tracks(
        &self,
        url: &str,
    ) -> std::result::Result<Vec<CaptionTrack>, AcquisitionFailure> {
        let Some(video_id) = extract_video_id(url) else {
            return Err(AcquisitionFailure::invalid_input(url));
        };

        let chain = async {
            for strategy in &self.strategies {
                match strategy.discover(&video_id).await {
                    Ok(tracks) if !tracks.is_empty() => return Some(tracks),
                    Ok(_) => warn!(strategy = strategy.name(), "no tracks discovered"),
                    Err(e) => {
                        warn!(strategy = strategy.name(), error = %e, "discovery declined")
                    }
                }
            }
            None
        };

        match tokio::time::timeout(self.time_limit, chain).await {
            Ok(Some(tracks)) => Ok(tracks),
            Ok(None) => Err(AcquisitionFailure::no_captions(&video_id)),
            Err(_) => Err(AcquisitionFailure::timeout(
                &video_id,
                self.time_limit.as_secs(),
            )),
        }
    }

    /// Run strategies sequentially; the first non-empty transcript wins.
    async fn run_chain(
        &self,
        video_id: &str,
        preferred_language: Option<&str>,
    ) -> Option<Transcript> {
        for strategy in &self.strategies {
            match strategy.attempt(video_id, preferred_language).await {
                Ok(transcript) if !transcript.segments.is_empty() => {
                    info!(strategy = strategy.name(), "strategy succeeded");
                    return Some(transcript);
                }
                Ok(_) => {
                    // A zero-segment transcript is never a valid success.
                    warn!(strategy = strategy.name(), "strategy returned no segments");
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "strategy declined");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FailureCode, TekstError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct DecliningStrategy {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AcquisitionStrategy for DecliningStrategy {
        fn name(&self) -> &'static str {
            "declining"
        }

        async fn attempt(&self, _: &str, _: Option<&str>) -> Result<Transcript> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TekstError::NoCaptions("nothing here".to_string()))
        }

        async fn discover(&self, _: &str) -> Result<Vec<CaptionTrack>> {
            Err(TekstError::NoCaptions("nothing here".to_string()))
        }
    }

    struct SucceedingStrategy;

    #[async_trait]
    impl AcquisitionStrategy for SucceedingStrategy {
        fn name(&self) -> &'static str {
            "succeeding"
        }

        async fn attempt(&self, video_id: &str, _: Option<&str>) -> Result<Transcript> {
            let segments = vec![TranscriptSegment::new(
                "1".to_string(),
                0.0,
                2.0,
                "hello".to_string(),
            )];
            Ok(Transcript::assemble(
                video_id,
                "Stub".to_string(),
                "en".to_string(),
                segments,
                None,
            ))
        }

        async fn discover(&self, _: &str) -> Result<Vec<CaptionTrack>> {
            Ok(vec![])
        }
    }

    struct SlowStrategy;

    #[async_trait]
    impl AcquisitionStrategy for SlowStrategy {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn attempt(&self, video_id: &str, lang: Option<&str>) -> Result<Transcript> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            SucceedingStrategy.attempt(video_id, lang).await
        }

        async fn discover(&self, _: &str) -> Result<Vec<CaptionTrack>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    fn acquirer(
        strategies: Vec<Arc<dyn AcquisitionStrategy>>,
        fallback: Option<Arc<dyn FallbackProvider>>,
    ) -> Acquirer {
        Acquirer::with_components(strategies, fallback, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_any_strategy_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let acquirer = acquirer(
            vec![Arc::new(DecliningStrategy { calls: calls.clone() })],
            None,
        );

        let err = acquirer.acquire("not a url", None).await.unwrap_err();
        assert_eq!(err.code, FailureCode::InvalidInput);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_in_production_is_no_captions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let acquirer = acquirer(
            vec![
                Arc::new(DecliningStrategy { calls: calls.clone() }),
                Arc::new(DecliningStrategy { calls: calls.clone() }),
            ],
            None,
        );

        let err = acquirer
            .acquire("https://youtu.be/abc123", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, FailureCode::NoCaptionsAvailable);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!err.suggestion.is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_chain_with_fallback_serves_sample() {
        let calls = Arc::new(AtomicUsize::new(0));
        let acquirer = acquirer(
            vec![Arc::new(DecliningStrategy { calls })],
            Some(Arc::new(SampleTranscriptProvider)),
        );

        let transcript = acquirer
            .acquire("https://youtu.be/abc123", None)
            .await
            .unwrap();
        assert_eq!(transcript.duration, 17);
        assert_eq!(transcript.segments.len(), 5);
        assert_eq!(transcript.video_id, "abc123");
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let calls = Arc::new(AtomicUsize::new(0));
        let acquirer = acquirer(
            vec![
                Arc::new(SucceedingStrategy),
                Arc::new(DecliningStrategy { calls: calls.clone() }),
            ],
            None,
        );

        let transcript = acquirer
            .acquire("https://www.youtube.com/watch?v=abc123", None)
            .await
            .unwrap();
        assert_eq!(transcript.title, "Stub");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_classified_failure() {
        let acquirer = acquirer(vec![Arc::new(SlowStrategy)], None);

        let err = acquirer
            .acquire("https://youtu.be/abc123", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, FailureCode::Timeout);
    }

    #[tokio::test]
    async fn test_timeout_beats_fallback() {
        // A timed-out chain is a Timeout, not a declined chain; the sample
        // provider does not mask it.
        let acquirer = acquirer(
            vec![Arc::new(SlowStrategy)],
            Some(Arc::new(SampleTranscriptProvider)),
        );

        let err = acquirer
            .acquire("https://youtu.be/abc123", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, FailureCode::Timeout);
    }

    #[tokio::test]
    async fn test_discover_tracks_invalid_input() {
        let acquirer = acquirer(vec![Arc::new(SucceedingStrategy)], None);
        let err = acquirer.discover_tracks("nope").await.unwrap_err();
        assert_eq!(err.code, FailureCode::InvalidInput);
    }

    #[test]
    fn test_sample_transcript_shape() {
        let transcript = SampleTranscriptProvider.placeholder("demo");
        assert_eq!(transcript.duration, 17);
        assert_eq!(transcript.segments.len(), 5);
        assert_eq!(transcript.segments[0].id, "1");
        assert_eq!(transcript.segments[4].end, 17.0);
    }
}
