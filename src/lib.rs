//! Tekst - YouTube Transcript Fetcher
//!
//! A CLI tool and library for fetching caption tracks from YouTube videos and
//! normalizing them into timed text segments.
//!
//! The name "Tekst" comes from the Norwegian word for "text."
//!
//! # Overview
//!
//! Tekst allows you to:
//! - Fetch the transcript for any public YouTube video with captions
//! - Pick a caption track by language, preferring manually-authored tracks
//! - Export transcripts as JSON, SRT, WebVTT, or timestamped plain text
//! - Serve the pipeline over HTTP for integration with other systems
//!
//! Caption data comes from undocumented upstream endpoints, so acquisition is
//! built as a chain of independent strategies tried in priority order: the
//! internal player endpoint first, then community proxy services, then
//! watch-page scraping. When one upstream changes shape, the chain degrades
//! instead of breaking.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video_id` - Video ID extraction from URLs
//! - `transcript` - Canonical transcript data model
//! - `parser` - Caption payload parsers (json3, WebVTT, timed XML)
//! - `strategy` - Acquisition strategies and track selection
//! - `acquire` - The acquisition orchestrator
//! - `export` - Output formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use tekst::acquire::Acquirer;
//! use tekst::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let acquirer = Acquirer::from_settings(&settings)?;
//!
//!     match acquirer.acquire("https://youtu.be/dQw4w9WgXcQ", Some("en")).await {
//!         Ok(transcript) => println!("{} segments", transcript.segments.len()),
//!         Err(failure) => eprintln!("{}: {}", failure.code, failure.suggestion),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;
pub mod strategy;
pub mod transcript;
pub mod video_id;

pub use error::{AcquisitionFailure, FailureCode, Result, TekstError};
pub use transcript::{CaptionTrack, TrackKind, Transcript, TranscriptSegment};
