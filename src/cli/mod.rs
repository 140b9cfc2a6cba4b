//! CLI module for Tekst.

pub mod commands;
mod output;

pub use output::{format_duration, Output};

use clap::{Parser, Subcommand};

/// Tekst - YouTube transcript fetcher
///
/// Fetches caption tracks for a YouTube video and exports them as timed text.
/// The name "Tekst" comes from the Norwegian word for "text."
#[derive(Parser, Debug)]
#[command(name = "tekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the transcript for a video
    Fetch {
        /// YouTube video URL
        url: String,

        /// Preferred caption language code (e.g. "en", "ja")
        #[arg(short, long)]
        language: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (json, srt, vtt, text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List available caption tracks for a video
    Tracks {
        /// YouTube video URL
        url: String,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
