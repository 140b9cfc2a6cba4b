//! Fetch command implementation.

use crate::acquire::Acquirer;
use crate::cli::{format_duration, Output};
use crate::config::Settings;
use crate::export::{format_transcript, OutputFormat};
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(
    url: &str,
    language: Option<&str>,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let acquirer = Acquirer::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = acquirer.acquire(url, language).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(failure) => {
            Output::error(&failure.message);
            Output::info(&failure.suggestion);
            std::process::exit(1);
        }
    };

    let formatted = format_transcript(&transcript, output_format);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &formatted)?;
            Output::success(&format!(
                "Saved '{}' to {} ({} segments, {})",
                transcript.title,
                path,
                transcript.segments.len(),
                format_duration(transcript.duration)
            ));
        }
        _ => {
            println!("{}", formatted);
        }
    }

    Ok(())
}
