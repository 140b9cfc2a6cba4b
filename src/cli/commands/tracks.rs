//! Tracks command implementation.

use crate::acquire::Acquirer;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the tracks command: list discoverable caption tracks for a video.
pub async fn run_tracks(url: &str, settings: Settings) -> Result<()> {
    let acquirer = Acquirer::from_settings(&settings)?;

    let spinner = Output::spinner("Discovering caption tracks...");
    let result = acquirer.discover_tracks(url).await;
    spinner.finish_and_clear();

    match result {
        Ok(tracks) => {
            Output::header("Available caption tracks");
            for track in &tracks {
                Output::track_info(&track.language_code, &track.kind.to_string());
            }
            println!();
            Output::info(&format!("{} track(s) found.", tracks.len()));
        }
        Err(failure) => {
            Output::error(&failure.message);
            Output::info(&failure.suggestion);
            std::process::exit(1);
        }
    }

    Ok(())
}
