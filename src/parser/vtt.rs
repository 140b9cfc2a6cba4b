//! WebVTT cue-text parser.

use super::normalize_text;
use crate::error::{Result, TekstError};
use crate::transcript::TranscriptSegment;

/// Parse WebVTT cue text into segments.
///
/// Skips the `WEBVTT` header line, then reads repeated cue blocks: a
/// `start --> end` timecode line followed by one or more text lines, ended by
/// a blank line. Consecutive text lines within one cue are joined with a
/// single space. Lines before a timecode that are not timecodes themselves
/// (cue identifiers, NOTE blocks) are ignored.
pub fn parse_vtt(raw: &str) -> Result<Vec<TranscriptSegment>> {
    let mut segments = Vec::new();
    let mut current: Option<(f64, f64, Vec<String>)> = None;

    for line in raw.lines() {
        let line = line.trim();

        if line.is_empty() {
            flush_cue(&mut segments, current.take());
            continue;
        }
        if line.starts_with("WEBVTT") {
            continue;
        }

        if let Some((start_raw, end_raw)) = line.split_once("-->") {
            // A new timecode line also terminates any unclosed cue.
            flush_cue(&mut segments, current.take());

            let start = parse_cue_timestamp(start_raw.trim())?;
            // Cue settings may trail the end timestamp.
            let end_token = end_raw.trim().split_whitespace().next().unwrap_or("");
            let end = parse_cue_timestamp(end_token)?;
            current = Some((start, end, Vec::new()));
        } else if let Some((_, _, lines)) = current.as_mut() {
            lines.push(line.to_string());
        }
    }
    flush_cue(&mut segments, current.take());

    Ok(segments)
}

fn flush_cue(segments: &mut Vec<TranscriptSegment>, cue: Option<(f64, f64, Vec<String>)>) {
    if let Some((start, end, lines)) = cue {
        let text = normalize_text(&lines.join(" "));
        if !text.is_empty() {
            segments.push(TranscriptSegment::new(
                (segments.len() + 1).to_string(),
                start,
                end,
                text,
            ));
        }
    }
}

/// Parse a `[hh:]mm:ss.mmm` timestamp into seconds.
fn parse_cue_timestamp(raw: &str) -> Result<f64> {
    let parts: Vec<&str> = raw.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => {
            return Err(TekstError::CaptionParse(format!(
                "invalid cue timestamp: {}",
                raw
            )))
        }
    };

    let hours: f64 = hours
        .parse()
        .map_err(|_| TekstError::CaptionParse(format!("invalid cue timestamp: {}", raw)))?;
    let minutes: f64 = minutes
        .parse()
        .map_err(|_| TekstError::CaptionParse(format!("invalid cue timestamp: {}", raw)))?;
    let seconds: f64 = seconds
        .parse()
        .map_err(|_| TekstError::CaptionParse(format!("invalid cue timestamp: {}", raw)))?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}
