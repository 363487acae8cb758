//! Subtitle conversion from platform timed text to SRT
//!
//! The platform serves transcripts as three parallel JSON arrays (`start`,
//! `end`, `text`), zipped by index. Conversion drops empty-text entries
//! entirely and renumbers the surviving cues sequentially from zero.

use serde::Deserialize;

use crate::error::Result;

/// Timed transcript as served by the platform's translation endpoint
///
/// The three arrays are parallel: entry `i` of each describes cue `i`.
/// Times are in milliseconds; the endpoint serves them as plain JSON
/// numbers, sometimes fractional, so they are accepted as floats and
/// truncated to whole milliseconds on output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimedText {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
    pub text: Vec<String>,
}

/// Decodes a transcript JSON document into [`TimedText`]
///
/// # Errors
/// Returns `SubtitleDecode` when the JSON is unparseable or missing any
/// of the expected arrays. Callers treat this as "no subtitles
/// available", not as a fatal condition.
pub fn parse_timed_text(json: &str) -> Result<TimedText> {
    Ok(serde_json::from_str(json)?)
}

/// Converts timed text into the SRT subtitle file format
///
/// Entries with empty text are omitted entirely, including from the
/// numbering: surviving cues are numbered sequentially from 0 in
/// iteration order. Timestamps are plain millisecond arithmetic; hours
/// beyond 24 are emitted as-is.
pub fn to_srt(timed_text: &TimedText) -> String {
    let mut output = String::new();
    let mut cue_number = 0;

    let entries = timed_text
        .start
        .iter()
        .zip(&timed_text.end)
        .zip(&timed_text.text);

    for ((&start, &end), text) in entries {
        if text.is_empty() {
            continue;
        }

        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue_number,
            format_timestamp(start),
            format_timestamp(end),
            text
        ));
        cue_number += 1;
    }

    output
}

/// Formats milliseconds as an SRT timestamp `HH:MM:SS,mmm`
///
/// Fractional milliseconds are truncated.
fn format_timestamp(ms: f64) -> String {
    let ms = ms as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
