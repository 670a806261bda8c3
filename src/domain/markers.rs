use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Keyword that tags an annotated timestamp line in the raw input.
const MARKER_KEYWORD: &str = "Stream Time Marker";

#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("invalid timestamp format: {0}")]
    InvalidTimestamp(String),
}

/// A labeled point in time extracted from raw event text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    /// Timestamp string as it appeared in the input
    pub original: String,
    /// Offset from the start of the source, in seconds
    pub seconds: u64,
    /// Free-text label for the event
    pub label: String,
}

/// Convert a timestamp string to seconds.
///
/// Accepted shapes: plain integer seconds, `MM:SS`, `HH:MM:SS`.
pub fn parse_timestamp(timestamp: &str) -> Result<u64, MarkerError> {
    let timestamp = timestamp.trim();

    if !timestamp.is_empty() && timestamp.chars().all(|c| c.is_ascii_digit()) {
        return timestamp
            .parse::<u64>()
            .map_err(|_| MarkerError::InvalidTimestamp(timestamp.to_string()));
    }

    let number = |part: &str| {
        part.parse::<u64>()
            .map_err(|_| MarkerError::InvalidTimestamp(timestamp.to_string()))
    };

    let parts: Vec<&str> = timestamp.split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => Ok(number(minutes)? * 60 + number(seconds)?),
        [hours, minutes, seconds] => {
            Ok(number(hours)? * 3600 + number(minutes)? * 60 + number(seconds)?)
        }
        _ => Err(MarkerError::InvalidTimestamp(timestamp.to_string())),
    }
}

/// Extract markers from raw event text.
///
/// Annotated `H:MM:SS Stream Time Marker - label` lines take priority; when
/// the keyword never appears, the input is retried as a comma-separated
/// `start-end` range list where each range yields a marker at its midpoint.
///
/// An empty result is not an error: callers decide how to surface
/// "no valid markers".
pub fn parse_markers(text: &str) -> Vec<Marker> {
    if let Some(markers) = parse_annotated(text) {
        return markers;
    }
    parse_ranges(text)
}

/// Returns `None` when no annotated keyword lines exist at all, so the
/// caller can fall back to the range grammar. A line whose timestamp fails
/// to parse is dropped without affecting the rest of the batch.
fn parse_annotated(text: &str) -> Option<Vec<Marker>> {
    let pattern = format!(r"(\d+:\d+:\d+)\s+{}\s*-?\s*(.*)", MARKER_KEYWORD);
    let re = Regex::new(&pattern).unwrap();

    let mut matched = false;
    let markers = re
        .captures_iter(text)
        .filter_map(|caps| {
            matched = true;
            let original = caps.get(1).unwrap().as_str();
            let seconds = match parse_timestamp(original) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Dropping marker {}: {}", original, e);
                    return None;
                }
            };
            let label = caps.get(2).unwrap().as_str().trim();
            Some(Marker {
                original: original.to_string(),
                seconds,
                label: if label.is_empty() {
                    format!("Event at {}", original)
                } else {
                    label.to_string()
                },
            })
        })
        .collect();

    if matched {
        Some(markers)
    } else {
        None
    }
}

/// Range-list fallback: `start-end,start-end,...`. The representative marker
/// time is the midpoint of each range, rounded toward zero.
fn parse_ranges(text: &str) -> Vec<Marker> {
    let mut markers = Vec::new();

    for entry in text.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let Some((start, end)) = entry.split_once('-') else {
            warn!("Dropping range entry without separator: {}", entry);
            continue;
        };

        let (start, end) = match (parse_timestamp(start), parse_timestamp(end)) {
            (Ok(s), Ok(e)) => (s, e),
            _ => {
                warn!("Dropping range entry with bad timestamp: {}", entry);
                continue;
            }
        };

        let seconds = (start + end) / 2;
        markers.push(Marker {
            original: entry.to_string(),
            seconds,
            label: format!("Clip {}", markers.len() + 1),
        });
    }

    markers
}
