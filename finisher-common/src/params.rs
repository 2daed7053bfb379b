//! Generation request parameters and validation
//!
//! `validate` is the single entry point turning an untrusted request body
//! into a `GenerationRequest`. It is a pure function: no I/O, no logging
//! side effects, same output for the same input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Lowest BPM accepted by the generator
pub const BPM_MIN: i64 = 40;
/// Highest BPM accepted by the generator
pub const BPM_MAX: i64 = 240;
/// Length bound for genre/mood/theme (characters, after trimming)
pub const MAX_TEXT_LEN: usize = 100;

/// Unvalidated body of POST /api/lyrics/generate
///
/// `bpm` is kept as raw JSON so that a non-numeric value surfaces as a
/// validation error naming the field instead of a deserialization failure.
/// Unknown extra fields are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGenerationRequest {
    pub genre: Option<String>,
    pub bpm: Option<Value>,
    pub mood: Option<String>,
    pub theme: Option<String>,
}

/// Validated, normalized generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub genre: String,
    pub bpm: u16,
    pub mood: String,
    pub theme: String,
}

/// Validate and normalize an incoming generation request
///
/// - `bpm` must be an integer (or integer string) in [`BPM_MIN`, `BPM_MAX`]
/// - `genre`/`mood`/`theme` must be non-empty after trimming and within
///   [`MAX_TEXT_LEN`] characters
pub fn validate(raw: &RawGenerationRequest) -> Result<GenerationRequest> {
    let bpm = validate_bpm(raw.bpm.as_ref())?;
    let genre = required_text("genre", raw.genre.as_deref())?;
    let mood = required_text("mood", raw.mood.as_deref())?;
    let theme = required_text("theme", raw.theme.as_deref())?;

    Ok(GenerationRequest {
        genre,
        bpm,
        mood,
        theme,
    })
}

fn validate_bpm(value: Option<&Value>) -> Result<u16> {
    let bpm = value
        .and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .ok_or_else(|| Error::Validation {
            field: "bpm",
            reason: "must be an integer".to_string(),
        })?;

    if !(BPM_MIN..=BPM_MAX).contains(&bpm) {
        return Err(Error::Validation {
            field: "bpm",
            reason: format!("must be between {} and {}", BPM_MIN, BPM_MAX),
        });
    }

    Ok(bpm as u16)
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String> {
    let trimmed = value.unwrap_or("").trim();

    if trimmed.is_empty() {
        return Err(Error::Validation {
            field,
            reason: "must be a non-empty string".to_string(),
        });
    }

    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(Error::Validation {
            field,
            reason: format!("must be at most {} characters", MAX_TEXT_LEN),
        });
    }

    Ok(trimmed.to_string())
}
