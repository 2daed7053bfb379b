//! Deterministic reference lyric provider
//!
//! Produces templated text from genre, mood, theme, and BPM. Identical
//! input always yields byte-identical output, which keeps the endpoint
//! testable and reproducible with no external dependency. Touches no
//! shared state, so concurrent calls need no locking.

use async_trait::async_trait;

use finisher_common::params::GenerationRequest;
use finisher_common::Result;

use crate::provider::LyricProvider;

/// Reference provider: deterministic template generator
#[derive(Debug, Default)]
pub struct DeterministicProvider;

impl DeterministicProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Tempo marker derived from BPM, included in the header line
fn tempo_marker(bpm: u16) -> &'static str {
    match bpm {
        ..=65 => "slow burn",
        66..=95 => "laid back",
        96..=125 => "steady groove",
        126..=165 => "driving",
        _ => "breakneck",
    }
}

/// Verse length derived from BPM: faster songs get more, shorter lines
fn verse_line_count(bpm: u16) -> usize {
    4 + (usize::from(bpm) - 40) / 50
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn render(request: &GenerationRequest) -> String {
    let GenerationRequest {
        genre,
        bpm,
        mood,
        theme,
    } = request;

    let mut lines = Vec::new();
    lines.push(format!(
        "[{} | {} BPM | {} | {}]",
        capitalize(genre),
        bpm,
        mood,
        tempo_marker(*bpm)
    ));

    let verse = [
        format!("I been thinkin' 'bout {theme} every night,"),
        "Beat steady knockin', got my feelings in the light.".to_string(),
        "Words come easy when the rhythm's right,".to_string(),
        format!("Hold on to the moment, this is our {mood} flight."),
        format!("Every {genre} heartbeat keeps the tempo true,"),
        "Chasing down the echo that leads me back to you.".to_string(),
    ];
    for i in 0..verse_line_count(*bpm) {
        lines.push(verse[i % verse.len()].clone());
    }

    lines.push(String::new());
    lines.push("Hook:".to_string());
    lines.push("Finish what we started, make the story bright,".to_string());
    lines.push("Turn the spark to fire, take this song to life.".to_string());
    lines.push("No more waiting, this is our time,".to_string());
    lines.push(format!(
        "{} in the chorus, let the stars align.",
        capitalize(theme)
    ));

    lines.join("\n")
}

#[async_trait]
impl LyricProvider for DeterministicProvider {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        Ok(render(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(bpm: u16) -> GenerationRequest {
        GenerationRequest {
            genre: "hip-hop".to_string(),
            bpm,
            mood: "energetic".to_string(),
            theme: "love".to_string(),
        }
    }

    #[tokio::test]
    async fn identical_input_yields_identical_output() {
        let provider = DeterministicProvider::new();
        let first = provider.generate(&request(90)).await.unwrap();
        let second = provider.generate(&request(90)).await.unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[tokio::test]
    async fn output_reflects_parameters() {
        let provider = DeterministicProvider::new();
        let lyrics = provider.generate(&request(90)).await.unwrap();
        assert!(lyrics.starts_with("[Hip-hop | 90 BPM | energetic | laid back]"));
        assert!(lyrics.contains("love"));
        assert!(lyrics.contains("Hook:"));
    }

    #[tokio::test]
    async fn bpm_changes_output() {
        let provider = DeterministicProvider::new();
        let slow = provider.generate(&request(40)).await.unwrap();
        let fast = provider.generate(&request(240)).await.unwrap();
        assert_ne!(slow, fast);
    }

    #[test]
    fn tempo_marker_boundaries() {
        assert_eq!(tempo_marker(40), "slow burn");
        assert_eq!(tempo_marker(65), "slow burn");
        assert_eq!(tempo_marker(66), "laid back");
        assert_eq!(tempo_marker(125), "steady groove");
        assert_eq!(tempo_marker(126), "driving");
        assert_eq!(tempo_marker(240), "breakneck");
    }

    #[test]
    fn verse_line_count_in_template_range() {
        for bpm in [40u16, 90, 150, 240] {
            let count = verse_line_count(bpm);
            assert!((4..=8).contains(&count), "bpm {bpm} gave {count} lines");
        }
    }
}
