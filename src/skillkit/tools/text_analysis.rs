//! Basic text statistics.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::Formatter;
use std::io;

/// Statistics reported by [`TextAnalysisPlugin::analyze_text`].
///
/// Field order is the key order of the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    #[serde(serialize_with = "serialize_average")]
    pub average_word_length: f64,
}

/// No words means no average: written as the integer `0`, otherwise as a float.
fn serialize_average<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value == 0.0 {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Round to two decimals, ties to even.
///
/// Ties are decided on the exact binary value: `mul_add` recovers the error of `value * 100.0`,
/// so an apparent `.5` that is really just above or below the midpoint goes the right way.
fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    if scaled - floor != 0.5 {
        return scaled.round() / 100.0;
    }

    let error = value.mul_add(100.0, -scaled);
    let rounded = if error > 0.0 {
        floor + 1.0
    } else if error < 0.0 || floor % 2.0 == 0.0 {
        floor
    } else {
        floor + 1.0
    };
    rounded / 100.0
}

impl TextAnalysis {
    /// Compute the statistics for `text`.
    ///
    /// Words are whitespace separated; every `.`, `!` and `?` counts as a sentence end.
    /// Lengths are measured in characters, not bytes.
    pub fn of(text: &str) -> Self {
        let word_lengths: Vec<usize> = text
            .split_whitespace()
            .map(|word| word.chars().count())
            .collect();

        let average_word_length = if word_lengths.is_empty() {
            0.0
        } else {
            round_to_cents(word_lengths.iter().sum::<usize>() as f64 / word_lengths.len() as f64)
        };

        Self {
            character_count: text.chars().count(),
            word_count: word_lengths.len(),
            sentence_count: text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count(),
            average_word_length,
        }
    }
}

/// Single-line JSON with `", "` between entries and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

/// Computes word, sentence and character statistics for a piece of text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAnalysisPlugin;

impl TextAnalysisPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Analyze `text` and serialize the result as a JSON object.
    pub fn analyze_text(&self, text: &str) -> Result<String, serde_json::Error> {
        let analysis = TextAnalysis::of(text);
        log::info!("Text analysis complete: {:?}", analysis);

        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        analysis.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }
}
