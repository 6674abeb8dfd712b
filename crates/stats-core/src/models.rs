use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How raw bytes of an input file are turned into characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// Each byte is one character (Latin-1 interpretation).
    #[default]
    Byte,
    /// Each UTF-8 encoded scalar value is one character.
    Utf8,
}

/// What happens when an input file cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenPolicy {
    /// Treat the file as empty and carry on.
    #[default]
    Degrade,
    /// Abort the run with the open error.
    Strict,
}

/// Occurrence count for one letter (or one pair, keyed by its letter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterStats {
    /// The letter this entry counts.
    pub letter: String,
    /// Number of occurrences observed.
    pub count: u64,
}

impl LetterStats {
    pub fn new(letter: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            count: 0,
        }
    }

    /// Record one more occurrence.
    pub fn increment(&mut self) {
        self.count += 1;
    }
}

/// Result set of one aggregation pass, keyed by letter.
///
/// Iteration order is unspecified; ordering happens when the tally is
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterTally {
    entries: HashMap<String, LetterStats>,
}

impl LetterTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the entry for `letter`, creating it on first occurrence.
    pub fn record(&mut self, letter: char) {
        let mut buf = [0u8; 4];
        let key: &str = letter.encode_utf8(&mut buf);
        match self.entries.get_mut(key) {
            Some(stats) => stats.increment(),
            None => {
                let mut stats = LetterStats::new(key);
                stats.increment();
                self.entries.insert(stats.letter.clone(), stats);
            }
        }
    }

    /// Count recorded for `letter`, or `None` when it never occurred.
    pub fn count_of(&self, letter: &str) -> Option<u64> {
        self.entries.get(letter).map(|s| s.count)
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&LetterStats) -> bool) {
        self.entries.retain(|_, stats| keep(stats));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts in the tally.
    pub fn total(&self) -> u64 {
        self.iter().map(|s| s.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LetterStats> {
        self.entries.values()
    }

    pub fn into_entries(self) -> Vec<LetterStats> {
        self.entries.into_values().collect()
    }
}

/// One rendered block of the report: sorted entries plus their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBlock {
    /// Entries in ascending letter order.
    pub entries: Vec<LetterStats>,
    /// Sum of all entry counts.
    pub total: u64,
}

/// Metadata produced alongside the two blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Characters read from the single-letter source.
    pub single_characters_read: u64,
    /// Characters read from the pair source.
    pub pair_characters_read: u64,
    /// Wall-clock seconds spent aggregating both sources.
    pub aggregate_time_seconds: f64,
}

/// The complete output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterReport {
    /// Case-sensitive single letters, vowels removed.
    pub single_letters: StatsBlock,
    /// Case-insensitive doubled letters, consonant pairs removed.
    pub letter_pairs: StatsBlock,
    pub metadata: RunMetadata,
}
