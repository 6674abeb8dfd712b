//! Letter counting over a [`CharacterSource`].
//!
//! Two passes exist: case-sensitive single letters, and case-insensitive
//! doubled letters ("aa", "Ss") counted without overlap.

use stats_core::error::Result;
use stats_core::models::LetterTally;
use tracing::debug;

use crate::reader::CharacterSource;

// ── PairScanner ───────────────────────────────────────────────────────────────

/// Look-back state for doubled-letter detection.
///
/// Holds at most one previous letter. A completed pair clears it, so a run
/// of four identical letters is two pairs and a run of three is one.
#[derive(Debug, Clone, Default)]
pub struct PairScanner {
    previous: Option<char>,
}

impl PairScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character. Returns the folded letter when it closes a pair.
    ///
    /// Non-letters are ignored entirely and leave the look-back untouched.
    pub fn push(&mut self, c: char) -> Option<char> {
        let folded = fold_case(c);
        if !folded.is_alphabetic() {
            return None;
        }

        if self.previous == Some(folded) {
            self.previous = None;
            Some(folded)
        } else {
            self.previous = Some(folded);
            None
        }
    }

    #[cfg(test)]
    fn previous(&self) -> Option<char> {
        self.previous
    }
}

/// Lowercase `c` when its lowercase form is a single char.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

// ── LetterAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that drains a source into a [`LetterTally`].
pub struct LetterAggregator;

impl LetterAggregator {
    /// Count every letter in `source`, case preserved.
    pub fn single_letters(source: &mut CharacterSource) -> Result<LetterTally> {
        let mut tally = LetterTally::new();
        Self::scan(source, |c| {
            if c.is_alphabetic() {
                tally.record(c);
            }
        })?;

        debug!(
            "{}: {} distinct letters, {} total",
            source.label(),
            tally.len(),
            tally.total()
        );
        Ok(tally)
    }

    /// Count adjacent identical-letter pairs in `source`, case-insensitively.
    ///
    /// Each pair is keyed by its lowercase letter.
    pub fn letter_pairs(source: &mut CharacterSource) -> Result<LetterTally> {
        let mut tally = LetterTally::new();
        let mut scanner = PairScanner::new();
        Self::scan(source, |c| {
            if let Some(letter) = scanner.push(c) {
                tally.record(letter);
            }
        })?;

        debug!(
            "{}: {} distinct pairs, {} total",
            source.label(),
            tally.len(),
            tally.total()
        );
        Ok(tally)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Reset `source`, then feed each character to `visit` until the end.
    ///
    /// An unopened source yields nothing. `EndOfStream` from the read itself
    /// also ends the scan normally.
    fn scan(source: &mut CharacterSource, mut visit: impl FnMut(char)) -> Result<()> {
        if !source.is_opened() {
            debug!("{} was never opened; nothing to scan", source.label());
            return Ok(());
        }

        source.reset_to_start()?;
        while !source.is_at_end() {
            match source.read_next_character() {
                Ok(c) => visit(c),
                Err(e) if e.is_end_of_stream() => break,
                Err(e) => return Err(e),
            }
        }

        debug!(
            "Scanned {} characters ({} bytes) from {}",
            source.characters_read(),
            source.position(),
            source.label()
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
