//! Main analysis pipeline.
//!
//! Opens both inputs, runs the two aggregation passes, applies the category
//! filters and returns a [`LetterReport`] ready for rendering.

use std::path::Path;
use std::time::Instant;

use stats_core::categories::{remove_category, CharCategory};
use stats_core::error::{Result, StatsError};
use stats_core::formatting::to_block;
use stats_core::models::{Decoding, LetterReport, OpenPolicy, RunMetadata};
use tracing::info;

use crate::aggregator::LetterAggregator;
use crate::reader::{is_stdin_path, CharacterSource};

/// How inputs are opened and decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub decoding: Decoding,
    pub open_policy: OpenPolicy,
}

/// Open `path` under the configured policy.
///
/// With [`OpenPolicy::Degrade`] an unopenable file becomes an empty source;
/// with [`OpenPolicy::Strict`] the open error is returned.
pub fn open_source(path: &Path, options: AnalysisOptions) -> Result<CharacterSource> {
    match options.open_policy {
        OpenPolicy::Degrade => Ok(CharacterSource::open_or_empty(path, options.decoding)),
        OpenPolicy::Strict => CharacterSource::open(path, options.decoding),
    }
}

/// Run both passes over already-acquired sources.
///
/// 1. Count single letters in `single` and drop vowels.
/// 2. Count doubled letters in `pair` and drop consonant pairs.
/// 3. Sort both tallies into report blocks.
pub fn analyze_sources(
    single: &mut CharacterSource,
    pair: &mut CharacterSource,
) -> Result<LetterReport> {
    let start = Instant::now();

    let mut single_tally = LetterAggregator::single_letters(single)?;
    let mut pair_tally = LetterAggregator::letter_pairs(pair)?;

    remove_category(&mut single_tally, CharCategory::Vowel);
    remove_category(&mut pair_tally, CharCategory::Consonant);

    let metadata = RunMetadata {
        single_characters_read: single.characters_read(),
        pair_characters_read: pair.characters_read(),
        aggregate_time_seconds: start.elapsed().as_secs_f64(),
    };

    Ok(LetterReport {
        single_letters: to_block(single_tally),
        letter_pairs: to_block(pair_tally),
        metadata,
    })
}

/// Open both files, analyse them and release the handles.
///
/// Standard input can feed at most one of the two inputs.
pub fn analyze_files(
    single_path: &Path,
    pair_path: &Path,
    options: AnalysisOptions,
) -> Result<LetterReport> {
    if is_stdin_path(single_path) && is_stdin_path(pair_path) {
        return Err(StatsError::Config("stdin can feed only one input".to_string()));
    }

    let mut single = open_source(single_path, options)?;
    let mut pair = open_source(pair_path, options)?;

    let report = analyze_sources(&mut single, &mut pair)?;

    info!(
        "Analysed {} ({} chars) and {} ({} chars) in {:.3}s",
        single.label(),
        report.metadata.single_characters_read,
        pair.label(),
        report.metadata.pair_characters_read,
        report.metadata.aggregate_time_seconds
    );

    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
