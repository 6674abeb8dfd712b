use crate::error::Result;
use crate::models::{LetterReport, LetterStats, LetterTally, StatsBlock};

/// Sort `tally` ascending by letter (plain code-point order).
///
/// # Examples
///
/// ```
/// use stats_core::formatting::sorted_entries;
/// use stats_core::models::LetterTally;
///
/// let mut tally = LetterTally::new();
/// for c in "zbB".chars() {
///     tally.record(c);
/// }
/// let letters: Vec<String> = sorted_entries(tally).into_iter().map(|s| s.letter).collect();
/// assert_eq!(letters, vec!["B", "b", "z"]);
/// ```
pub fn sorted_entries(tally: LetterTally) -> Vec<LetterStats> {
    let mut entries = tally.into_entries();
    entries.sort_by(|a, b| a.letter.cmp(&b.letter));
    entries
}

/// Sort `tally` and attach its total.
pub fn to_block(tally: LetterTally) -> StatsBlock {
    let total = tally.total();
    StatsBlock {
        entries: sorted_entries(tally),
        total,
    }
}

/// Render one block as `<Letter> - <Count>` lines followed by a total line.
///
/// # Examples
///
/// ```
/// use stats_core::formatting::render_text_block;
/// use stats_core::models::LetterStats;
///
/// let entries = vec![LetterStats { letter: "b".into(), count: 2 }];
/// assert_eq!(render_text_block(&entries), "b - 2\nTotal: 2\n");
/// assert_eq!(render_text_block(&[]), "Total: 0\n");
/// ```
pub fn render_text_block(entries: &[LetterStats]) -> String {
    let mut out = String::new();
    for stats in entries {
        out.push_str(&format!("{} - {}\n", stats.letter, stats.count));
    }
    let total: u64 = entries.iter().map(|s| s.count).sum();
    out.push_str(&format!("Total: {}\n", total));
    out
}

/// Render both blocks of `report`: single letters first, then pairs.
pub fn render_text_report(report: &LetterReport) -> String {
    let mut out = render_text_block(&report.single_letters.entries);
    out.push_str(&render_text_block(&report.letter_pairs.entries));
    out
}

/// Render `report` (blocks and metadata) as pretty-printed JSON.
pub fn render_json_report(report: &LetterReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunMetadata;

    fn stats(letter: &str, count: u64) -> LetterStats {
        LetterStats {
            letter: letter.to_string(),
            count,
        }
    }

    fn sample_report() -> LetterReport {
        LetterReport {
            single_letters: StatsBlock {
                entries: vec![stats("b", 2), stats("c", 1)],
                total: 3,
            },
            letter_pairs: StatsBlock {
                entries: vec![stats("a", 2)],
                total: 2,
            },
            metadata: RunMetadata::default(),
        }
    }

    // ── sorted_entries ────────────────────────────────────────────────────────

    #[test]
    fn test_sorted_entries_code_point_order() {
        let mut tally = LetterTally::new();
        for c in "yaZAж".chars() {
            tally.record(c);
        }
        let letters: Vec<String> = sorted_entries(tally).into_iter().map(|s| s.letter).collect();
        assert_eq!(letters, vec!["A", "Z", "a", "y", "ж"]);
    }

    #[test]
    fn test_sorted_entries_non_decreasing() {
        let mut tally = LetterTally::new();
        for c in "the quick brown fox jumps over the lazy dog".chars() {
            if c.is_alphabetic() {
                tally.record(c);
            }
        }
        let entries = sorted_entries(tally);
        assert!(entries.windows(2).all(|w| w[0].letter <= w[1].letter));
    }

    // ── to_block ──────────────────────────────────────────────────────────────

    #[test]
    fn test_to_block_total_matches_entries() {
        let mut tally = LetterTally::new();
        for c in "mmmnp".chars() {
            tally.record(c);
        }
        let block = to_block(tally);
        assert_eq!(block.total, 5);
        assert_eq!(block.total, block.entries.iter().map(|s| s.count).sum::<u64>());
    }

    // ── render_text_block ─────────────────────────────────────────────────────

    #[test]
    fn test_render_text_block_lines() {
        let out = render_text_block(&[stats("b", 2), stats("c", 10)]);
        assert_eq!(out, "b - 2\nc - 10\nTotal: 12\n");
    }

    #[test]
    fn test_render_text_block_empty() {
        assert_eq!(render_text_block(&[]), "Total: 0\n");
    }

    #[test]
    fn test_render_is_idempotent() {
        let entries = vec![stats("x", 1)];
        assert_eq!(render_text_block(&entries), render_text_block(&entries));
    }

    // ── report rendering ──────────────────────────────────────────────────────

    #[test]
    fn test_render_text_report_order() {
        let out = render_text_report(&sample_report());
        assert_eq!(out, "b - 2\nc - 1\nTotal: 3\na - 2\nTotal: 2\n");
    }

    #[test]
    fn test_render_json_report() {
        let out = render_json_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["single_letters"]["total"], 3);
        assert_eq!(value["single_letters"]["entries"][0]["letter"], "b");
        assert_eq!(value["letter_pairs"]["entries"][0]["count"], 2);
        assert!(value["metadata"].is_object());
    }
}
