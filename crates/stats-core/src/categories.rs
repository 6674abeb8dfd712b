//! Vowel / consonant classification and the post-aggregation category filter.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::models::LetterTally;

const VOWELS: &str = "aeiouAEIOU";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ";

lazy_static! {
    static ref VOWEL_SET: HashSet<char> = VOWELS.chars().collect();
    static ref CONSONANT_SET: HashSet<char> = CONSONANTS.chars().collect();
}

/// Letter category used to drop entries from a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCategory {
    /// ASCII `a e i o u` in both cases.
    Vowel,
    /// Every other ASCII letter in both cases.
    Consonant,
}

impl CharCategory {
    fn members(self) -> &'static HashSet<char> {
        match self {
            CharCategory::Vowel => &VOWEL_SET,
            CharCategory::Consonant => &CONSONANT_SET,
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.members().contains(&c)
    }

    /// `true` when every character of `key` belongs to this category.
    pub fn matches_key(self, key: &str) -> bool {
        key.chars().all(|c| self.contains(c))
    }
}

/// Remove every entry whose letter lies entirely in `category`.
///
/// Non-ASCII letters never belong to either category and are always kept.
pub fn remove_category(tally: &mut LetterTally, category: CharCategory) {
    let before = tally.len();
    tally.retain(|stats| !category.matches_key(&stats.letter));
    tracing::debug!(
        "Removed {} {:?} entries, {} remain",
        before - tally.len(),
        category,
        tally.len()
    );
}
