//! The scoring engine: normalize, run every rule, aggregate.
//!
//! `analyze` is a pure function of its input. It holds no state, performs no
//! I/O, and may be called concurrently from any number of threads; the rule
//! vocabularies it reads are immutable process-wide statics.

use serde::{Deserialize, Serialize};

use crate::normalization::{EmailInput, NormalizedEmail};
use crate::rules::{SpamIndicator, RULES};

/// Scores at or above this are classified as spam. Fixed by design, not
/// configurable.
pub const SPAM_THRESHOLD: u32 = 40;

/// Scores are clamped here; weights are non-negative so no lower clamp.
pub const MAX_SCORE: u32 = 100;

/// The complete verdict for one email. Constructed entirely within one
/// `analyze` call; persistence is the caller's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamAnalysisResult {
    pub is_spam: bool,
    pub spam_score: u32,
    /// Sorted by descending weight; ties keep rule emission order.
    pub indicators: Vec<SpamIndicator>,
}

/// Run the full rule set over one email and aggregate the verdict.
pub fn analyze(email: &EmailInput) -> SpamAnalysisResult {
    let normalized = NormalizedEmail::from_input(email);

    let mut indicators = Vec::new();
    for rule in RULES {
        rule(&normalized, &mut indicators);
    }

    let total: u32 = indicators.iter().map(|i| i.weight).sum();
    let spam_score = total.min(MAX_SCORE);
    let is_spam = spam_score >= SPAM_THRESHOLD;

    // sort_by is stable, which is what keeps tied weights in emission order.
    indicators.sort_by(|a, b| b.weight.cmp(&a.weight));

    SpamAnalysisResult {
        is_spam,
        spam_score,
        indicators,
    }
}
