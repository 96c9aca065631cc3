//! Input normalization for the scoring engine.
//!
//! Every rule evaluator works from the same [`NormalizedEmail`] view, built
//! exactly once per analysis so all rules see consistent derived values and
//! no scan is repeated.

use serde::{Deserialize, Serialize};

use crate::vocabulary::URL_RE;

/// One email as submitted for analysis. Owned by the caller; the engine
/// never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailInput {
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: String,
    pub subject: String,
    pub body: String,
}

/// Derived view of an [`EmailInput`], computed once per analysis.
#[derive(Debug, Clone)]
pub struct NormalizedEmail<'a> {
    pub input: &'a EmailInput,
    pub lower_subject: String,
    pub lower_body: String,
    pub full_text: String,
    pub url_count: usize,
    pub url_density: f64,
    pub sender_domain: String,
    pub sender_local: String,
    /// Uppercase share of the subject; `None` when the subject is empty,
    /// which skips the excessive-caps rule entirely.
    pub caps_ratio: Option<f64>,
    pub exclamation_count: usize,
    pub subject_len: usize,
    pub body_len: usize,
}

impl<'a> NormalizedEmail<'a> {
    /// Pure derivation; never panics, degenerate inputs (empty strings,
    /// address without `@`) just produce empty/zero derived values.
    pub fn from_input(input: &'a EmailInput) -> Self {
        let lower_subject = input.subject.to_lowercase();
        let lower_body = input.body.to_lowercase();
        let full_text = format!("{} {}", lower_subject, lower_body);

        // URLs are scanned in the raw body: the scheme token is matched
        // case-sensitively, so "HTTP://" does not count.
        let url_count = URL_RE.find_iter(&input.body).count();
        let word_count = input.body.split_whitespace().count().max(1);
        let url_density = url_count as f64 / word_count as f64;

        let (sender_local, sender_domain) = match input.sender_email.split_once('@') {
            Some((local, domain)) => (local.to_string(), domain.to_lowercase()),
            None => (input.sender_email.clone(), String::new()),
        };

        let subject_len = input.subject.chars().count();
        let caps_ratio = if subject_len > 0 {
            let caps = input
                .subject
                .chars()
                .filter(|c| c.is_ascii_uppercase())
                .count();
            Some(caps as f64 / subject_len as f64)
        } else {
            None
        };

        let exclamation_count = input.subject.matches('!').count();

        Self {
            input,
            lower_subject,
            lower_body,
            full_text,
            url_count,
            url_density,
            sender_domain,
            sender_local,
            caps_ratio,
            exclamation_count,
            subject_len,
            body_len: input.body.chars().count(),
        }
    }
}
