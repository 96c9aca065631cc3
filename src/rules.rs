//! The fixed rule set.
//!
//! Each rule is an independent pure function from the normalized email to
//! zero or more indicators. All rules run on every analysis; there is no
//! early exit once the spam threshold is reached, because the full indicator
//! list is part of the result. [`RULES`] is the canonical ordered table the
//! aggregator walks, so adding a rule never touches the aggregation code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::normalization::NormalizedEmail;
use crate::vocabulary::{MONEY_RE, RANDOM_LOCAL_RE, SPAM_KEYWORDS, SPAM_PHRASES, SUSPICIOUS_DOMAINS};

/// Fixed weights. Keyword and punctuation rules scale with the match count,
/// the rest are flat.
const SUBJECT_KEYWORD_WEIGHT: u32 = 8;
const BODY_KEYWORD_WEIGHT: u32 = 3;
const PHRASE_WEIGHT: u32 = 10;
const SUSPICIOUS_DOMAIN_WEIGHT: u32 = 25;
const EXCESSIVE_CAPS_WEIGHT: u32 = 15;
const EXCLAMATION_WEIGHT: u32 = 5;
const URL_DENSITY_WEIGHT: u32 = 20;
const MISSING_NAME_WEIGHT: u32 = 8;
const SUSPICIOUS_LOCAL_WEIGHT: u32 = 12;
const SHORT_WITH_LINKS_WEIGHT: u32 = 15;
const MONEY_MENTION_WEIGHT: u32 = 5;

/// Discrete reasons an email can accrue spam points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    KeywordSubject,
    KeywordBody,
    SpamPhrase,
    SuspiciousDomain,
    ExcessiveCaps,
    ExcessivePunctuation,
    HighUrlDensity,
    MissingSenderName,
    SuspiciousEmail,
    ShortWithLinks,
    MoneyMentions,
}

impl IndicatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::KeywordSubject => "keyword_subject",
            IndicatorType::KeywordBody => "keyword_body",
            IndicatorType::SpamPhrase => "spam_phrase",
            IndicatorType::SuspiciousDomain => "suspicious_domain",
            IndicatorType::ExcessiveCaps => "excessive_caps",
            IndicatorType::ExcessivePunctuation => "excessive_punctuation",
            IndicatorType::HighUrlDensity => "high_url_density",
            IndicatorType::MissingSenderName => "missing_sender_name",
            IndicatorType::SuspiciousEmail => "suspicious_email",
            IndicatorType::ShortWithLinks => "short_with_links",
            IndicatorType::MoneyMentions => "money_mentions",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword_subject" => Ok(IndicatorType::KeywordSubject),
            "keyword_body" => Ok(IndicatorType::KeywordBody),
            "spam_phrase" => Ok(IndicatorType::SpamPhrase),
            "suspicious_domain" => Ok(IndicatorType::SuspiciousDomain),
            "excessive_caps" => Ok(IndicatorType::ExcessiveCaps),
            "excessive_punctuation" => Ok(IndicatorType::ExcessivePunctuation),
            "high_url_density" => Ok(IndicatorType::HighUrlDensity),
            "missing_sender_name" => Ok(IndicatorType::MissingSenderName),
            "suspicious_email" => Ok(IndicatorType::SuspiciousEmail),
            "short_with_links" => Ok(IndicatorType::ShortWithLinks),
            "money_mentions" => Ok(IndicatorType::MoneyMentions),
            other => Err(format!("unknown indicator type: {other}")),
        }
    }
}

/// One triggered reason with its point contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamIndicator {
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub value: String,
    pub weight: u32,
}

pub type RuleFn = fn(&NormalizedEmail, &mut Vec<SpamIndicator>);

/// Evaluation order. Scores are order-independent (weights just sum), but
/// emission order is the tie-breaker when the aggregator sorts indicators
/// of equal weight.
pub const RULES: &[RuleFn] = &[
    check_subject_keywords,
    check_body_keywords,
    check_spam_phrases,
    check_suspicious_domain,
    check_excessive_caps,
    check_excessive_punctuation,
    check_url_density,
    check_missing_sender_name,
    check_suspicious_local_part,
    check_short_with_links,
    check_money_mentions,
];

/// Non-overlapping substring occurrences, e.g. "aaa" contains "aa" once.
fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

/// One indicator per keyword that appears in the subject at least once;
/// the weight scales with the occurrence count.
fn check_subject_keywords(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    for keyword in SPAM_KEYWORDS {
        let occurrences = count_occurrences(&email.lower_subject, keyword);
        if occurrences > 0 {
            indicators.push(SpamIndicator {
                indicator_type: IndicatorType::KeywordSubject,
                value: format!("Spam keyword in subject: \"{keyword}\""),
                weight: occurrences * SUBJECT_KEYWORD_WEIGHT,
            });
        }
    }
}

fn check_body_keywords(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    for keyword in SPAM_KEYWORDS {
        let occurrences = count_occurrences(&email.lower_body, keyword);
        if occurrences > 0 {
            indicators.push(SpamIndicator {
                indicator_type: IndicatorType::KeywordBody,
                value: format!("Spam keyword in body: \"{keyword}\" ({occurrences}x)"),
                weight: occurrences * BODY_KEYWORD_WEIGHT,
            });
        }
    }
}

/// Presence check on the combined text, flat weight per phrase.
fn check_spam_phrases(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    for phrase in SPAM_PHRASES {
        if email.full_text.contains(phrase) {
            indicators.push(SpamIndicator {
                indicator_type: IndicatorType::SpamPhrase,
                value: format!("Common spam phrase: \"{phrase}\""),
                weight: PHRASE_WEIGHT,
            });
        }
    }
}

/// At most one indicator no matter how many list entries match.
fn check_suspicious_domain(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if SUSPICIOUS_DOMAINS
        .iter()
        .any(|domain| email.sender_domain.contains(domain))
    {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::SuspiciousDomain,
            value: format!("Suspicious sender domain: {}", email.sender_domain),
            weight: SUSPICIOUS_DOMAIN_WEIGHT,
        });
    }
}

fn check_excessive_caps(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if let Some(ratio) = email.caps_ratio {
        if ratio > 0.5 && email.subject_len > 5 {
            indicators.push(SpamIndicator {
                indicator_type: IndicatorType::ExcessiveCaps,
                value: format!(
                    "Excessive capitals in subject ({}%)",
                    (ratio * 100.0).round() as u32
                ),
                weight: EXCESSIVE_CAPS_WEIGHT,
            });
        }
    }
}

fn check_excessive_punctuation(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if email.exclamation_count >= 3 {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::ExcessivePunctuation,
            value: format!("Multiple exclamation marks ({})", email.exclamation_count),
            weight: email.exclamation_count as u32 * EXCLAMATION_WEIGHT,
        });
    }
}

fn check_url_density(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if email.url_density > 0.1 && email.url_count > 3 {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::HighUrlDensity,
            value: format!("High URL density: {} URLs", email.url_count),
            weight: URL_DENSITY_WEIGHT,
        });
    }
}

fn check_missing_sender_name(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if email.input.sender_name.trim().is_empty() {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::MissingSenderName,
            value: "No sender name provided".to_string(),
            weight: MISSING_NAME_WEIGHT,
        });
    }
}

fn check_suspicious_local_part(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if RANDOM_LOCAL_RE.is_match(&email.sender_local) {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::SuspiciousEmail,
            value: "Suspicious email format (random characters)".to_string(),
            weight: SUSPICIOUS_LOCAL_WEIGHT,
        });
    }
}

fn check_short_with_links(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    if email.body_len < 50 && email.url_count > 0 {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::ShortWithLinks,
            value: "Very short message with links".to_string(),
            weight: SHORT_WITH_LINKS_WEIGHT,
        });
    }
}

/// Money mentions are counted in the body only; fewer than three is normal
/// correspondence and contributes nothing.
fn check_money_mentions(email: &NormalizedEmail, indicators: &mut Vec<SpamIndicator>) {
    let mentions = MONEY_RE.find_iter(&email.input.body).count() as u32;
    if mentions > 2 {
        indicators.push(SpamIndicator {
            indicator_type: IndicatorType::MoneyMentions,
            value: format!("Multiple money mentions ({mentions})"),
            weight: mentions * MONEY_MENTION_WEIGHT,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::EmailInput;

    fn normalized_indicators(input: &EmailInput) -> Vec<SpamIndicator> {
        let normalized = NormalizedEmail::from_input(input);
        let mut indicators = Vec::new();
        for rule in RULES {
            rule(&normalized, &mut indicators);
        }
        indicators
    }

    fn email(sender: &str, name: &str, subject: &str, body: &str) -> EmailInput {
        EmailInput {
            sender_email: sender.to_string(),
            sender_name: name.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    fn find<'a>(
        indicators: &'a [SpamIndicator],
        indicator_type: IndicatorType,
    ) -> Vec<&'a SpamIndicator> {
        indicators
            .iter()
            .filter(|i| i.indicator_type == indicator_type)
            .collect()
    }

    #[test]
    fn test_subject_keyword_scales_with_occurrences() {
        let input = email("a@b.com", "Alice", "lottery lottery", "nothing here");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::KeywordSubject);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 16);
        assert_eq!(found[0].value, "Spam keyword in subject: \"lottery\"");
    }

    #[test]
    fn test_body_keyword_one_indicator_per_keyword() {
        let input = email("a@b.com", "Alice", "hello", "lottery prize lottery");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::KeywordBody);
        assert_eq!(found.len(), 2);
        let lottery = found
            .iter()
            .find(|i| i.value.contains("lottery"))
            .unwrap();
        assert_eq!(lottery.weight, 6);
        assert_eq!(lottery.value, "Spam keyword in body: \"lottery\" (2x)");
    }

    #[test]
    fn test_substring_matching_is_deliberate() {
        // "winner" contains both "winner" and... nothing else, but "claim"
        // inside "disclaimer" is a real substring hit.
        let input = email("a@b.com", "Alice", "hello", "read the disclaimer");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::KeywordBody);
        assert_eq!(found.len(), 1);
        assert!(found[0].value.contains("claim"));
    }

    #[test]
    fn test_phrase_is_presence_not_count() {
        let input = email("a@b.com", "Alice", "act now", "act now act now act now");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::SpamPhrase);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 10);
    }

    #[test]
    fn test_phrase_spans_subject_and_body_boundary() {
        // full_text joins subject and body with a single space, so a phrase
        // can complete across the boundary.
        let input = email("a@b.com", "Alice", "please", "read this");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::SpamPhrase);
        assert_eq!(found.len(), 1);
        assert!(found[0].value.contains("please read"));
    }

    #[test]
    fn test_suspicious_domain_single_indicator() {
        let input = email("x@mail.tempmail.com", "Alice", "hello", "hi");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::SuspiciousDomain);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 25);
    }

    #[test]
    fn test_caps_rule_needs_long_enough_subject() {
        // All caps but too short to trigger.
        let input = email("a@b.com", "Alice", "HELLO", "hi there friend");
        assert!(find(&normalized_indicators(&input), IndicatorType::ExcessiveCaps).is_empty());

        let input = email("a@b.com", "Alice", "HELLO THERE", "hi there friend");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::ExcessiveCaps);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 15);
    }

    #[test]
    fn test_two_exclamations_are_fine() {
        let input = email("a@b.com", "Alice", "wow!!", "hi");
        assert!(find(
            &normalized_indicators(&input),
            IndicatorType::ExcessivePunctuation
        )
        .is_empty());
    }

    #[test]
    fn test_exclamations_scale() {
        let input = email("a@b.com", "Alice", "wow!!!!", "hi");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::ExcessivePunctuation);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 20);
    }

    #[test]
    fn test_url_density_needs_both_conditions() {
        // 4 URLs but in a long body: density too low.
        let body = format!(
            "{} http://a.com http://b.com http://c.com http://d.com",
            "word ".repeat(100)
        );
        let input = email("a@b.com", "Alice", "hello", &body);
        assert!(find(&normalized_indicators(&input), IndicatorType::HighUrlDensity).is_empty());

        // 4 URLs out of 4 words: triggers.
        let input = email(
            "a@b.com",
            "Alice",
            "hello",
            "http://a.com http://b.com http://c.com http://d.com",
        );
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::HighUrlDensity);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "High URL density: 4 URLs");
    }

    #[test]
    fn test_whitespace_sender_name_counts_as_missing() {
        let input = email("a@b.com", "   ", "hello", "hi there friend");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::MissingSenderName);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 8);
    }

    #[test]
    fn test_suspicious_local_part_digit_run() {
        let input = email("user12345@b.com", "Alice", "hello", "hi there friend");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::SuspiciousEmail);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 12);
    }

    #[test]
    fn test_suspicious_local_part_letter_run_any_case() {
        let input = email(
            "ABCDEFGHIJKLMNOP@b.com",
            "Alice",
            "hello",
            "hi there friend",
        );
        assert_eq!(
            find(&normalized_indicators(&input), IndicatorType::SuspiciousEmail).len(),
            1
        );
    }

    #[test]
    fn test_short_local_part_is_clean() {
        let input = email("sarah.johnson@b.com", "Sarah", "hello", "hi there friend");
        assert!(find(&normalized_indicators(&input), IndicatorType::SuspiciousEmail).is_empty());
    }

    #[test]
    fn test_short_body_with_link() {
        let input = email("a@b.com", "Alice", "hello", "see http://x.com");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::ShortWithLinks);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 15);
    }

    #[test]
    fn test_short_body_without_link_is_clean() {
        let input = email("a@b.com", "Alice", "hello", "ok");
        assert!(find(&normalized_indicators(&input), IndicatorType::ShortWithLinks).is_empty());
    }

    #[test]
    fn test_money_mentions_threshold() {
        let input = email("a@b.com", "Alice", "hello", "$100 and $200 only");
        assert!(find(&normalized_indicators(&input), IndicatorType::MoneyMentions).is_empty());

        let input = email("a@b.com", "Alice", "hello", "$100 then 50 dollars then 70 USD");
        let indicators = normalized_indicators(&input);
        let found = find(&indicators, IndicatorType::MoneyMentions);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, 15);
        assert_eq!(found[0].value, "Multiple money mentions (3)");
    }

    #[test]
    fn test_money_mentions_ignore_subject() {
        let input = email("a@b.com", "Alice", "$1 $2 $3 $4", "no currency here");
        assert!(find(&normalized_indicators(&input), IndicatorType::MoneyMentions).is_empty());
    }

    #[test]
    fn test_indicator_type_round_trips_through_strings() {
        let all = [
            IndicatorType::KeywordSubject,
            IndicatorType::KeywordBody,
            IndicatorType::SpamPhrase,
            IndicatorType::SuspiciousDomain,
            IndicatorType::ExcessiveCaps,
            IndicatorType::ExcessivePunctuation,
            IndicatorType::HighUrlDensity,
            IndicatorType::MissingSenderName,
            IndicatorType::SuspiciousEmail,
            IndicatorType::ShortWithLinks,
            IndicatorType::MoneyMentions,
        ];
        for t in all {
            assert_eq!(t.as_str().parse::<IndicatorType>().unwrap(), t);
        }
    }
}
