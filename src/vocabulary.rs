//! Fixed vocabularies and compiled patterns used by the rule evaluators.
//!
//! All of these are process-wide read-only constants. The lists are
//! hand-authored heuristics, not a trained model; changing a weight or a
//! keyword means editing this file and shipping a new build.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords counted in both subject and body. Matching is substring-based,
/// so "win" also hits inside "winner". That over-count is intentional and
/// relied on by the scoring tests.
pub const SPAM_KEYWORDS: &[&str] = &[
    "winner",
    "congratulations",
    "claim",
    "prize",
    "lottery",
    "casino",
    "viagra",
    "pharmacy",
    "prescription",
    "medication",
    "pills",
    "urgent",
    "act now",
    "limited time",
    "expires",
    "hurry",
    "free money",
    "cash bonus",
    "earn money",
    "work from home",
    "click here",
    "click below",
    "unsubscribe",
    "opt out",
    "guarantee",
    "no risk",
    "risk free",
    "satisfaction guaranteed",
    "debt",
    "credit",
    "loan",
    "refinance",
    "mortgage",
    "nigerian prince",
    "inheritance",
    "beneficiary",
    "account suspended",
    "verify account",
    "confirm identity",
    "password reset",
    "unusual activity",
    "security alert",
];

/// Phrases checked for presence (not counted) in the combined subject+body.
pub const SPAM_PHRASES: &[&str] = &[
    "act now",
    "apply now",
    "become a member",
    "call now",
    "click here",
    "get it now",
    "do it today",
    "dont delete",
    "earn extra cash",
    "extra income",
    "financial freedom",
    "free access",
    "free consultation",
    "free gift",
    "free preview",
    "get paid",
    "increase sales",
    "increase traffic",
    "lose weight",
    "make money",
    "million dollars",
    "once in lifetime",
    "order now",
    "please read",
    "special promotion",
    "while supplies last",
];

/// Disposable / throwaway mail providers. Matched as substrings of the
/// sender domain so subdomains are caught too.
pub const SUSPICIOUS_DOMAINS: &[&str] = &[
    "tempmail.com",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
    "10minutemail.com",
    "yopmail.com",
];

lazy_static! {
    /// URLs in the raw body. The scheme token is matched case-sensitively.
    pub static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();

    /// Money mentions: "$1,000" or "500 dollars" / "500 USD" etc.
    pub static ref MONEY_RE: Regex =
        Regex::new(r"(?i)\$[0-9,]+|\d+\s*(dollars|usd|eur|gbp)").unwrap();

    /// Local parts that look machine-generated: a long digit run or an
    /// unusually long unbroken letter run.
    pub static ref RANDOM_LOCAL_RE: Regex = Regex::new(r"(?i)[0-9]{5,}|[a-z]{15,}").unwrap();
}
