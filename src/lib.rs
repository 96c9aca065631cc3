pub mod analyzer;
pub mod config;
pub mod normalization;
pub mod rules;
pub mod seed;
pub mod server;
pub mod store;
pub mod vocabulary;

pub use analyzer::{analyze, SpamAnalysisResult, MAX_SCORE, SPAM_THRESHOLD};
pub use config::Config;
pub use normalization::EmailInput;
pub use rules::{IndicatorType, SpamIndicator};
