//! Staged lenient JSON decoding.
//!
//! Hand-maintained configuration files often carry trailing commas or
//! unquoted enum-like literals. Decoding tries the text as-is first and only
//! rewrites it when the previous stage failed. Each stage builds on the text
//! of the one before.
//!
//! The token-quoting stage is blunt: it quotes every run of
//! `[A-Za-z0-9._-]`, so numbers and booleans decode as strings and string
//! values containing other characters (spaces, slashes) usually break.

use crate::error::LoaderError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStage {
    Strict,
    TrailingSeparators,
    QuotedTokens,
}

impl RepairStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::TrailingSeparators => "trailing_separators",
            Self::QuotedTokens => "quoted_tokens",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Strict => Some(Self::TrailingSeparators),
            Self::TrailingSeparators => Some(Self::QuotedTokens),
            Self::QuotedTokens => None,
        }
    }

    fn apply(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Strict => Cow::Borrowed(text),
            Self::TrailingSeparators => trailing_separator_re().replace_all(text, "${1}${2}"),
            Self::QuotedTokens => bare_token_re().replace_all(text, "\"${2}\""),
        }
    }
}

impl fmt::Display for RepairStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded document and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub stage: RepairStage,
}

fn trailing_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r",(\s*)([\]}])").expect("trailing separator regex must compile")
    })
}

fn bare_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"("?)([A-Za-z0-9._-]+)("?)"#).expect("bare token regex must compile")
    })
}

/// Decodes `text`, repairing it stage by stage up to and including
/// `max_stage`. On failure the error names the last stage attempted.
pub fn decode(text: &str, max_stage: RepairStage) -> Result<Decoded, LoaderError> {
    let mut candidate = Cow::Borrowed(text);
    let mut stage = RepairStage::Strict;
    loop {
        let source = match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => return Ok(Decoded { value, stage }),
            Err(source) => source,
        };
        match stage.next().filter(|next| *next <= max_stage) {
            Some(next) => {
                candidate = Cow::Owned(next.apply(&candidate).into_owned());
                stage = next;
            }
            None => return Err(LoaderError::Decode { stage, source }),
        }
    }
}

/// Decodes `text` with every repair stage enabled.
pub fn decode_lenient(text: &str) -> Result<Decoded, LoaderError> {
    decode(text, RepairStage::QuotedTokens)
}
