//! Annotation tags embedded in field descriptions
//!
//! Descriptions may carry `[DISABLED]`, `[DISABLED: "reason"]`, `[HIDDEN]`,
//! `[HIDDEN: "reason"]` and `[BETA]`. Tags are lifted into structured flags
//! and removed from the visible text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DISABLED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[DISABLED(?:\s*:\s*"?([^"]*)")?\]"#).unwrap());

static HIDDEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[HIDDEN(?:\s*:\s*"?([^"]*)")?\]"#).unwrap());

static BETA_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[BETA\]").unwrap());

static ANY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[(?:DISABLED|HIDDEN)(?:\s*:\s*"?[^"]*")?\]|\[BETA\]"#).unwrap()
});

/// A tag that is either absent/present or present with a reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Flag {
    Set(bool),
    Reason(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        !matches!(self, Flag::Set(false))
    }
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Set(false)
    }
}

/// Result of lifting tags out of a description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    /// Description with tags removed, trimmed
    pub description: String,
    pub disabled: Flag,
    pub hidden: Flag,
    pub additional_meta: Vec<String>,
}

fn flag_for(pattern: &Regex, text: &str) -> Flag {
    match pattern.captures(text) {
        Some(caps) => match caps.get(1) {
            Some(reason) => Flag::Reason(reason.as_str().trim().to_string()),
            None => Flag::Set(true),
        },
        None => Flag::Set(false),
    }
}

/// Parse the tags out of a field description
pub fn parse_tags(text: &str) -> FieldTags {
    let text = text.trim();

    let mut additional_meta = Vec::new();
    if BETA_TAG.is_match(text) {
        additional_meta.push("BETA".to_string());
    }

    FieldTags {
        description: ANY_TAG.replace_all(text, "").trim().to_string(),
        disabled: flag_for(&DISABLED_TAG, text),
        hidden: flag_for(&HIDDEN_TAG, text),
        additional_meta,
    }
}
