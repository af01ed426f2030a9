//! Maps a free-text question to one of a fixed set of canned SQL templates.
//!
//! Matching is an ordered walk over [`rules::RULES`] against a lower-cased,
//! trimmed copy of the question. Unmatched questions fall back to a generic
//! preview query that echoes the question as a SQL comment.

pub mod dataset;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use dataset::{DataPoint, DatasetParseError, DatasetTag};
pub use rules::{RULES, Rule};

pub const FALLBACK_EXPLANATION: &str = "Bu, verileri ön izlemek için basit bir sorgudur. Daha hedefli bir sorgu için lütfen daha spesifik ayrıntılar sağlayın.";

/// What a generated query computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Users,
    Sales,
    Revenue,
    Production,
    Oee,
    Quality,
    Generic,
}

impl From<DatasetTag> for QueryKind {
    fn from(tag: DatasetTag) -> Self {
        match tag {
            DatasetTag::Sales => QueryKind::Sales,
            DatasetTag::Revenue => QueryKind::Revenue,
            DatasetTag::Production => QueryKind::Production,
            DatasetTag::Oee => QueryKind::Oee,
            DatasetTag::Quality => QueryKind::Quality,
            DatasetTag::Default => QueryKind::Generic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlGenerationResult {
    pub sql: String,
    pub explanation: Option<String>,
    pub kind: QueryKind,
    pub dataset: DatasetTag,
}

impl From<&Rule> for SqlGenerationResult {
    fn from(rule: &Rule) -> Self {
        Self {
            sql: rule.sql.to_string(),
            explanation: Some(rule.explanation.to_string()),
            kind: rule.kind,
            dataset: rule.dataset,
        }
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Classifies `text` against the rule table. Never fails; the empty string and
/// unrecognised input both produce the fallback template.
pub fn classify(text: &str) -> SqlGenerationResult {
    let normalized = normalize(text);

    match RULES.iter().find(|rule| rule.matches(&normalized)) {
        Some(rule) => rule.into(),
        None => fallback(text),
    }
}

/// Generic preview query echoing the question as a comment.
///
/// Line breaks are collapsed so the echoed text stays inside the comment.
pub fn fallback(text: &str) -> SqlGenerationResult {
    let echoed = text
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    SqlGenerationResult {
        sql: format!("-- Oluşturulan: \"{}\"\nSELECT * FROM örnek_veri LIMIT 10;", echoed),
        explanation: Some(FALLBACK_EXPLANATION.to_string()),
        kind: QueryKind::Generic,
        dataset: DatasetTag::Default,
    }
}
