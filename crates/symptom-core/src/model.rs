use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single curated health condition (e.g. "Common Cold").
///
/// Records are loaded once at start-up and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Short unique identifier, e.g. "common_cold"
    pub key: String,
    /// Display name, e.g. "Common Cold"
    pub condition_name: String,
    /// Lowercase trigger terms. Single words ("cough") or short phrases ("runny nose").
    pub keywords: Vec<String>,
    /// Related condition names, display only
    #[serde(default)]
    pub related_terms: Vec<String>,
    /// Preventive advice, display only
    #[serde(default)]
    pub preventive_advice: Vec<String>,
    /// When to see a doctor, display only
    pub consult_doctor_guidance: String,
}

impl ConditionRecord {
    /// Number of keywords, the denominator of the match score. Knowledge base validation
    /// guarantees they are lowercase and distinct.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

/// One knowledge base record that overlapped a query.
///
/// Produced per call to `RetrievalEngine::retrieve` and borrowed from the knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'kb> {
    pub condition_key: &'kb str,
    pub condition_name: &'kb str,
    /// Percentage of the record's keywords present in the query, in (0.0, 100.0], one decimal.
    pub match_score: f64,
    /// Query tokens contributed by the matched keywords.
    pub matched_keywords: BTreeSet<String>,
    /// Matched keywords as written in the record, in record order.
    pub matched_phrases: Vec<&'kb str>,
    pub record: &'kb ConditionRecord,
}
