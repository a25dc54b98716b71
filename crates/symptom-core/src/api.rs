use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ConditionRecord, MatchResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeSymptomsParams {
    /// Symptoms described in your own words, e.g. "I have a runny nose and keep sneezing".
    pub symptoms: String,
    /// Maximum number of matches to list (default: 3).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetConditionParams {
    /// Condition key such as "common_cold" or "influenza".
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionMatch {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub key: String,
    pub name: String,
    /// Percentage of the condition's keywords found in the input (0-100, one decimal).
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
}

impl ConditionMatch {
    pub fn from_match(rank: usize, m: &MatchResult<'_>) -> Self {
        Self {
            rank,
            key: m.condition_key.to_string(),
            name: m.condition_name.to_string(),
            match_score: m.match_score,
            matched_keywords: m.matched_keywords.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PreventiveGuidance {
    pub key: String,
    pub name: String,
    pub related_conditions: Vec<String>,
    pub preventive_advice: Vec<String>,
    pub consult_doctor: String,
}

impl From<&ConditionRecord> for PreventiveGuidance {
    fn from(record: &ConditionRecord) -> Self {
        Self {
            key: record.key.clone(),
            name: record.condition_name.clone(),
            related_conditions: record.related_terms.clone(),
            preventive_advice: record.preventive_advice.clone(),
            consult_doctor: record.consult_doctor_guidance.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeSymptomsResponse {
    pub disclaimer: String,
    pub input: String,
    /// Total number of conditions that matched, before `limit` is applied.
    pub match_count: usize,
    pub matches: Vec<ConditionMatch>,
    /// Guidance for the top match. Absent when nothing matched.
    pub guidance: Option<PreventiveGuidance>,
    /// Set when nothing matched.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionDetailResponse {
    pub disclaimer: String,
    pub key: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub related_conditions: Vec<String>,
    pub preventive_advice: Vec<String>,
    pub consult_doctor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionSummary {
    pub key: String,
    pub name: String,
    pub keyword_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConditionListResponse {
    pub disclaimer: String,
    pub conditions: Vec<ConditionSummary>,
}
