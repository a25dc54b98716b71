/// Shapes retrieval results into tool responses.
///
/// Everything here is plain data: the engine supplies ranked matches and this module picks
/// how many to list, attaches the top match's guidance and stamps the disclaimer on every
/// response. No markup is produced.
use symptom_core::api::{
    AnalyzeSymptomsResponse, ConditionDetailResponse, ConditionListResponse, ConditionMatch,
    ConditionSummary, PreventiveGuidance,
};
use symptom_core::{KnowledgeBase, RetrievalEngine};
use tracing::info;

use crate::config::Config;

pub const DISCLAIMER: &str = "IMPORTANT MEDICAL DISCLAIMER: This system provides informational and \
preventive guidance only. It does not provide a medical diagnosis, does not replace professional \
medical advice from a healthcare provider, does not constitute medical treatment, and does not \
guarantee the accuracy of any analysis. Always consult a licensed healthcare professional for \
diagnosis and treatment. In an emergency, call emergency services immediately.";

pub const NO_MATCH_MESSAGE: &str = "No matching information was found in the knowledge base. \
Please consult a healthcare professional for a proper assessment.";

pub const EMPTY_INPUT_MESSAGE: &str = "please describe your symptoms to proceed";

pub fn analyze_symptoms(
    engine: &RetrievalEngine,
    config: &Config,
    symptoms: &str,
    limit: Option<u32>,
) -> Result<AnalyzeSymptomsResponse, String> {
    let input = symptoms.trim();
    if input.is_empty() {
        return Err(EMPTY_INPUT_MESSAGE.to_string());
    }

    let results = engine.retrieve(input);
    let limit = config.effective_limit(limit);
    info!(match_count = results.len(), limit, "symptoms analyzed");

    let matches: Vec<ConditionMatch> = results
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, m)| ConditionMatch::from_match(i + 1, m))
        .collect();
    let guidance = results.first().map(|top| PreventiveGuidance::from(top.record));
    let message = guidance.is_none().then(|| NO_MATCH_MESSAGE.to_string());

    Ok(AnalyzeSymptomsResponse {
        disclaimer: DISCLAIMER.to_string(),
        input: input.to_string(),
        match_count: results.len(),
        matches,
        guidance,
        message,
    })
}

pub fn condition_detail(kb: &KnowledgeBase, key: &str) -> Result<ConditionDetailResponse, String> {
    let key = key.trim();
    if key.is_empty() {
        return Err("key must not be empty".to_string());
    }

    let record = kb.get(key).ok_or_else(|| {
        let available: Vec<&str> = kb.keys().collect();
        format!(
            "unknown condition: '{key}'. Available conditions: {}",
            available.join(", ")
        )
    })?;

    Ok(ConditionDetailResponse {
        disclaimer: DISCLAIMER.to_string(),
        key: record.key.clone(),
        name: record.condition_name.clone(),
        keywords: record.keywords.clone(),
        related_conditions: record.related_terms.clone(),
        preventive_advice: record.preventive_advice.clone(),
        consult_doctor: record.consult_doctor_guidance.clone(),
    })
}

pub fn list_conditions(kb: &KnowledgeBase) -> ConditionListResponse {
    ConditionListResponse {
        disclaimer: DISCLAIMER.to_string(),
        conditions: kb
            .all_records()
            .iter()
            .map(|r| ConditionSummary {
                key: r.key.clone(),
                name: r.condition_name.clone(),
                keyword_count: r.keyword_count(),
            })
            .collect(),
    }
}
