/// The curated condition knowledge base.
///
/// The built-in records ship inside the binary as JSON and are parsed and validated once at
/// start-up. After that the collection is read-only, so it can be shared behind an `Arc`
/// and read from any number of tasks without locking.
use std::collections::HashSet;

use tracing::info;

use crate::error::CoreError;
use crate::model::ConditionRecord;
use crate::normalize::has_non_word;

const BUILTIN_DATA: &str = include_str!("../data/knowledge_base.json");

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    records: Vec<ConditionRecord>,
}

impl KnowledgeBase {
    /// Load the knowledge base compiled into this crate.
    pub fn builtin() -> Result<Self, CoreError> {
        let kb = Self::from_json(BUILTIN_DATA)?;
        info!(records = kb.len(), "built-in knowledge base loaded");
        Ok(kb)
    }

    /// Parse a JSON array of condition records and validate it.
    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        let records: Vec<ConditionRecord> = serde_json::from_str(data)?;
        Self::from_records(records)
    }

    /// Validate `records` and wrap them. Declaration order is preserved.
    pub fn from_records(records: Vec<ConditionRecord>) -> Result<Self, CoreError> {
        validate(&records)?;
        Ok(Self { records })
    }

    /// Every record, in declaration order.
    pub fn all_records(&self) -> &[ConditionRecord] {
        &self.records
    }

    /// Look up a record by key, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&ConditionRecord> {
        self.records
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(key.trim()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn condition_names(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.condition_name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate(records: &[ConditionRecord]) -> Result<(), CoreError> {
    if records.is_empty() {
        return Err(CoreError::EmptyKnowledgeBase);
    }

    let mut seen_keys: HashSet<&str> = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        if record.key.trim().is_empty() {
            return Err(CoreError::EmptyKey { index });
        }
        if !seen_keys.insert(record.key.as_str()) {
            return Err(CoreError::DuplicateKey(record.key.clone()));
        }
        if record.keywords.is_empty() {
            return Err(CoreError::NoKeywords {
                key: record.key.clone(),
            });
        }

        let mut seen_keywords: HashSet<&str> = HashSet::new();
        for keyword in &record.keywords {
            check_keyword(&record.key, keyword)?;
            if !seen_keywords.insert(keyword.as_str()) {
                return Err(CoreError::DuplicateKeyword {
                    key: record.key.clone(),
                    keyword: keyword.clone(),
                });
            }
        }
    }
    Ok(())
}

/// A keyword must be able to match a normalized query: lowercase word characters, with
/// single spaces between the words of a phrase.
fn check_keyword(key: &str, keyword: &str) -> Result<(), CoreError> {
    let invalid = |reason| CoreError::InvalidKeyword {
        key: key.to_string(),
        keyword: keyword.to_string(),
        reason,
    };

    if keyword.is_empty() {
        return Err(invalid("keyword is empty"));
    }
    if keyword != keyword.to_lowercase() {
        return Err(invalid("keyword is not lowercase"));
    }
    if has_non_word(keyword) {
        return Err(invalid("keyword contains punctuation"));
    }
    if keyword.split(' ').any(str::is_empty)
        || keyword.chars().any(|c| c.is_whitespace() && c != ' ')
    {
        return Err(invalid("keyword has stray whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, keywords: &[&str]) -> ConditionRecord {
        ConditionRecord {
            key: key.to_string(),
            condition_name: key.to_uppercase(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            related_terms: Vec::new(),
            preventive_advice: vec!["rest".to_string()],
            consult_doctor_guidance: "see a doctor".to_string(),
        }
    }

    #[test]
    fn test_builtin_loads_in_declaration_order() {
        let kb = KnowledgeBase::builtin().unwrap();
        let keys: Vec<&str> = kb.keys().collect();
        assert_eq!(
            keys,
            vec![
                "common_cold",
                "influenza",
                "allergies",
                "headache",
                "fatigue",
                "gastrointestinal"
            ]
        );
        assert_eq!(kb.len(), 6);
    }

    #[test]
    fn test_builtin_records_are_complete() {
        let kb = KnowledgeBase::builtin().unwrap();
        for r in kb.all_records() {
            assert!(!r.condition_name.is_empty(), "{} has no name", r.key);
            assert!(!r.preventive_advice.is_empty(), "{} has no advice", r.key);
            assert!(!r.consult_doctor_guidance.is_empty(), "{} has no guidance", r.key);
            assert!(!r.related_terms.is_empty(), "{} has no related terms", r.key);
        }
        let cold = kb.get("common_cold").unwrap();
        assert_eq!(cold.condition_name, "Common Cold");
        assert_eq!(cold.keyword_count(), 5);
    }

    #[test]
    fn test_get_ignores_case_and_whitespace() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.get(" Influenza ").unwrap().key, "influenza");
        assert!(kb.get("measles").is_none());
    }

    #[test]
    fn test_condition_names() {
        let kb = KnowledgeBase::builtin().unwrap();
        let names = kb.condition_names();
        assert_eq!(names[0], "Common Cold");
        assert_eq!(names[1], "Influenza (Flu)");
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_rejects_empty_knowledge_base() {
        assert!(matches!(
            KnowledgeBase::from_records(Vec::new()),
            Err(CoreError::EmptyKnowledgeBase)
        ));
    }

    #[test]
    fn test_rejects_record_without_keywords() {
        let err = KnowledgeBase::from_records(vec![record("cold", &[])]).unwrap_err();
        assert!(matches!(err, CoreError::NoKeywords { ref key } if key == "cold"));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = KnowledgeBase::from_records(vec![record("a", &["x"]), record("a", &["y"])])
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateKey(ref k) if k == "a"));
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = KnowledgeBase::from_records(vec![record("a", &["x"]), record(" ", &["y"])])
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyKey { index: 1 }));
    }

    #[test]
    fn test_rejects_bad_keywords() {
        for bad in [
            "",
            "Cough",
            "sore-throat",
            "runny  nose",
            " cough",
            "cough!",
            "runny\tnose",
            "x\u{b2}",
            "\u{bd} dose",
        ] {
            let err = KnowledgeBase::from_records(vec![record("a", &[bad])]).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidKeyword { .. }),
                "expected '{bad}' to be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_accepts_keyword_with_combining_mark() {
        let keyword = "cafe\u{301}";
        let kb = KnowledgeBase::from_records(vec![record("a", &[keyword])]).unwrap();
        let engine = crate::retrieval::RetrievalEngine::new(kb);
        assert_eq!(engine.retrieve("too much cafe\u{301}!").len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_keyword() {
        let err =
            KnowledgeBase::from_records(vec![record("a", &["cough", "cough"])]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateKeyword { .. }));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            KnowledgeBase::from_json("{not json"),
            Err(CoreError::Data(_))
        ));
    }

    #[test]
    fn test_from_json_defaults_display_lists() {
        let kb = KnowledgeBase::from_json(
            r#"[{"key":"a","condition_name":"A","keywords":["x"],"consult_doctor_guidance":"g"}]"#,
        )
        .unwrap();
        let a = kb.get("a").unwrap();
        assert!(a.related_terms.is_empty());
        assert!(a.preventive_advice.is_empty());
    }
}
