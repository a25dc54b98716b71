/// Error types for the symptom knowledge base.
///
/// Every variant describes a defect in the knowledge base data itself. They are raised while
/// the knowledge base is being built at start-up and are fatal there; retrieval never fails.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("knowledge base data is not valid JSON: {0}")]
    Data(#[from] serde_json::Error),

    #[error("knowledge base has no records")]
    EmptyKnowledgeBase,

    #[error("record #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("duplicate record key: {0}")]
    DuplicateKey(String),

    #[error("record '{key}' has no keywords")]
    NoKeywords { key: String },

    #[error("record '{key}' has an invalid keyword '{keyword}': {reason}")]
    InvalidKeyword {
        key: String,
        keyword: String,
        reason: &'static str,
    },

    #[error("record '{key}' lists keyword '{keyword}' more than once")]
    DuplicateKeyword { key: String, keyword: String },
}
