pub mod api;
pub mod error;
pub mod knowledge_base;
pub mod model;
pub mod normalize;
pub mod retrieval;

pub use error::CoreError;
pub use knowledge_base::KnowledgeBase;
pub use model::{ConditionRecord, MatchResult};
pub use normalize::normalize;
pub use retrieval::{score, KeywordScore, RetrievalEngine};
