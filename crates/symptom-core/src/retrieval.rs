/// Keyword-overlap retrieval over the knowledge base.
///
/// Each record is scored independently as the percentage of its own keywords present in the
/// query. A multi-word keyword ("runny nose") counts once, and only when all of its words
/// appear. Records that score zero are dropped and the rest are ranked by score, highest
/// first, with knowledge base order breaking ties.
use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::knowledge_base::KnowledgeBase;
use crate::model::MatchResult;
use crate::normalize::{keyword_tokens, normalize};

/// Result of scoring one keyword list against a query.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore<'k> {
    /// 0.0 when nothing matched, otherwise in (0.0, 100.0] rounded to one decimal.
    pub score: f64,
    pub matched_tokens: BTreeSet<String>,
    pub matched_phrases: Vec<&'k str>,
}

impl KeywordScore<'_> {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched_tokens: BTreeSet::new(),
            matched_phrases: Vec::new(),
        }
    }
}

/// Score `keywords` against an already normalized query.
///
/// The denominator is the number of distinct (case-folded) keywords, not the query length.
pub fn score<'k>(query_tokens: &HashSet<String>, keywords: &'k [String]) -> KeywordScore<'k> {
    if query_tokens.is_empty() {
        return KeywordScore::empty();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut result = KeywordScore::empty();

    for keyword in keywords {
        if !seen.insert(keyword.to_lowercase()) {
            continue;
        }
        let tokens = keyword_tokens(keyword);
        if !tokens.is_empty() && tokens.iter().all(|t| query_tokens.contains(t)) {
            result.matched_phrases.push(keyword.as_str());
            result.matched_tokens.extend(tokens);
        }
    }

    if result.matched_phrases.is_empty() {
        return KeywordScore::empty();
    }

    let ratio = result.matched_phrases.len() as f64 / seen.len() as f64;
    // A match never rounds down to zero, or it would be indistinguishable from no match.
    result.score = round_one_decimal(ratio * 100.0).max(MIN_MATCH_SCORE);
    result
}

/// Smallest score a non-empty match can carry.
const MIN_MATCH_SCORE: f64 = 0.1;

/// Round the exact binary value to one decimal place, ties to even.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Ranks knowledge base records against free-text symptom descriptions.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    knowledge_base: KnowledgeBase,
}

impl RetrievalEngine {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self { knowledge_base }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Return every record that overlaps `user_text`, best match first.
    ///
    /// Never fails. Input without any word characters gives an empty list. The list is not
    /// truncated; callers pick how many entries to show.
    pub fn retrieve(&self, user_text: &str) -> Vec<MatchResult<'_>> {
        let query_tokens = normalize(user_text);

        let mut matches: Vec<MatchResult<'_>> = self
            .knowledge_base
            .all_records()
            .iter()
            .filter_map(|record| {
                let scored = score(&query_tokens, &record.keywords);
                (scored.score > 0.0).then(|| MatchResult {
                    condition_key: &record.key,
                    condition_name: &record.condition_name,
                    match_score: scored.score,
                    matched_keywords: scored.matched_tokens,
                    matched_phrases: scored.matched_phrases,
                    record,
                })
            })
            .collect();

        // Stable: equal scores keep knowledge base order.
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

        debug!(
            tokens = query_tokens.len(),
            matches = matches.len(),
            "symptom retrieval complete"
        );
        matches
    }
}
