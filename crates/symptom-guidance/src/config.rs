use crate::error::AppError;

const DEFAULT_TOP_K: usize = 3;
const DEFAULT_MAX_LIMIT: usize = 10;

/// Application configuration loaded explicitly from environment variables.
///
/// Every setting is optional. Malformed values are rejected at start-up rather than
/// silently replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of matches listed when the caller does not pass a limit.
    pub top_k: usize,
    /// Upper bound on a caller-supplied limit.
    pub max_limit: usize,
    /// TCP listen address (e.g. "127.0.0.1:7400"). `None` serves on stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_limit: DEFAULT_MAX_LIMIT,
            tcp_listen_addr: None,
        }
    }
}

impl Config {
    /// Optional:
    /// - `SYMPTOM_TOP_K`: default number of matches listed (default: 3)
    /// - `SYMPTOM_MAX_LIMIT`: cap on the `limit` tool argument (default: 10)
    /// - `MCP_TCP_LISTEN_ADDR`: serve MCP over TCP instead of stdio
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let top_k = parse_positive(&lookup, "SYMPTOM_TOP_K", DEFAULT_TOP_K)?;
        let max_limit = parse_positive(&lookup, "SYMPTOM_MAX_LIMIT", DEFAULT_MAX_LIMIT)?;
        if top_k > max_limit {
            return Err(AppError::Config(format!(
                "SYMPTOM_TOP_K ({top_k}) must not exceed SYMPTOM_MAX_LIMIT ({max_limit})"
            )));
        }

        let tcp_listen_addr = lookup("MCP_TCP_LISTEN_ADDR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            top_k,
            max_limit,
            tcp_listen_addr,
        })
    }

    /// Resolve a caller-supplied limit against the configured default and cap.
    pub fn effective_limit(&self, requested: Option<u32>) -> usize {
        requested
            .map(|n| n as usize)
            .filter(|&n| n > 0)
            .unwrap_or(self.top_k)
            .min(self.max_limit)
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
) -> Result<usize, AppError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| {
            AppError::Config(format!(
                "{name} must be a positive integer, got '{raw}'"
            ))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SYMPTOM_TOP_K", "5"),
            ("SYMPTOM_MAX_LIMIT", " 20 "),
            ("MCP_TCP_LISTEN_ADDR", "127.0.0.1:7400"),
        ])
        .unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.max_limit, 20);
        assert_eq!(config.tcp_listen_addr.as_deref(), Some("127.0.0.1:7400"));
    }

    #[test]
    fn test_blank_listen_addr_means_stdio() {
        let config = load(&[("MCP_TCP_LISTEN_ADDR", "  ")]).unwrap();
        assert!(config.tcp_listen_addr.is_none());
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        for bad in ["0", "-1", "three", ""] {
            let err = load(&[("SYMPTOM_TOP_K", bad)]).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_rejects_top_k_above_cap() {
        let err = load(&[("SYMPTOM_TOP_K", "8"), ("SYMPTOM_MAX_LIMIT", "4")]).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_effective_limit() {
        let config = Config::default();
        assert_eq!(config.effective_limit(None), 3);
        assert_eq!(config.effective_limit(Some(0)), 3);
        assert_eq!(config.effective_limit(Some(5)), 5);
        assert_eq!(config.effective_limit(Some(500)), 10);
    }
}
