//! Review workflow settings.

use serde::{Deserialize, Serialize};
use trace_core::enums::ReviewPolicy;
use trace_core::pending::DEFAULT_PAGE_LIMIT;

use crate::error::ConfigError;

const fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Page size of the pending-request query when the caller gives no limit.
    #[serde(default = "default_page_limit")]
    pub default_page_limit: u32,

    /// Whether already reviewed requests may be reviewed again.
    #[serde(default)]
    pub policy: ReviewPolicy,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_page_limit: default_page_limit(),
            policy: ReviewPolicy::default(),
        }
    }
}

impl ReviewConfig {
    /// Reject values the review workflow cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "review.default_page_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReviewConfig::default();
        assert_eq!(config.default_page_limit, 10);
        assert_eq!(config.policy, ReviewPolicy::Overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_limit_is_invalid() {
        let config = ReviewConfig {
            default_page_limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
