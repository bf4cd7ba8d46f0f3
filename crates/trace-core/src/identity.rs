use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque submitter/reviewer identity supplied by the caller's auth layer.
///
/// Only `user_id` is persisted, verbatim, as `created_by` / `reviewed_by`.
/// No authentication or authorization happens in this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Stable user identifier from the identity provider.
    pub user_id: String,
    /// Human-readable name, if the provider supplies one.
    pub display_name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.user_id
    }
}
