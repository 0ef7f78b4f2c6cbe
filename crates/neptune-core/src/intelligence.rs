//! Aggregate workspace business context derived from conversation history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessGoal {
    pub goal: String,
    /// 1 = highest priority.
    pub priority: i32,
}

/// Business context for one workspace, as extracted by the oracle.
///
/// All fields are optional or default-empty: an oracle response that omits a
/// field must never erase a previously learned value (the storage layer
/// upserts with `COALESCE` semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceProfile {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub business_model: Option<String>,
    #[serde(default)]
    pub goals: Vec<BusinessGoal>,
    #[serde(default)]
    pub strategic_priorities: Vec<String>,
}

impl WorkspaceProfile {
    /// True when the oracle produced nothing usable at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.business_model.is_none()
            && self.goals.is_empty()
            && self.strategic_priorities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_tolerates_missing_fields() {
        let profile: WorkspaceProfile = serde_json::from_str(r#"{"industry": "SaaS"}"#).unwrap();
        assert_eq!(profile.industry.as_deref(), Some("SaaS"));
        assert!(profile.goals.is_empty());
        assert!(!profile.is_empty());
    }

    #[test]
    fn empty_profile_is_empty() {
        let profile: WorkspaceProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());
    }
}
