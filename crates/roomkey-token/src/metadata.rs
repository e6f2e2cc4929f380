//! Participant metadata attached to issued tokens.
//!
//! The voice agent reads this from the joining participant to decide which
//! assistant to run and which event the call belongs to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMetadata {
    #[serde(rename = "agentName", default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unified_event_id: Option<String>,
}

impl ParticipantMetadata {
    /// Builds metadata from request values. Empty strings are dropped.
    pub fn new(agent_name: Option<String>, unified_event_id: Option<String>) -> Self {
        Self {
            agent_name: agent_name.filter(|v| !v.is_empty()),
            unified_event_id: unified_event_id.filter(|v| !v.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.agent_name.is_none() && self.unified_event_id.is_none()
    }

    /// Serializes to the JSON string stored in the token's `metadata` claim.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
