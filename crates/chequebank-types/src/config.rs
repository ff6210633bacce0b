//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{ChequeBankError, InstanceId, Result};

/// How a newly presented sign-over chain relates to a previously recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainPolicy {
    /// Any structurally valid chain replaces the recorded one.
    #[default]
    AcceptAny,
    /// A new chain must start with the recorded chain's records.
    MonotonicExtension,
}

/// Configuration for one ChequeBank engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bound into every cheque digest; cheques signed for another instance
    /// never verify here.
    pub instance_id: InstanceId,
    #[serde(default)]
    pub chain_policy: ChainPolicy,
}

impl EngineConfig {
    #[must_use]
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            chain_policy: ChainPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_chain_policy(mut self, chain_policy: ChainPolicy) -> Self {
        self.chain_policy = chain_policy;
        self
    }

    /// Parse a JSON configuration document.
    ///
    /// # Errors
    /// Returns `Configuration` if the document is malformed.
    pub fn from_json(doc: &str) -> Result<Self> {
        serde_json::from_str(doc).map_err(|e| ChequeBankError::Configuration(e.to_string()))
    }
}
