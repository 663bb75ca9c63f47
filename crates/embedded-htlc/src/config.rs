//! HTLC contract configuration.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, HTLC_CONTRACT_ADDRESS};
use thiserror::Error;

/// Largest page the query API serves.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1024;

/// Spork id that switches the HTLC contract on.
pub const DEFAULT_HTLC_SPORK_ID: Hash = Hash([
    0xce, 0xb7, 0xe3, 0xa7, 0x1b, 0x8b, 0x4e, 0x7c, 0x52, 0x9c, 0x3a, 0x5f, 0x8f, 0x1e, 0x11, 0x4a,
    0x9e, 0x0d, 0x64, 0x2f, 0x9b, 0x2f, 0x63, 0x18, 0x2a, 0x6e, 0x87, 0x14, 0x63, 0xdd, 0x1e, 0x0b,
]);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has a value the contract cannot run with.
    #[error("invalid config field {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Input is not valid JSON for this config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HTLC contract configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtlcConfig {
    /// Governance spork gating every HTLC method.
    pub htlc_spork_id: Hash,
    /// Maximum page size of listing queries.
    pub max_page_size: u32,
    /// Reserved address the contract lives at.
    pub contract_address: Address,
}

impl Default for HtlcConfig {
    fn default() -> Self {
        Self {
            htlc_spork_id: DEFAULT_HTLC_SPORK_ID,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            contract_address: HTLC_CONTRACT_ADDRESS,
        }
    }
}

impl HtlcConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the contract cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "maxPageSize",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.contract_address.is_embedded() {
            return Err(ConfigError::InvalidField {
                field: "contractAddress",
                reason: format!("{} is not an embedded contract address", self.contract_address),
            });
        }
        Ok(())
    }
}
