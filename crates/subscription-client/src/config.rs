//! # Client Configuration
//!
//! The deployment-wide program id and the membership credential mint, both
//! sourced from process configuration at construction time. Missing or
//! malformed values fail construction; nothing is defaulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{KeyParseError, ProgramId, Pubkey};

/// Environment variable naming the deployed program.
pub const PROGRAM_ID_VAR: &str = "SUBSCRIPTION_PROGRAM_ID";

/// Environment variable naming the membership credential mint.
pub const MEMBERSHIP_MINT_VAR: &str = "MEMBERSHIP_NFT_MINT";

/// Configuration failure at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing configuration: {0} is not set")]
    Missing(&'static str),

    /// A variable is set but does not parse as an identifier.
    #[error("invalid configuration: {var}: {source}")]
    Invalid {
        /// Which variable failed to parse.
        var: &'static str,
        /// Why it failed.
        #[source]
        source: KeyParseError,
    },
}

/// Client configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The deployed program everything is derived against.
    pub program_id: ProgramId,
    /// Mint of the membership credential used as eligibility proof.
    pub membership_mint: Pubkey,
}

impl ClientConfig {
    /// Build a configuration from known identifiers.
    pub fn new(program_id: ProgramId, membership_mint: Pubkey) -> Self {
        Self {
            program_id,
            membership_mint,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            program_id: read_key(PROGRAM_ID_VAR)?,
            membership_mint: read_key(MEMBERSHIP_MINT_VAR)?,
        })
    }
}

fn read_key(var: &'static str) -> Result<Pubkey, ConfigError> {
    let value = std::env::var(var).map_err(|_| ConfigError::Missing(var))?;
    value
        .parse()
        .map_err(|source| ConfigError::Invalid { var, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KEY_LEN;

    // One sequential test: env vars are process-global.
    #[test]
    fn test_from_env_lifecycle() {
        std::env::remove_var(PROGRAM_ID_VAR);
        std::env::remove_var(MEMBERSHIP_MINT_VAR);
        assert_eq!(
            ClientConfig::from_env().unwrap_err(),
            ConfigError::Missing(PROGRAM_ID_VAR)
        );

        std::env::set_var(PROGRAM_ID_VAR, hex::encode([1u8; KEY_LEN]));
        assert_eq!(
            ClientConfig::from_env().unwrap_err(),
            ConfigError::Missing(MEMBERSHIP_MINT_VAR)
        );

        std::env::set_var(MEMBERSHIP_MINT_VAR, "not-hex");
        assert!(matches!(
            ClientConfig::from_env().unwrap_err(),
            ConfigError::Invalid {
                var: MEMBERSHIP_MINT_VAR,
                ..
            }
        ));

        std::env::set_var(MEMBERSHIP_MINT_VAR, hex::encode([2u8; KEY_LEN]));
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.program_id, Pubkey::new([1u8; KEY_LEN]));
        assert_eq!(config.membership_mint, Pubkey::new([2u8; KEY_LEN]));

        std::env::remove_var(PROGRAM_ID_VAR);
        std::env::remove_var(MEMBERSHIP_MINT_VAR);
    }

    #[test]
    fn test_new_is_direct() {
        let config = ClientConfig::new(Pubkey::new([1u8; KEY_LEN]), Pubkey::new([2u8; KEY_LEN]));
        assert_eq!(config.program_id, Pubkey::new([1u8; KEY_LEN]));
    }
}
