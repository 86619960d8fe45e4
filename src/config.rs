//! Configuration management for the multisend relayer
//!
//! Loads configuration from TOML files with environment variable substitution.

use crate::abi::{Amount, ARITY};
use crate::network::Network;
use crate::tx::QuantityFormat;

use anyhow::{Context, Result};
use ethers::types::Address;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rpc: RpcConfig,
    pub network: NetworkConfig,
    pub sender: SenderConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    /// Overrides the known deployment for `name`
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SenderConfig {
    pub from: String,
    pub gas: u64,
    pub gas_price: u64,
    #[serde(default)]
    pub quantity_format: QuantityFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// ERC-20 token to distribute; ether is sent when absent
    pub token: Option<String>,
    #[serde(default)]
    pub recipients: Vec<RecipientConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipientConfig {
    pub address: String,
    pub ether: Option<f64>,
    pub wei: Option<String>,
}

impl RecipientConfig {
    /// The configured amount, from whichever unit was given
    pub fn amount(&self) -> Result<Amount> {
        match (self.ether, &self.wei) {
            (Some(ether), None) => Ok(Amount::Ether(ether)),
            (None, Some(wei)) => Ok(Amount::Wei(wei.clone())),
            _ => anyhow::bail!(
                "Recipient {} must set exactly one of `ether` or `wei`",
                self.address
            ),
        }
    }
}

impl Settings {
    /// Load settings from the file named by `MULTISEND_CONFIG`
    pub fn load() -> Result<Self> {
        let config_path = env::var("MULTISEND_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));
        Self::load_from(&config_path)
    }

    /// Load settings from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_toml_str(&config_str)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        // Substitute environment variables
        let config_str = substitute_env_vars(config_str);

        let settings: Settings =
            toml::from_str(&config_str).with_context(|| "Failed to parse configuration")?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        self.contract_address()?;
        self.from_address()?;

        if self.batch.recipients.is_empty() {
            anyhow::bail!("Batch has no recipients");
        }
        if self.batch.recipients.len() > ARITY {
            anyhow::bail!(
                "Batch has {} recipients, at most {} fit in one call",
                self.batch.recipients.len(),
                ARITY
            );
        }
        for recipient in &self.batch.recipients {
            recipient.amount()?;
        }
        if self.sender.gas == 0 {
            tracing::warn!("Gas limit is 0 - the node will likely reject the transaction");
        }

        Ok(())
    }

    /// Multisend contract to call: the override if set, otherwise the known deployment
    pub fn contract_address(&self) -> Result<Address> {
        match &self.network.contract_address {
            Some(address) => address
                .parse()
                .with_context(|| format!("Invalid contract address: {}", address)),
            None => {
                let network: Network = self.network.name.parse()?;
                Ok(network.multisend_address())
            }
        }
    }

    pub fn from_address(&self) -> Result<Address> {
        self.sender
            .from
            .parse()
            .with_context(|| format!("Invalid sender address: {}", self.sender.from))
    }

    /// Recipient addresses and amounts as parallel sequences
    pub fn batch_columns(&self) -> Result<(Vec<String>, Vec<Amount>)> {
        let addresses = self
            .batch
            .recipients
            .iter()
            .map(|r| r.address.clone())
            .collect();
        let amounts = self
            .batch
            .recipients
            .iter()
            .map(RecipientConfig::amount)
            .collect::<Result<Vec<_>>>()?;
        Ok((addresses, amounts))
    }
}

/// Substitute environment variables in the format ${VAR_NAME}
fn substitute_env_vars(input: &str) -> String {
    lazy_static::lazy_static! {
        static ref ENV_VAR: regex::Regex = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    }

    ENV_VAR
        .replace_all(input, |cap: &regex::Captures| {
            env::var(&cap[1]).unwrap_or_default()
        })
        .into_owned()
}
