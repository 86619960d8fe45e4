//! `eth_sendTransaction` parameter object

use crate::abi::CallPayload;

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// How numeric quantities are rendered in the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityFormat {
    #[default]
    Decimal,
    Hex,
}

impl QuantityFormat {
    pub fn render(&self, value: U256) -> String {
        match self {
            QuantityFormat::Decimal => value.to_string(),
            QuantityFormat::Hex => format!("{:#x}", value),
        }
    }
}

/// The single parameter of an `eth_sendTransaction` call.
///
/// Signing is left to the node, which must hold the `from` account unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    pub from: String,
    pub to: String,
    pub value: String,
    pub data: String,
    pub gas: String,
    pub gas_price: String,
}

impl SendTransactionRequest {
    /// Wrap a built payload for submission to `contract`
    pub fn from_payload(
        payload: &CallPayload,
        from: Address,
        contract: Address,
        gas: u64,
        gas_price: u64,
        format: QuantityFormat,
    ) -> Self {
        Self {
            from: format!("{:?}", from),
            to: format!("{:?}", contract),
            value: format.render(payload.value()),
            data: payload.data_hex(),
            gas: format.render(U256::from(gas)),
            gas_price: format.render(U256::from(gas_price)),
        }
    }
}
