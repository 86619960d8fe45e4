//! Multisend call payload assembly
//!
//! `data` is `selector ‖ [token word ‖] address words ‖ amount words`. The
//! order is fixed by the contract ABI; array sizes live in the selector, so no
//! length prefix is written.

use super::encoder::{self, Amount, ARRAY_LEN, WORD_LEN};
use super::selector::{
    selector, MULTI_SEND_ETHER_SIGNATURE, MULTI_SEND_TOKEN_SIGNATURE, SELECTOR_LEN,
};
use crate::error::{MultisendError, MultisendResult};

use ethers::types::U256;
use tracing::debug;

/// Length of a `multiSendEther` payload
pub const ETHER_CALL_LEN: usize = SELECTOR_LEN + 2 * ARRAY_LEN;

/// Length of a `multiSendToken` payload
pub const TOKEN_CALL_LEN: usize = SELECTOR_LEN + WORD_LEN + 2 * ARRAY_LEN;

/// Which multisend function a payload calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Ether,
    Token,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Ether => "ether",
            CallKind::Token => "token",
        }
    }
}

/// An immutable, fully encoded multisend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPayload {
    kind: CallKind,
    data: Vec<u8>,
    value: U256,
    total: U256,
}

impl CallPayload {
    pub fn kind(&self) -> CallKind {
        self.kind
    }

    /// Encoded call data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Call data as a `0x`-prefixed hex string
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }

    /// Native value to attach to the transaction, in wei
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Sum of every amount slot. Equals `value` for ether calls.
    pub fn total(&self) -> U256 {
        self.total
    }
}

/// Build a `multiSendEther` call from ether-denominated amounts
pub fn build_ether_call<S: AsRef<str>>(
    addresses: &[S],
    amounts: &[f64],
) -> MultisendResult<CallPayload> {
    let amounts: Vec<Amount> = amounts.iter().copied().map(Amount::Ether).collect();
    build_call(addresses, &amounts)
}

/// Build a `multiSendEther` call from wei-denominated decimal strings
pub fn build_wei_call<S: AsRef<str>, W: AsRef<str>>(
    addresses: &[S],
    amounts: &[W],
) -> MultisendResult<CallPayload> {
    let amounts: Vec<Amount> = amounts
        .iter()
        .map(|a| Amount::Wei(a.as_ref().to_string()))
        .collect();
    build_call(addresses, &amounts)
}

/// Build a `multiSendEther` call. The aggregate becomes the transaction value.
pub fn build_call<S: AsRef<str>>(
    addresses: &[S],
    amounts: &[Amount],
) -> MultisendResult<CallPayload> {
    let (address_words, amount_words, total) = encode_arrays(addresses, amounts)?;

    let mut data = Vec::with_capacity(ETHER_CALL_LEN);
    data.extend_from_slice(&selector(MULTI_SEND_ETHER_SIGNATURE));
    data.extend_from_slice(&address_words);
    data.extend_from_slice(&amount_words);

    debug!("Built multiSendEther payload: {} bytes, value {}", data.len(), total);
    crate::metrics::record_payload_built(CallKind::Ether);

    Ok(CallPayload {
        kind: CallKind::Ether,
        data,
        value: total,
        total,
    })
}

/// Build a `multiSendToken` call. No native value is attached; the token
/// total is reported through [`CallPayload::total`].
pub fn build_token_call<S: AsRef<str>>(
    token: &str,
    addresses: &[S],
    amounts: &[Amount],
) -> MultisendResult<CallPayload> {
    let token = encoder::parse_address(0, token)?
        .filter(|a| !a.is_zero())
        .ok_or_else(|| MultisendError::InvalidAddress {
            index: 0,
            value: token.to_string(),
        })?;
    let (address_words, amount_words, total) = encode_arrays(addresses, amounts)?;

    let mut data = Vec::with_capacity(TOKEN_CALL_LEN);
    data.extend_from_slice(&selector(MULTI_SEND_TOKEN_SIGNATURE));
    data.extend_from_slice(&encoder::address_word(&token));
    data.extend_from_slice(&address_words);
    data.extend_from_slice(&amount_words);

    debug!(
        "Built multiSendToken payload for {:?}: {} bytes, token total {}",
        token,
        data.len(),
        total
    );
    crate::metrics::record_payload_built(CallKind::Token);

    Ok(CallPayload {
        kind: CallKind::Token,
        data,
        value: U256::zero(),
        total,
    })
}

/// Validate the paired sequences and encode both arrays
fn encode_arrays<S: AsRef<str>>(
    addresses: &[S],
    amounts: &[Amount],
) -> MultisendResult<(Vec<u8>, Vec<u8>, U256)> {
    if addresses.len() != amounts.len() {
        return Err(MultisendError::LengthMismatch {
            addresses: addresses.len(),
            amounts: amounts.len(),
        });
    }
    encoder::check_arity(addresses.len())?;

    // Funds paired with an empty slot would go to the zero address
    for (index, (address, amount)) in addresses.iter().zip(amounts).enumerate() {
        if address.as_ref().trim().is_empty() && !amount.to_wei(index)?.is_zero() {
            return Err(MultisendError::AmountWithoutRecipient { index });
        }
    }

    let address_words = encoder::encode_addresses(addresses)?;
    let (amount_words, total) = encoder::encode_amounts(amounts)?;
    Ok((address_words, amount_words, total))
}
