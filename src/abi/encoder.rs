//! Fixed-width ABI word encoding for the multisend arrays
//!
//! Every address and every amount occupies one 32-byte big-endian word. Inputs
//! are bounded sequences of at most [`ARITY`] entries; shorter inputs are padded
//! with empty slots so the encoded arrays always hold exactly [`ARITY`] words.

use crate::error::{MultisendError, MultisendResult};

use ethers::types::{Address, U256};

/// Number of slots in each multisend array argument
pub const ARITY: usize = 100;

/// Size of one ABI word in bytes
pub const WORD_LEN: usize = 32;

/// Size of one encoded array argument in bytes
pub const ARRAY_LEN: usize = ARITY * WORD_LEN;

const WEI_PER_ETHER: f64 = 1e18;

/// An amount in one of its two accepted sources
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Ether as a float, scaled by 10^18.
    ///
    /// Scaling is done in f64, so values beyond 2^53 wei are rounded to the
    /// nearest representable float. Use [`Amount::Wei`] when exactness matters.
    Ether(f64),
    /// Wei as a base-10 integer string. An empty string is an empty slot.
    Wei(String),
}

impl Amount {
    /// Resolve the amount to wei. `index` is only used for error reporting.
    pub fn to_wei(&self, index: usize) -> MultisendResult<U256> {
        match self {
            Amount::Ether(ether) => ether_to_wei(index, *ether),
            Amount::Wei(wei) => parse_wei(index, wei),
        }
    }
}

impl From<f64> for Amount {
    fn from(ether: f64) -> Self {
        Amount::Ether(ether)
    }
}

impl From<&str> for Amount {
    fn from(wei: &str) -> Self {
        Amount::Wei(wei.to_string())
    }
}

impl From<String> for Amount {
    fn from(wei: String) -> Self {
        Amount::Wei(wei)
    }
}

/// Reject sequences longer than the fixed arity
pub fn check_arity(count: usize) -> MultisendResult<()> {
    if count > ARITY {
        return Err(MultisendError::TooManyRecipients { count, max: ARITY });
    }
    Ok(())
}

/// Parse a hex address slot. An empty slot yields `None`.
pub fn parse_address(index: usize, value: &str) -> MultisendResult<Option<Address>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let invalid = || MultisendError::InvalidAddress {
        index,
        value: value.to_string(),
    };

    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    if bytes.len() != Address::len_bytes() {
        return Err(invalid());
    }

    Ok(Some(Address::from_slice(&bytes)))
}

/// Left-pad an address into one ABI word
pub fn address_word(address: &Address) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[WORD_LEN - Address::len_bytes()..].copy_from_slice(address.as_bytes());
    word
}

/// Encode an integer as one big-endian ABI word
pub fn amount_word(value: &U256) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    value.to_big_endian(&mut word);
    word
}

/// Encode up to [`ARITY`] addresses into exactly [`ARRAY_LEN`] bytes.
///
/// Empty slots, including the padding past the end of `addresses`, encode as
/// the zero address.
pub fn encode_addresses<S: AsRef<str>>(addresses: &[S]) -> MultisendResult<Vec<u8>> {
    check_arity(addresses.len())?;

    let mut out = Vec::with_capacity(ARRAY_LEN);
    for (index, raw) in addresses.iter().enumerate() {
        let address = parse_address(index, raw.as_ref())?.unwrap_or_else(Address::zero);
        out.extend_from_slice(&address_word(&address));
    }
    out.resize(ARRAY_LEN, 0);

    Ok(out)
}

/// Encode up to [`ARITY`] amounts into exactly [`ARRAY_LEN`] bytes and return
/// the aggregate in wei alongside.
pub fn encode_amounts(amounts: &[Amount]) -> MultisendResult<(Vec<u8>, U256)> {
    check_arity(amounts.len())?;

    let mut out = Vec::with_capacity(ARRAY_LEN);
    let mut total = U256::zero();
    for (index, amount) in amounts.iter().enumerate() {
        let wei = amount.to_wei(index)?;
        total = total
            .checked_add(wei)
            .ok_or(MultisendError::AmountOverflow { index })?;
        out.extend_from_slice(&amount_word(&wei));
    }
    out.resize(ARRAY_LEN, 0);

    Ok((out, total))
}

/// Encode ether-denominated amounts
pub fn encode_amounts_from_ether(amounts: &[f64]) -> MultisendResult<(Vec<u8>, U256)> {
    let amounts: Vec<Amount> = amounts.iter().copied().map(Amount::Ether).collect();
    encode_amounts(&amounts)
}

/// Encode wei-denominated decimal strings
pub fn encode_amounts_from_wei<S: AsRef<str>>(amounts: &[S]) -> MultisendResult<(Vec<u8>, U256)> {
    let amounts: Vec<Amount> = amounts
        .iter()
        .map(|a| Amount::Wei(a.as_ref().to_string()))
        .collect();
    encode_amounts(&amounts)
}

/// Scale ether to wei: multiply by 1e18, round half away from zero, then read
/// back the zero-decimal rendering as an integer.
fn ether_to_wei(index: usize, ether: f64) -> MultisendResult<U256> {
    let invalid = || MultisendError::InvalidAmount {
        index,
        value: ether.to_string(),
    };

    if !ether.is_finite() || ether < 0.0 {
        return Err(invalid());
    }
    if ether == 0.0 {
        return Ok(U256::zero());
    }

    let scaled = (ether * WEI_PER_ETHER).round();
    let digits = format!("{:.0}", scaled);
    U256::from_dec_str(&digits).map_err(|_| invalid())
}

fn parse_wei(index: usize, wei: &str) -> MultisendResult<U256> {
    let trimmed = wei.trim();
    if trimmed.is_empty() {
        return Ok(U256::zero());
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MultisendError::InvalidAmount {
            index,
            value: wei.to_string(),
        });
    }
    U256::from_dec_str(trimmed).map_err(|_| MultisendError::InvalidAmount {
        index,
        value: wei.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(bytes: &[u8]) -> Vec<U256> {
        bytes.chunks(WORD_LEN).map(U256::from_big_endian).collect()
    }

    #[test]
    fn test_addresses_always_fill_the_array() {
        let encoded = encode_addresses::<&str>(&[]).unwrap();
        assert_eq!(encoded.len(), ARRAY_LEN);
        assert!(encoded.iter().all(|b| *b == 0));

        let encoded = encode_addresses(&["0x00B6845c6F47C770cE630B96df9BD4A6dA91C65d"]).unwrap();
        assert_eq!(encoded.len(), ARRAY_LEN);

        let full = vec!["0x00B6845c6F47C770cE630B96df9BD4A6dA91C65d"; ARITY];
        assert_eq!(encode_addresses(&full).unwrap().len(), ARRAY_LEN);
    }

    #[test]
    fn test_address_is_left_padded() {
        let encoded = encode_addresses(&["0x19bDc405cb5C673e30D56F8d9CEfB4b2009E36D6"]).unwrap();
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(
            hex::encode(&encoded[12..32]),
            "19bdc405cb5c673e30d56f8d9cefb4b2009e36d6"
        );
    }

    #[test]
    fn test_empty_slot_is_zero_word_and_order_is_kept() {
        let encoded = encode_addresses(&[
            "0x0000000000000000000000000000000000000001",
            "",
            "0000000000000000000000000000000000000003",
        ])
        .unwrap();

        assert_eq!(encoded[31], 1);
        assert_eq!(&encoded[32..64], &[0u8; 32]);
        assert_eq!(encoded[95], 3);
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        for bad in ["0x1234", "0xzz00000000000000000000000000000000000000", "not an address"] {
            let err = encode_addresses(&["", bad]).unwrap_err();
            assert!(
                matches!(err, MultisendError::InvalidAddress { index: 1, .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_too_many_slots_is_rejected() {
        let addresses = vec![""; ARITY + 1];
        assert!(matches!(
            encode_addresses(&addresses),
            Err(MultisendError::TooManyRecipients { count: 101, max: 100 })
        ));

        let amounts = vec![0.0; ARITY + 1];
        assert!(matches!(
            encode_amounts_from_ether(&amounts),
            Err(MultisendError::TooManyRecipients { .. })
        ));
    }

    #[test]
    fn test_word_sum_matches_total() {
        let (encoded, total) = encode_amounts_from_ether(&[0.32, 1.0, 0.0, 2.25, 1e-9]).unwrap();
        assert_eq!(encoded.len(), ARRAY_LEN);

        let sum = words(&encoded)
            .into_iter()
            .fold(U256::zero(), |acc, w| acc + w);
        assert_eq!(sum, total);
        assert_eq!(total, U256::from_dec_str("3570000001000000000").unwrap());
    }

    #[test]
    fn test_ether_and_wei_paths_agree() {
        let (from_ether, ether_total) = encode_amounts_from_ether(&[1.5]).unwrap();
        let (from_wei, wei_total) = encode_amounts_from_wei(&["1500000000000000000"]).unwrap();

        assert_eq!(from_ether, from_wei);
        assert_eq!(ether_total, wei_total);
        assert_eq!(wei_total, U256::from(1_500_000_000_000_000_000u64));
    }

    #[test]
    fn test_ether_rounding_and_precision_boundary() {
        assert_eq!(Amount::Ether(1e-18).to_wei(0).unwrap(), U256::one());
        assert_eq!(Amount::Ether(1.5e-18).to_wei(0).unwrap(), U256::from(2));
        // f64 cannot hold every wei value above 2^53; the float path keeps the float's value.
        assert_eq!(
            Amount::Ether(12345.678).to_wei(0).unwrap(),
            U256::from_dec_str("12345678000000000327680").unwrap()
        );
        assert_eq!(
            Amount::Wei("12345678000000000000000".into()).to_wei(0).unwrap(),
            U256::from_dec_str("12345678000000000000000").unwrap()
        );
    }

    #[test]
    fn test_negative_and_non_finite_ether_rejected() {
        for bad in [-1.0, -1e-18, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Amount::Ether(bad).to_wei(7),
                Err(MultisendError::InvalidAmount { index: 7, .. })
            ));
        }
        assert_eq!(Amount::Ether(-0.0).to_wei(0).unwrap(), U256::zero());
    }

    #[test]
    fn test_wei_strings() {
        assert_eq!(Amount::Wei(String::new()).to_wei(0).unwrap(), U256::zero());
        for bad in ["-5", "1.5", "0x10", "12abc"] {
            assert!(
                matches!(
                    Amount::Wei(bad.into()).to_wei(3),
                    Err(MultisendError::InvalidAmount { index: 3, .. })
                ),
                "{bad}"
            );
        }
        // 2^256 does not fit in a word
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(Amount::Wei(too_big.into()).to_wei(0).is_err());
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let max = U256::MAX.to_string();
        let err = encode_amounts_from_wei(&[max.as_str(), "1"]).unwrap_err();
        assert!(matches!(err, MultisendError::AmountOverflow { index: 1 }));
    }
}
