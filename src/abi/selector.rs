//! Function selector derivation
//!
//! A selector is the first four bytes of the legacy Keccak-256 digest of the
//! canonical signature. Legacy Keccak and the standardized SHA3-256 differ only
//! in padding, so a wrong hasher still yields plausible-looking bytes.

use sha3::{Digest, Keccak256};

/// `multiSendEther(address[100],uint256[100])`
pub const MULTI_SEND_ETHER_SIGNATURE: &str = "multiSendEther(address[100],uint256[100])";

/// `multiSendToken(address,address[100],uint256[100])`
pub const MULTI_SEND_TOKEN_SIGNATURE: &str = "multiSendToken(address,address[100],uint256[100])";

/// Size of a selector in bytes
pub const SELECTOR_LEN: usize = 4;

/// Compute the 4-byte selector for a canonical function signature
pub fn selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; SELECTOR_LEN];
    out.copy_from_slice(&digest[..SELECTOR_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::Sha3_256;

    #[test]
    fn test_known_erc20_selector() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_multisend_ether_selector() {
        assert_eq!(selector(MULTI_SEND_ETHER_SIGNATURE), [0x85, 0xe3, 0x7c, 0x33]);
    }

    #[test]
    fn test_multisend_token_selector() {
        assert_eq!(selector(MULTI_SEND_TOKEN_SIGNATURE), [0xab, 0x8f, 0xc5, 0x9d]);
    }

    #[test]
    fn test_differs_from_sha3_256() {
        let standardized = Sha3_256::digest(MULTI_SEND_ETHER_SIGNATURE.as_bytes());
        assert_eq!(&standardized[..4], &[0x12u8, 0x89, 0x16, 0xc3]);
        assert_ne!(&standardized[..4], &selector(MULTI_SEND_ETHER_SIGNATURE)[..]);
    }
}
