//! Error types for the multisend relayer

use thiserror::Error;

/// Main error type for building and submitting multisend calls
#[derive(Error, Debug)]
pub enum MultisendError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid address at slot {index}: {value:?}")]
    InvalidAddress { index: usize, value: String },

    #[error("Invalid amount at slot {index}: {value}")]
    InvalidAmount { index: usize, value: String },

    #[error("Too many recipients: got {count}, maximum is {max}")]
    TooManyRecipients { count: usize, max: usize },

    #[error("Length mismatch: {addresses} addresses but {amounts} amounts")]
    LengthMismatch { addresses: usize, amounts: usize },

    #[error("Slot {index} has a non-zero amount but no recipient address")]
    AmountWithoutRecipient { index: usize },

    #[error("Aggregate amount overflows 256 bits at slot {index}")]
    AmountOverflow { index: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    /// Structured error envelope from the endpoint. Some nodes omit `code`.
    #[error("RPC error: {message}")]
    Rpc { code: Option<i64>, message: String },

    /// The node answered with an all-zero hash instead of an error.
    #[error("Transaction is not yet available (node returned {reply})")]
    TransactionNotYetAvailable { reply: String },

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
}

impl MultisendError {
    /// Check if the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MultisendError::Transport(_) | MultisendError::TransactionNotYetAvailable { .. }
        )
    }
}

/// Result type for multisend operations
pub type MultisendResult<T> = Result<T, MultisendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(MultisendError::Transport("connection refused".into()).is_retryable());
        assert!(MultisendError::TransactionNotYetAvailable { reply: "0x0".into() }.is_retryable());
        assert!(!MultisendError::Rpc {
            code: Some(-32000),
            message: "insufficient funds".into()
        }
        .is_retryable());
        assert!(!MultisendError::InvalidAmount { index: 0, value: "abc".into() }.is_retryable());
    }

    #[test]
    fn test_rpc_message_preserved_in_display() {
        let err = MultisendError::Rpc {
            code: None,
            message: "insufficient funds".into(),
        };
        assert_eq!(err.to_string(), "RPC error: insufficient funds");
    }
}
