//! Prometheus metrics for monitoring
//!
//! Exposes metrics for:
//! - Payloads built per multisend function
//! - Submission outcomes

use crate::abi::CallKind;
use crate::error::{MultisendError, MultisendResult};

use ethers::types::H256;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

lazy_static! {
    pub static ref PAYLOADS_BUILT: CounterVec = register_counter_vec!(
        "multisend_payloads_built_total",
        "Total call payloads built by function",
        &["kind"]
    ).unwrap();

    pub static ref TX_SUBMISSIONS: CounterVec = register_counter_vec!(
        "multisend_transaction_submissions_total",
        "Total eth_sendTransaction calls by outcome",
        &["outcome"]
    ).unwrap();
}

/// Outcome label for a submission result
pub fn outcome_label(result: &MultisendResult<H256>) -> &'static str {
    match result {
        Ok(_) => "accepted",
        Err(MultisendError::TransactionNotYetAvailable { .. }) => "not_yet_available",
        Err(MultisendError::Rpc { .. }) => "rejected",
        Err(MultisendError::Transport(_)) => "transport_error",
        Err(_) => "malformed",
    }
}

/// Render every registered metric in the Prometheus text format
pub fn render() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

// Helper functions to record metrics

pub fn record_payload_built(kind: CallKind) {
    PAYLOADS_BUILT.with_label_values(&[kind.as_str()]).inc();
}

pub fn record_submission(result: &MultisendResult<H256>) {
    TX_SUBMISSIONS.with_label_values(&[outcome_label(result)]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&Ok(H256::zero())), "accepted");
        assert_eq!(
            outcome_label(&Err(MultisendError::TransactionNotYetAvailable { reply: "0x0".into() })),
            "not_yet_available"
        );
        assert_eq!(
            outcome_label(&Err(MultisendError::Rpc { code: Some(1), message: "x".into() })),
            "rejected"
        );
    }

    #[test]
    fn test_recorded_metrics_are_rendered() {
        let before = TX_SUBMISSIONS.with_label_values(&["transport_error"]).get();
        record_submission(&Err(MultisendError::Transport("refused".into())));
        record_payload_built(CallKind::Token);

        assert!(TX_SUBMISSIONS.with_label_values(&["transport_error"]).get() >= before + 1.0);

        let text = render().unwrap();
        assert!(text.contains("multisend_transaction_submissions_total"));
        assert!(text.contains("multisend_payloads_built_total"));
    }
}
