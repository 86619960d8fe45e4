//! One-shot `eth_sendTransaction` submission
//!
//! Some node implementations report an account that could not be unlocked by
//! returning an all-zero hash instead of a JSON-RPC error. Such replies are
//! surfaced as [`MultisendError::TransactionNotYetAvailable`], never as success.

use super::request::SendTransactionRequest;
use crate::error::{MultisendError, MultisendResult};

use ethers::providers::{HttpClientError, JsonRpcClient, RpcError};
use ethers::types::H256;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

const SEND_TRANSACTION: &str = "eth_sendTransaction";

lazy_static! {
    static ref ZERO_HASH: Regex = Regex::new("^0?x?0+$").unwrap();
}

/// Whether a reply is the zero-hash sentinel
pub fn is_zero_hash(reply: &str) -> bool {
    ZERO_HASH.is_match(reply)
}

/// Submits transactions through any JSON-RPC transport
pub struct TransactionSubmitter<C> {
    client: C,
}

impl<C> TransactionSubmitter<C>
where
    C: JsonRpcClient,
    C::Error: 'static,
{
    /// Create a new submitter over `client`
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Send the request once and return the accepted transaction hash.
    ///
    /// Nothing is retried here; see [`MultisendError::is_retryable`].
    pub async fn submit(&self, request: &SendTransactionRequest) -> MultisendResult<H256> {
        debug!(
            "Submitting {} from {} to {} (value {})",
            SEND_TRANSACTION, request.from, request.to, request.value
        );

        let result = self
            .client
            .request::<_, String>(SEND_TRANSACTION, [request])
            .await
            .map_err(classify_error);

        let outcome = result.and_then(|reply| normalize_reply(&reply));
        crate::metrics::record_submission(&outcome);

        match &outcome {
            Ok(hash) => info!("Transaction accepted: {:?}", hash),
            Err(e) => warn!("Transaction submission failed: {}", e),
        }

        outcome
    }
}

/// Map a transport-level failure onto the error taxonomy
fn classify_error<E: RpcError + 'static>(err: E) -> MultisendError {
    if let Some(rpc) = err.as_error_response() {
        return MultisendError::Rpc {
            code: Some(rpc.code),
            message: rpc.message.clone(),
        };
    }
    if let Some(serde_err) = err.as_serde_error() {
        // The HTTP transport keeps the raw body of replies it could not decode
        let source: &(dyn std::error::Error + 'static) = &err;
        let http_err = source.downcast_ref::<HttpClientError>();
        if let Some(HttpClientError::SerdeJson { text, .. }) = http_err {
            if let Some(classified) = classify_body(text) {
                return classified;
            }
        }
        return MultisendError::MalformedResponse(serde_err.to_string());
    }
    MultisendError::Transport(err.to_string())
}

/// Classify a reply body the transport could not decode.
///
/// Error envelopes carrying only `error.message` are still RPC errors; a body
/// that is not JSON at all came from something other than a JSON-RPC node.
fn classify_body(text: &str) -> Option<MultisendError> {
    let body: serde_json::Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) => {
            let snippet: String = text.chars().take(120).collect();
            return Some(MultisendError::Transport(format!(
                "endpoint returned a non-JSON body: {}",
                snippet
            )));
        }
    };

    let error = body.get("error")?;
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())?;

    Some(MultisendError::Rpc {
        code: error.get("code").and_then(|c| c.as_i64()),
        message: message.to_string(),
    })
}

/// Interpret the `result` string of a send call
fn normalize_reply(reply: &str) -> MultisendResult<H256> {
    if is_zero_hash(reply) {
        return Err(MultisendError::TransactionNotYetAvailable {
            reply: reply.to_string(),
        });
    }

    let digits = reply.strip_prefix("0x").unwrap_or(reply);
    let bytes = hex::decode(digits)
        .map_err(|e| MultisendError::MalformedResponse(format!("{}: {}", reply, e)))?;
    if bytes.len() != H256::len_bytes() {
        return Err(MultisendError::MalformedResponse(format!(
            "expected a 32-byte transaction hash, got {} bytes",
            bytes.len()
        )));
    }

    Ok(H256::from_slice(&bytes))
}
