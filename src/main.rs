//! Multisend Relayer - batch ether and token transfers in one contract call
//!
//! Encodes up to 100 recipients into a `multiSendEther` or `multiSendToken`
//! call and submits it with `eth_sendTransaction`, leaving signing to the node.

use anyhow::{Context, Result};
use ethers::providers::Http;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use multisend_relayer::abi::{self, CallPayload};
use multisend_relayer::config::Settings;
use multisend_relayer::metrics;
use multisend_relayer::tx::{SendTransactionRequest, TransactionSubmitter};
use multisend_relayer::MultisendError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting Multisend Relayer v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let settings = Settings::load()?;
    info!(
        "Loaded batch of {} recipients for network {}",
        settings.batch.recipients.len(),
        settings.network.name
    );

    let payload = build_payload(&settings)?;
    info!(
        "Built {} call: {} bytes, total {}",
        payload.kind().as_str(),
        payload.data().len(),
        payload.total()
    );

    let request = SendTransactionRequest::from_payload(
        &payload,
        settings.from_address()?,
        settings.contract_address()?,
        settings.sender.gas,
        settings.sender.gas_price,
        settings.sender.quantity_format,
    );

    let client = Http::from_str(&settings.rpc.url)
        .with_context(|| format!("Invalid RPC url: {}", settings.rpc.url))?;
    let submitter = TransactionSubmitter::new(client);

    let result = submitter.submit(&request).await;

    if let Ok(text) = metrics::render() {
        debug!("Metrics:\n{}", text);
    }

    match result {
        Ok(hash) => {
            info!("Multisend submitted: {:?}", hash);
            println!("{:?}", hash);
            Ok(())
        }
        Err(e @ MultisendError::TransactionNotYetAvailable { .. }) => {
            warn!("Node could not create the transaction; is {} unlocked?", request.from);
            Err(e.into())
        }
        Err(e) => {
            error!("Multisend failed: {}", e);
            Err(e.into())
        }
    }
}

/// Encode the configured batch as an ether or token multisend call
fn build_payload(settings: &Settings) -> Result<CallPayload> {
    let (addresses, amounts) = settings.batch_columns()?;
    let payload = match &settings.batch.token {
        Some(token) => abi::build_token_call(token, &addresses, &amounts)?,
        None => abi::build_call(&addresses, &amounts)?,
    };
    Ok(payload)
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,multisend_relayer=debug,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
