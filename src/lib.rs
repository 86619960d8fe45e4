//! Fixed-arity multisend call encoding and JSON-RPC submission
//!
//! [`abi`] turns recipient and amount lists into `multiSendEther` /
//! `multiSendToken` call data; [`tx`] wraps that data into an
//! `eth_sendTransaction` request and submits it over any
//! [`ethers::providers::JsonRpcClient`].

pub mod abi;
pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod tx;

pub use error::{MultisendError, MultisendResult};
