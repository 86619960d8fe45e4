//! Transaction request construction and submission

mod request;
mod sender;

pub use request::{QuantityFormat, SendTransactionRequest};
pub use sender::{is_zero_hash, TransactionSubmitter};
