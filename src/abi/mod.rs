//! ABI encoding for the fixed-arity multisend contract functions

pub mod encoder;
pub mod payload;
pub mod selector;

pub use encoder::{
    encode_addresses, encode_amounts, encode_amounts_from_ether, encode_amounts_from_wei, Amount,
    ARITY,
};
pub use payload::{build_call, build_ether_call, build_token_call, build_wei_call, CallKind, CallPayload};
pub use selector::selector;
