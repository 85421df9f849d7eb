//! Call data for the contract the bridge invokes on the destination chain
//!
//! Two encodings are produced from the same parameter list:
//!
//! - a single blob (selector plus ABI-encoded arguments), used by API v3
//! - a split descriptor plus comma-delimited argument string, where the amount
//!   is left as the [`AMOUNT_PLACEHOLDER`] for the service to fill in, used by
//!   API v4
//!
//! Everything here is pure and performs no I/O.

mod abi;
mod address;
mod builder;

pub use self::abi::{AbiParam, CalldataAbi, StateMutability};
pub use self::address::{pad_address, pad_address_hex};
pub use self::builder::{
    ArgValue, CallDataBuilder, CallParam, EncodedCallData, EncodingMode, SplitCallData,
    AMOUNT_PLACEHOLDER, PARAM_DELIMITER,
};
