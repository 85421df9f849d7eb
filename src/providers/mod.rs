//! Production implementations of the bridge trait abstractions.
//!
//! This module provides the "real" implementations of the traits defined in
//! [`crate::traits`]: an HTTP client for the bridge service and a signer
//! backed by an Alloy provider.
//!
//! Applications use these providers; tests use the fakes in
//! [`crate::testing`].

mod alloy;
mod http;

pub use self::alloy::AlloySigner;
pub use self::http::HttpBridgeClient;
