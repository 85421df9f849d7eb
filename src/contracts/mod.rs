//! Contract bindings
//!
//! Alloy `sol!` bindings for the token used to fund a deposit address and for
//! the destination contracts the bridge can call after delivery.
//!
//! ## Public API
//!
//! - [`transfer_call_data`](erc20::transfer_call_data) for funding a deposit address with an ERC20
//! - Call-data templates: [`nft_mint_to`](targets::nft_mint_to),
//!   [`stablecoin_mint`](targets::stablecoin_mint), [`token_mint`](targets::token_mint),
//!   [`apex_omni_deposit`](targets::apex_omni_deposit)

pub mod erc20;
pub mod targets;
