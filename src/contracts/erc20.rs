// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! ERC20 bindings used to fund a deposit address directly

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use tracing::debug;

/// Call data for `transfer(to, amount)`.
pub fn transfer_call_data(to: Address, amount: U256) -> Bytes {
    debug!(
        to = %to,
        amount = %amount,
        event = "erc20_transfer_encoded"
    );

    Erc20::transferCall { to, amount }.abi_encode().into()
}

sol!(
    #[allow(missing_docs)]
    interface Erc20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};

    #[test]
    fn test_transfer_call_data_layout() {
        let to = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");
        let data = transfer_call_data(to, U256::from(1_000_000u64));

        assert_eq!(&data[..4], hex!("a9059cbb"));
        assert_eq!(&data[16..36], to.as_slice());
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(1_000_000u64));
    }
}
