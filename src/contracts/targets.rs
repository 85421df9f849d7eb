// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Destination contracts with ready-made call-data templates
//!
//! Each template returns a [`CallDataBuilder`] with every argument fixed except
//! the amount, so the same template serves both the blob and split encodings.

use alloy_primitives::{address, hex, Address};
use alloy_sol_types::sol;

use crate::calldata::{pad_address, CallDataBuilder, StateMutability};

/// Apex Omni deposit contract on Arbitrum One.
pub const APEX_OMNI_ARBITRUM: Address = address!("3169844a120C0f517B4eB4A750c08d8518C8466a");

/// Demo NFT contract with a payable `mintTo` on Arbitrum One.
pub const SIMPLE_NFT_ARBITRUM: Address = address!("b5d19615088272Db49d12F317BF9481b2C236854");

/// USDT on Arbitrum One.
pub const USDT_ARBITRUM: Address = address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9");

/// Native USDC on Arbitrum One.
pub const USDC_ARBITRUM: Address = address!("af88d065e77c8cC2239327C5EDb3A432268e5831");

/// Native USDC on Base.
pub const USDC_BASE: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// `mintTo(recipient, quantity)`, with the bridged amount as the quantity.
pub fn nft_mint_to(recipient: Address) -> CallDataBuilder {
    CallDataBuilder::new("mintTo")
        .param("recipient", "address", recipient.to_string())
        .amount_param("quantity", "uint256")
        .state_mutability(StateMutability::Payable)
}

/// `mint(_destination, _amount)` on a mintable stablecoin.
pub fn stablecoin_mint(destination: Address) -> CallDataBuilder {
    CallDataBuilder::new("mint")
        .param("_destination", "address", destination.to_string())
        .amount_param("_amount", "uint256")
}

/// `mint(token, to, amount)` on a generic minter.
pub fn token_mint(token: Address, to: Address) -> CallDataBuilder {
    CallDataBuilder::new("mint")
        .param("token", "address", token.to_string())
        .param("to", "address", to.to_string())
        .amount_param("amount", "uint256")
}

/// `depositERC20` on Apex Omni, crediting `owner`'s zkLink account.
///
/// The zkLink account id is the owner's address left-padded to 32 bytes.
pub fn apex_omni_deposit(
    token: Address,
    owner: Address,
    sub_account_id: u8,
    mapping: bool,
) -> CallDataBuilder {
    CallDataBuilder::new("depositERC20")
        .param("_token", "address", token.to_string())
        .amount_param("_amount", "uint104")
        .param(
            "_zkLinkAddress",
            "bytes32",
            hex::encode_prefixed(pad_address(owner)),
        )
        .param("_subAccountId", "uint8", sub_account_id.to_string())
        .param("_mapping", "bool", mapping.to_string())
}

sol!(
    #[allow(missing_docs)]
    interface SimpleNft {
        function mintTo(address recipient, uint256 quantity) external payable;
    }
);

sol!(
    #[allow(missing_docs)]
    interface MintableStablecoin {
        function mint(address _destination, uint256 _amount) external;
    }
);

sol!(
    #[allow(missing_docs)]
    interface TokenMinter {
        function mint(address token, address to, uint256 amount) external;
    }
);

sol!(
    #[allow(missing_docs)]
    interface ApexOmni {
        function depositERC20(
            address _token,
            uint104 _amount,
            bytes32 _zkLinkAddress,
            uint8 _subAccountId,
            bool _mapping
        ) external;
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calldata::{EncodingMode, AMOUNT_PLACEHOLDER};
    use alloy_primitives::{Uint, U256};
    use alloy_sol_types::SolCall;

    const USER: Address = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");

    fn blob(builder: &CallDataBuilder, amount: u64) -> Vec<u8> {
        builder
            .encode(EncodingMode::Blob {
                amount: U256::from(amount),
            })
            .unwrap()
            .as_blob()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_nft_template_matches_binding() {
        let expected = SimpleNft::mintToCall {
            recipient: USER,
            quantity: U256::from(1u64),
        }
        .abi_encode();

        assert_eq!(blob(&nft_mint_to(USER), 1), expected);
    }

    #[test]
    fn test_stablecoin_template_matches_binding() {
        let expected = MintableStablecoin::mintCall {
            _destination: USER,
            _amount: U256::from(1_000_000u64),
        }
        .abi_encode();

        assert_eq!(blob(&stablecoin_mint(USER), 1_000_000), expected);
    }

    #[test]
    fn test_token_template_matches_binding() {
        let expected = TokenMinter::mintCall {
            token: USDC_BASE,
            to: USER,
            amount: U256::from(1_000_000u64),
        }
        .abi_encode();

        assert_eq!(blob(&token_mint(USDC_BASE, USER), 1_000_000), expected);
    }

    #[test]
    fn test_apex_template_matches_binding() {
        let expected = ApexOmni::depositERC20Call {
            _token: USDC_ARBITRUM,
            _amount: Uint::<104, 2>::from(1_000_000u64),
            _zkLinkAddress: pad_address(USER),
            _subAccountId: 0,
            _mapping: false,
        }
        .abi_encode();

        assert_eq!(
            blob(&apex_omni_deposit(USDC_ARBITRUM, USER, 0, false), 1_000_000),
            expected
        );
    }

    #[test]
    fn test_apex_split_places_amount_second() {
        let split = apex_omni_deposit(USDC_ARBITRUM, USER, 0, false)
            .encode(EncodingMode::Split)
            .unwrap();
        let split = split.as_split().unwrap();

        assert_eq!(split.placeholder_index(), Some(1));
        assert_eq!(
            split.params().split(',').nth(1),
            Some(AMOUNT_PLACEHOLDER)
        );
        assert_eq!(split.abi().inputs[1].ty, "uint104");
    }
}
