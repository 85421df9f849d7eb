// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Call-data construction for the target contract invocation

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Bytes, Selector, U256};
use tracing::debug;

use super::abi::{AbiParam, CalldataAbi, StateMutability};
use crate::error::{BridgeError, Result};

/// Token the service replaces with the real amount in split call data.
pub const AMOUNT_PLACEHOLDER: &str = "AARC";

/// Separator between argument values in split call data.
pub const PARAM_DELIMITER: char = ',';

/// Value of one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A fixed value, coerced into the declared Solidity type.
    Literal(String),
    /// The transfer amount. Filled in by the caller (blob) or by the bridge
    /// service (split).
    Amount,
}

/// One declared parameter of the target function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParam {
    pub name: String,
    pub ty: String,
    pub value: ArgValue,
}

/// How the call is handed to the bridge service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Selector plus ABI-encoded arguments, amount included.
    Blob { amount: U256 },
    /// Descriptor plus a delimited argument string with the amount deferred.
    Split,
}

/// Output of [`CallDataBuilder::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedCallData {
    Blob(Bytes),
    Split(SplitCallData),
}

impl EncodedCallData {
    pub fn as_blob(&self) -> Option<&Bytes> {
        match self {
            Self::Blob(bytes) => Some(bytes),
            Self::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitCallData> {
        match self {
            Self::Split(split) => Some(split),
            Self::Blob(_) => None,
        }
    }
}

/// Descriptor and argument string of the split encoding.
///
/// Always validated on construction: the placeholder sits exactly at the
/// position the amount parameter has in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCallData {
    abi: CalldataAbi,
    params: String,
    amount_index: usize,
}

impl SplitCallData {
    /// Assembles split call data from a descriptor and a hand-written argument
    /// string, locating the amount slot by parameter name.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ContractViolation`] when `amount_param` is not an
    /// input of `abi`, or when the placeholder is missing, duplicated or
    /// misplaced in `params`.
    pub fn from_parts(
        abi: CalldataAbi,
        params: impl Into<String>,
        amount_param: &str,
    ) -> Result<Self> {
        let amount_index = abi.input_index(amount_param).ok_or_else(|| {
            BridgeError::contract_violation(format!(
                "amount parameter `{amount_param}` is not declared by `{}`",
                abi.name
            ))
        })?;

        let split = Self {
            abi,
            params: params.into(),
            amount_index,
        };
        split.validate()?;
        Ok(split)
    }

    pub fn abi(&self) -> &CalldataAbi {
        &self.abi
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn amount_index(&self) -> usize {
        self.amount_index
    }

    /// The descriptor as the JSON string sent in `calldataABI`.
    pub fn abi_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.abi)?)
    }

    /// Ordinal of the placeholder in the argument string, if present once.
    pub fn placeholder_index(&self) -> Option<usize> {
        let mut found = self
            .params
            .split(PARAM_DELIMITER)
            .enumerate()
            .filter(|(_, value)| *value == AMOUNT_PLACEHOLDER)
            .map(|(index, _)| index);

        match (found.next(), found.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    /// Checks the placeholder/descriptor contract.
    pub fn validate(&self) -> Result<()> {
        let values = self.params.split(PARAM_DELIMITER).count();
        if values != self.abi.inputs.len() {
            return Err(BridgeError::contract_violation(format!(
                "`{}` declares {} inputs but {values} argument values were given",
                self.abi.name,
                self.abi.inputs.len()
            )));
        }

        let amount_input = self.abi.inputs.get(self.amount_index).ok_or_else(|| {
            BridgeError::contract_violation(format!(
                "amount index {} is outside the inputs of `{}`",
                self.amount_index, self.abi.name
            ))
        })?;
        let amount_ty = DynSolType::parse(&amount_input.ty).map_err(|e| {
            BridgeError::contract_violation(format!(
                "amount parameter `{}` has an invalid type `{}`: {e}",
                amount_input.name, amount_input.ty
            ))
        })?;
        if !matches!(amount_ty, DynSolType::Uint(_)) {
            return Err(BridgeError::contract_violation(format!(
                "amount parameter `{}` must be an unsigned integer, found `{}`",
                amount_input.name, amount_input.ty
            )));
        }

        match self.placeholder_index() {
            Some(index) if index == self.amount_index => Ok(()),
            Some(index) => Err(BridgeError::contract_violation(format!(
                "placeholder at position {index} but `{}` is declared at position {}",
                amount_input.name, self.amount_index
            ))),
            None => Err(BridgeError::contract_violation(format!(
                "argument string must contain `{AMOUNT_PLACEHOLDER}` exactly once"
            ))),
        }
    }
}

/// Builds call data for a target function from ordered, typed parameters.
///
/// Encoding is pure and deterministic. Exactly one parameter must be the
/// amount slot.
///
/// # Example
///
/// ```rust
/// use deposit_bridge::calldata::{CallDataBuilder, EncodedCallData, EncodingMode};
/// use alloy_primitives::U256;
///
/// let builder = CallDataBuilder::new("mint")
///     .param("to", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8")
///     .amount_param("amount", "uint256");
///
/// let blob = builder
///     .encode(EncodingMode::Blob { amount: U256::from(1_000_000u64) })
///     .unwrap();
/// assert!(matches!(blob, EncodedCallData::Blob(_)));
///
/// let split = builder.encode(EncodingMode::Split).unwrap();
/// assert_eq!(
///     split.as_split().unwrap().params(),
///     "0x45c0470ef627a30efe30c06b13d883669b8fd3a8,AARC"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDataBuilder {
    function: String,
    params: Vec<CallParam>,
    state_mutability: StateMutability,
}

impl CallDataBuilder {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            params: Vec::new(),
            state_mutability: StateMutability::default(),
        }
    }

    /// Appends a fixed-value parameter.
    pub fn param(
        mut self,
        name: impl Into<String>,
        ty: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.params.push(CallParam {
            name: name.into(),
            ty: ty.into(),
            value: ArgValue::Literal(value.into()),
        });
        self
    }

    /// Appends the amount parameter.
    pub fn amount_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(CallParam {
            name: name.into(),
            ty: ty.into(),
            value: ArgValue::Amount,
        });
        self
    }

    pub fn state_mutability(mut self, state_mutability: StateMutability) -> Self {
        self.state_mutability = state_mutability;
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn params(&self) -> &[CallParam] {
        &self.params
    }

    /// Canonical signature, e.g. `mint(address,uint256)`.
    pub fn signature(&self) -> Result<String> {
        let types = self.resolved_types()?;
        let types: Vec<_> = types.iter().map(|ty| ty.sol_type_name()).collect();
        Ok(format!("{}({})", self.function, types.join(",")))
    }

    /// First four bytes of the keccak256 of [`Self::signature`].
    pub fn selector(&self) -> Result<Selector> {
        let hash = keccak256(self.signature()?.as_bytes());
        Ok(Selector::from_slice(&hash[..4]))
    }

    /// Encodes the call in the requested mode.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ContractViolation`] when the parameter list does
    /// not have exactly one unsigned amount slot, a literal does not fit its
    /// declared type, or the amount overflows its declared width.
    pub fn encode(&self, mode: EncodingMode) -> Result<EncodedCallData> {
        match mode {
            EncodingMode::Blob { amount } => self.encode_blob(amount).map(EncodedCallData::Blob),
            EncodingMode::Split => self.encode_split().map(EncodedCallData::Split),
        }
    }

    fn encode_blob(&self, amount: U256) -> Result<Bytes> {
        let types = self.resolved_types()?;
        self.amount_index(&types)?;

        let values = self
            .params
            .iter()
            .zip(&types)
            .map(|(param, ty)| match &param.value {
                ArgValue::Literal(raw) => coerce_literal(param, ty, raw),
                ArgValue::Amount => amount_value(param, ty, amount),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut data = self.selector()?.to_vec();
        data.extend(DynSolValue::Tuple(values).abi_encode_params());

        debug!(
            function = %self.function,
            data_length_bytes = data.len(),
            event = "blob_call_data_encoded"
        );

        Ok(Bytes::from(data))
    }

    fn encode_split(&self) -> Result<SplitCallData> {
        let types = self.resolved_types()?;
        let amount_index = self.amount_index(&types)?;

        let mut values = Vec::with_capacity(self.params.len());
        let mut inputs = Vec::with_capacity(self.params.len());
        for (param, ty) in self.params.iter().zip(&types) {
            match &param.value {
                ArgValue::Literal(raw) => {
                    if raw.contains(PARAM_DELIMITER) || raw == AMOUNT_PLACEHOLDER {
                        return Err(BridgeError::contract_violation(format!(
                            "value of `{}` collides with the split encoding syntax",
                            param.name
                        )));
                    }
                    coerce_literal(param, ty, raw)?;
                    values.push(raw.as_str());
                }
                ArgValue::Amount => values.push(AMOUNT_PLACEHOLDER),
            }
            inputs.push(AbiParam::new(&param.name, ty.sol_type_name()));
        }

        let split = SplitCallData {
            abi: CalldataAbi::function(&self.function, inputs, self.state_mutability),
            params: values.join(&PARAM_DELIMITER.to_string()),
            amount_index,
        };
        split.validate()?;

        debug!(
            function = %self.function,
            amount_index = amount_index,
            event = "split_call_data_encoded"
        );

        Ok(split)
    }

    /// Decodes blob call data produced for this function back into values.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ContractViolation`] on a selector mismatch and
    /// [`BridgeError::Abi`] when the argument bytes do not decode.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<DynSolValue>> {
        let selector = self.selector()?;
        if data.len() < 4 || data[..4] != selector[..] {
            return Err(BridgeError::contract_violation(format!(
                "call data does not start with the selector of {}",
                self.signature()?
            )));
        }

        let decoded = DynSolType::Tuple(self.resolved_types()?).abi_decode_params(&data[4..])?;
        match decoded {
            DynSolValue::Tuple(values) => Ok(values),
            other => Ok(vec![other]),
        }
    }

    fn resolved_types(&self) -> Result<Vec<DynSolType>> {
        self.params
            .iter()
            .map(|param| {
                DynSolType::parse(&param.ty).map_err(|e| {
                    BridgeError::contract_violation(format!(
                        "parameter `{}` has invalid type `{}`: {e}",
                        param.name, param.ty
                    ))
                })
            })
            .collect()
    }

    fn amount_index(&self, types: &[DynSolType]) -> Result<usize> {
        let mut slots = self
            .params
            .iter()
            .enumerate()
            .filter(|(_, param)| param.value == ArgValue::Amount)
            .map(|(index, _)| index);

        let index = match (slots.next(), slots.next()) {
            (Some(index), None) => index,
            (None, _) => {
                return Err(BridgeError::contract_violation(format!(
                    "`{}` has no amount parameter",
                    self.function
                )))
            }
            (Some(_), Some(_)) => {
                return Err(BridgeError::contract_violation(format!(
                    "`{}` declares more than one amount parameter",
                    self.function
                )))
            }
        };

        if !matches!(types[index], DynSolType::Uint(_)) {
            return Err(BridgeError::contract_violation(format!(
                "amount parameter `{}` must be an unsigned integer, found `{}`",
                self.params[index].name, self.params[index].ty
            )));
        }

        Ok(index)
    }
}

fn coerce_literal(param: &CallParam, ty: &DynSolType, raw: &str) -> Result<DynSolValue> {
    ty.coerce_str(raw).map_err(|e| {
        BridgeError::contract_violation(format!(
            "value `{raw}` of `{}` is not a valid {}: {e}",
            param.name,
            ty.sol_type_name()
        ))
    })
}

fn amount_value(param: &CallParam, ty: &DynSolType, amount: U256) -> Result<DynSolValue> {
    let DynSolType::Uint(bits) = *ty else {
        return Err(BridgeError::contract_violation(format!(
            "amount parameter `{}` must be an unsigned integer, found `{}`",
            param.name, param.ty
        )));
    };
    if amount.bit_len() > bits {
        return Err(BridgeError::contract_violation(format!(
            "amount {amount} does not fit `{}` ({})",
            param.name, param.ty
        )));
    }
    Ok(DynSolValue::Uint(amount, bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex, Address, B256};
    use rstest::rstest;

    fn deposit_erc20() -> CallDataBuilder {
        CallDataBuilder::new("depositERC20")
            .param("_token", "address", "0xaf88d065e77c8cC2239327C5EDb3A432268e5831")
            .amount_param("_amount", "uint104")
            .param(
                "_zkLinkAddress",
                "bytes32",
                "0x00000000000000000000000045c0470ef627a30efe30c06b13d883669b8fd3a8",
            )
            .param("_subAccountId", "uint8", "0")
            .param("_mapping", "bool", "false")
    }

    #[test]
    fn test_signature_is_canonical() {
        let builder = CallDataBuilder::new("mintTo")
            .param("recipient", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8")
            .amount_param("quantity", "uint");

        assert_eq!(builder.signature().unwrap(), "mintTo(address,uint256)");
    }

    #[test]
    fn test_transfer_selector() {
        let builder = CallDataBuilder::new("transfer")
            .param("to", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8")
            .amount_param("amount", "uint256");

        assert_eq!(builder.selector().unwrap(), Selector::from(hex!("a9059cbb")));
    }

    #[test]
    fn test_blob_round_trip() {
        let builder = deposit_erc20();
        let amount = U256::from(1_000_000u64);

        let encoded = builder.encode(EncodingMode::Blob { amount }).unwrap();
        let data = encoded.as_blob().unwrap();
        assert_eq!(data.len(), 4 + 5 * 32);

        let values = builder.decode(data).unwrap();
        assert_eq!(
            values,
            vec![
                DynSolValue::Address(address!("af88d065e77c8cC2239327C5EDb3A432268e5831")),
                DynSolValue::Uint(amount, 104),
                DynSolValue::FixedBytes(
                    B256::from(hex!(
                        "00000000000000000000000045c0470ef627a30efe30c06b13d883669b8fd3a8"
                    )),
                    32
                ),
                DynSolValue::Uint(U256::ZERO, 8),
                DynSolValue::Bool(false),
            ]
        );
    }

    #[test]
    fn test_blob_encoding_is_deterministic() {
        let mode = EncodingMode::Blob {
            amount: U256::from(42u64),
        };
        assert_eq!(
            deposit_erc20().encode(mode).unwrap(),
            deposit_erc20().encode(mode).unwrap()
        );
    }

    #[test]
    fn test_decode_rejects_foreign_selector() {
        let err = deposit_erc20().decode(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, BridgeError::ContractViolation { .. }));
    }

    #[test]
    fn test_amount_must_fit_declared_width() {
        let builder = CallDataBuilder::new("f").amount_param("amount", "uint8");

        assert!(builder
            .encode(EncodingMode::Blob {
                amount: U256::from(255u64)
            })
            .is_ok());
        assert!(matches!(
            builder.encode(EncodingMode::Blob {
                amount: U256::from(256u64)
            }),
            Err(BridgeError::ContractViolation { .. })
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn test_placeholder_follows_amount_position(#[case] amount_position: usize) {
        let mut builder = CallDataBuilder::new("f");
        for index in 0..4 {
            builder = if index == amount_position {
                builder.amount_param("amount", "uint256")
            } else {
                builder.param(format!("p{index}"), "uint8", index.to_string())
            };
        }

        let split = builder.encode(EncodingMode::Split).unwrap();
        let split = split.as_split().unwrap();

        assert_eq!(split.placeholder_index(), Some(amount_position));
        assert_eq!(split.abi().input_index("amount"), Some(amount_position));
        assert_eq!(split.amount_index(), amount_position);
    }

    #[test]
    fn test_split_descriptor_uses_canonical_types() {
        let split = CallDataBuilder::new("mintTo")
            .param("recipient", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8")
            .amount_param("quantity", "uint")
            .state_mutability(StateMutability::Payable)
            .encode(EncodingMode::Split)
            .unwrap();
        let split = split.as_split().unwrap();

        insta::assert_snapshot!(split.abi_json().unwrap(), @r#"{"name":"mintTo","type":"function","inputs":[{"name":"recipient","type":"address"},{"name":"quantity","type":"uint256"}],"outputs":[],"stateMutability":"payable"}"#);
    }

    #[rstest]
    #[case::no_amount(CallDataBuilder::new("f").param("a", "address", "0x45c0470ef627a30efe30c06b13d883669b8fd3a8"))]
    #[case::two_amounts(CallDataBuilder::new("f").amount_param("a", "uint256").amount_param("b", "uint256"))]
    #[case::signed_amount(CallDataBuilder::new("f").amount_param("a", "int256"))]
    #[case::bad_literal(CallDataBuilder::new("f").param("a", "address", "not-an-address").amount_param("b", "uint256"))]
    #[case::delimiter(CallDataBuilder::new("f").param("a", "string", "x,y").amount_param("b", "uint256"))]
    #[case::placeholder_literal(CallDataBuilder::new("f").param("a", "string", "AARC").amount_param("b", "uint256"))]
    #[case::bad_type(CallDataBuilder::new("f").param("a", "notatype", "1").amount_param("b", "uint256"))]
    fn test_split_contract_violations(#[case] builder: CallDataBuilder) {
        assert!(matches!(
            builder.encode(EncodingMode::Split),
            Err(BridgeError::ContractViolation { .. })
        ));
    }

    fn mint_abi() -> CalldataAbi {
        mint_abi_with_amount("uint256")
    }

    fn mint_abi_with_amount(amount_ty: &str) -> CalldataAbi {
        CalldataAbi::function(
            "mint",
            vec![
                AbiParam::new("token", "address"),
                AbiParam::new("to", "address"),
                AbiParam::new("amount", amount_ty),
            ],
            StateMutability::External,
        )
    }

    #[test]
    fn test_from_parts_accepts_matching_position() {
        let split = SplitCallData::from_parts(
            mint_abi(),
            "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913,0x45c0470ef627a30efe30c06b13d883669b8fd3a8,AARC",
            "amount",
        )
        .unwrap();

        assert_eq!(split.amount_index(), 2);
    }

    #[rstest]
    #[case::misplaced("uint256", "AARC,0x45c0470ef627a30efe30c06b13d883669b8fd3a8,0x01")]
    #[case::missing("uint256", "0x01,0x02,1000")]
    #[case::duplicated("uint256", "AARC,0x02,AARC")]
    #[case::too_short("uint256", "0x01,AARC")]
    #[case::amount_array("uint256[]", "0x01,0x02,AARC")]
    #[case::amount_not_a_type("uintfoo", "0x01,0x02,AARC")]
    #[case::amount_signed("int256", "0x01,0x02,AARC")]
    fn test_from_parts_rejects_bad_params(#[case] amount_ty: &str, #[case] params: &str) {
        assert!(matches!(
            SplitCallData::from_parts(mint_abi_with_amount(amount_ty), params, "amount"),
            Err(BridgeError::ContractViolation { .. })
        ));
    }

    #[rstest]
    #[case("uint8")]
    #[case("uint104")]
    #[case("uint256")]
    fn test_from_parts_accepts_any_uint_width(#[case] amount_ty: &str) {
        let split =
            SplitCallData::from_parts(mint_abi_with_amount(amount_ty), "0x01,0x02,AARC", "amount")
                .unwrap();
        assert_eq!(split.amount_index(), 2);
    }

    #[test]
    fn test_from_parts_rejects_unknown_amount_param() {
        assert!(SplitCallData::from_parts(mint_abi(), "a,b,AARC", "quantity").is_err());
    }

    #[test]
    fn test_padded_address_literal_round_trips() {
        let user = address!("45c0470ef627a30efe30c06b13d883669b8fd3a8");
        let padded = crate::calldata::pad_address_hex(&user.to_string()).unwrap();
        let builder = CallDataBuilder::new("f")
            .param("who", "bytes32", padded)
            .amount_param("amount", "uint256");

        let data = builder
            .encode(EncodingMode::Blob { amount: U256::from(1u64) })
            .unwrap();
        let values = builder.decode(data.as_blob().unwrap()).unwrap();

        assert_eq!(
            values[0],
            DynSolValue::FixedBytes(crate::calldata::pad_address(user), 32)
        );
        assert_eq!(Address::from_word(crate::calldata::pad_address(user)), user);
    }
}
