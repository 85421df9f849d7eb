// SPDX-FileCopyrightText: 2026 The deposit-bridge Authors
//
// SPDX-License-Identifier: Apache-2.0
//! Function descriptor sent as `calldataABI` in the split encoding

use serde::{Deserialize, Serialize};

/// JSON-ABI style description of the target function.
///
/// Serialises to the exact shape the bridge service parses:
///
/// ```json
/// {"name":"mint","type":"function","inputs":[{"name":"to","type":"address"}],"outputs":[],"stateMutability":"external"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalldataAbi {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(default)]
    pub state_mutability: StateMutability,
}

impl CalldataAbi {
    pub fn function(
        name: impl Into<String>,
        inputs: Vec<AbiParam>,
        state_mutability: StateMutability,
    ) -> Self {
        Self {
            name: name.into(),
            kind: "function".to_string(),
            inputs,
            outputs: Vec::new(),
            state_mutability,
        }
    }

    /// Position of the input called `name`.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|input| input.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// `stateMutability` value of the descriptor.
///
/// The service accepts the Solidity visibility keyword `external` here and
/// that is what it has historically been sent, hence the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
    #[default]
    External,
}
