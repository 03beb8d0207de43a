//! Account identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::Address;
use crate::error::{Result, TxError};

/// Number of hex digits in an account id (20 bytes).
const ACCOUNT_HEX_LEN: usize = 40;

/// Identifies a transaction participant by its hex encoded address.
///
/// Conversions from strings (`From<&str>`, `From<String>`, deserialization)
/// are unchecked, as for ids received over the wire; use [`AccountId::parse`]
/// or [`AccountId::is_account_id`] to check the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Parses an account id, rejecting anything that is not a canonical
    /// `0x` prefixed lowercase 20 byte hex address.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = Self(id.into());
        if !id.is_account_id() {
            return Err(TxError::InvalidAccountFormat { account: id.0 });
        }
        Ok(id)
    }

    /// Returns the canonical account id of an address: lowercase hex with
    /// the `0x` prefix.
    pub fn from_address(address: &Address) -> Self {
        Self(address.to_hex_prefixed())
    }

    /// Reports whether the id is in canonical form: `0x` followed by 40
    /// lowercase hex digits, the form recovered signers are rendered in.
    pub fn is_account_id(&self) -> bool {
        match self.0.strip_prefix("0x") {
            Some(digits) => {
                digits.len() == ACCOUNT_HEX_LEN
                    && digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl FromStr for AccountId {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxErrorKind;

    #[test]
    fn test_valid_account_ids() {
        for id in [
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x0000000000000000000000000000000000000000",
        ] {
            assert!(AccountId::parse(id).is_ok(), "{}", id);
        }
    }

    #[test]
    fn test_invalid_account_ids() {
        for id in [
            "",
            "0x",
            "Sosun",
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf",
            "0X7e5f4552091a69125d5dfcb7b8c2659029395bdf",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bd",
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf00",
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdg",
            "0x0x7e5f4552091a69125d5dfcb7b8c2659029395b",
        ] {
            let err = AccountId::parse(id).unwrap_err();
            assert_eq!(err.kind(), TxErrorKind::InvalidAccountFormat, "{}", id);
        }
    }

    #[test]
    fn test_from_address_is_canonical() {
        let bytes: [u8; 20] = hex::decode("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .unwrap()
            .try_into()
            .unwrap();
        let id = AccountId::from_address(&Address::from_bytes(bytes));

        assert!(id.is_account_id());
        assert_eq!(id.as_str(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
    }

    #[test]
    fn test_unchecked_conversion_keeps_input() {
        let id = AccountId::from("Bibas");
        assert!(!id.is_account_id());
        assert_eq!(id.to_string(), "Bibas");
    }
}
