//! Parsing shortcuts on raw bytes and strings that report through [`ParsingError`]

use error_stack::ResultExt;
use serde::de::DeserializeOwned;

use crate::errors::{CustomResult, ParsingError};

/// JSON deserialization of byte buffers
pub trait ByteSliceExt {
    /// Deserializes `T`; `type_name` ends up in the error report
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!("{} bytes could not be read as {type_name}", self.len())
            })
    }
}

/// Enum lookup by variant name
pub trait StringExt {
    /// Parses `T` through its `FromStr`; `enum_name` ends up in the error report
    fn parse_enum<T>(&self, enum_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static;
}

impl StringExt for str {
    fn parse_enum<T>(&self, enum_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.parse::<T>()
            .change_context(ParsingError::EnumParseFailure(enum_name))
            .attach_printable_lazy(|| format!("{self:?} is not a {enum_name}"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "kebab-case")]
    struct MerchantData {
        enrollment_check_transaction_id: String,
    }

    #[test]
    fn struct_is_parsed_from_json_bytes() {
        let parsed = br#"{"enrollment-check-transaction-id":"e-1"}"#
            .as_slice()
            .parse_struct::<MerchantData>("MerchantData")
            .unwrap();
        assert_eq!(parsed.enrollment_check_transaction_id, "e-1");

        let error = b"{".as_slice().parse_struct::<MerchantData>("MerchantData").unwrap_err();
        assert!(matches!(
            error.current_context(),
            ParsingError::StructParseFailure("MerchantData")
        ));
    }

    #[test]
    fn enum_is_parsed_by_name() {
        let parsed = "127.0.0.1".parse_enum::<std::net::IpAddr>("IpAddr").unwrap();
        assert!(parsed.is_loopback());

        let error = "localhost".parse_enum::<std::net::IpAddr>("IpAddr").unwrap_err();
        assert!(matches!(
            error.current_context(),
            ParsingError::EnumParseFailure("IpAddr")
        ));
    }
}
