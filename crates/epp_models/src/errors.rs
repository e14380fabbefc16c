/// Errors raised while turning a gateway payload into a [`crate::GatewayResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResponseMapperError {
    #[error("Failed to decode gateway payload: {0}")]
    DecodeFailed(DecodeReason),
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(MalformedReason),
    #[error("Notification signature does not match the payload")]
    SourceVerificationFailed,
    #[error("Merchant secret key is not configured")]
    MissingMerchantSecret,
}

/// Why a payload could not be decoded into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DecodeReason {
    #[strum(serialize = "payload is not valid utf-8")]
    InvalidUtf8,
    #[strum(serialize = "not a valid xml string")]
    NotValidXml,
    #[strum(serialize = "not a valid json string")]
    InvalidJson,
    #[strum(serialize = "json payload is not an object")]
    NotJsonObject,
    #[strum(serialize = "signature is not valid base64")]
    InvalidSignatureEncoding,
    #[strum(serialize = "3-D Secure merchant data could not be decoded")]
    InvalidThreeDsMerchantData,
}

/// Which required part of a decoded response is absent or contradictory
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MalformedReason {
    #[strum(serialize = "missing transaction state")]
    MissingTransactionState,
    #[strum(serialize = "missing status code")]
    MissingStatusCode,
    #[strum(serialize = "missing status description")]
    MissingStatusDescription,
    #[strum(serialize = "missing status severity")]
    MissingStatusSeverity,
    #[strum(serialize = "unknown status severity")]
    UnknownStatusSeverity,
    #[strum(serialize = "statuses empty")]
    StatusesEmpty,
    #[strum(serialize = "missing transaction id")]
    MissingTransactionId,
    #[strum(serialize = "missing payment methods")]
    MissingPaymentMethods,
    #[strum(serialize = "payment methods empty")]
    PaymentMethodsEmpty,
    #[strum(serialize = "more payment methods")]
    MorePaymentMethods,
    #[strum(serialize = "more different provider transaction ids")]
    DivergentProviderTransactionIds,
    #[strum(serialize = "no provider transaction id")]
    NoProviderTransactionId,
    #[strum(serialize = "expected error, success, or interaction")]
    UnexpectedJsonResponse,
    #[strum(serialize = "missing eppresponse")]
    MissingEppResponse,
}

impl From<DecodeReason> for ResponseMapperError {
    fn from(reason: DecodeReason) -> Self {
        Self::DecodeFailed(reason)
    }
}

impl From<MalformedReason> for ResponseMapperError {
    fn from(reason: MalformedReason) -> Self {
        Self::MalformedResponse(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_operator_messages() {
        assert_eq!(
            ResponseMapperError::from(DecodeReason::NotValidXml).to_string(),
            "Failed to decode gateway payload: not a valid xml string"
        );
        assert_eq!(
            ResponseMapperError::from(MalformedReason::MorePaymentMethods).to_string(),
            "Malformed gateway response: more payment methods"
        );
    }
}
