use std::collections::HashMap;

use common_utils::errors::CustomResult;
use epp_models::{GatewayResponse, ResponseAction, ResponseMapperError, WireFormat};
use error_stack::report;
use masking::{PeekInterface, Secret};

use crate::{classifier, decoder, logger, notification, settings::Settings, signature};

/// Entry point for everything the gateway sends back.
///
/// Holds no per-call state and can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct ResponseMapper {
    merchant_secret: Option<Secret<String>>,
    default_format: WireFormat,
}

impl ResponseMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merchant_secret(mut self, secret: impl Into<String>) -> Self {
        self.merchant_secret = Some(Secret::new(secret.into()));
        self
    }

    pub fn with_default_format(mut self, format: WireFormat) -> Self {
        self.default_format = format;
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            merchant_secret: settings.merchant.secret_key.clone(),
            default_format: settings.default_format,
        }
    }

    /// Maps a synchronous API response in the configured default format
    pub fn map(&self, raw: &[u8]) -> CustomResult<GatewayResponse, ResponseMapperError> {
        self.map_as(raw, self.default_format)
    }

    #[tracing::instrument(skip(self, raw))]
    pub fn map_as(
        &self,
        raw: &[u8],
        format: WireFormat,
    ) -> CustomResult<GatewayResponse, ResponseMapperError> {
        let decoded = decoder::decode(raw, format)?;
        classifier::classify(&decoded)
    }

    /// Classifies a notification without checking where it came from
    pub fn handle_notification(
        &self,
        raw: &[u8],
    ) -> CustomResult<GatewayResponse, ResponseMapperError> {
        notification::handle_notification(raw)
    }

    pub fn verify_signature(
        &self,
        raw_base64: &str,
        signature_base64: &str,
    ) -> CustomResult<bool, ResponseMapperError> {
        let secret = self
            .merchant_secret
            .as_ref()
            .ok_or(ResponseMapperError::MissingMerchantSecret)?;

        signature::verify(raw_base64, signature_base64, secret.peek().as_bytes())
    }

    /// Classifies a notification only after its signature checks out
    #[tracing::instrument(skip_all)]
    pub fn handle_signed_notification(
        &self,
        raw_base64: &str,
        signature_base64: &str,
    ) -> CustomResult<GatewayResponse, ResponseMapperError> {
        if !self.verify_signature(raw_base64, signature_base64)? {
            logger::warn!("rejected notification with a mismatching signature");
            return Err(report!(ResponseMapperError::SourceVerificationFailed));
        }

        notification::handle_notification(raw_base64.as_bytes())
    }

    /// Handles the form fields of a browser redirect back to the merchant
    pub fn handle_response(
        &self,
        fields: &HashMap<String, String>,
    ) -> CustomResult<ResponseAction, ResponseMapperError> {
        notification::handle_response(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResponseMapper>();
    }

    #[test]
    fn verification_needs_a_secret() {
        let error = ResponseMapper::new()
            .verify_signature("cGF5bG9hZA==", "c2ln")
            .err()
            .map(|report| *report.current_context());
        assert_eq!(error, Some(ResponseMapperError::MissingMerchantSecret));
    }
}
