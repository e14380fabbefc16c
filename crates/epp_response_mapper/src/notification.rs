//! Server-to-server notifications and browser redirect callbacks.

use std::collections::HashMap;

use base64::Engine;
use common_utils::{consts::BASE64_ENGINE, errors::CustomResult, ext_traits::ByteSliceExt};
use epp_models::{
    DecodeReason, GatewayResponse, MalformedReason, ResponseAction, ResponseMapperError,
    ThreeDsContinuation, WireFormat,
};
use error_stack::{report, ResultExt};
use serde::Deserialize;

use crate::{classifier, consts, decoder, logger};

/// Merchant data the gateway round-trips through the issuer's ACS
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ThreeDsMerchantData {
    enrollment_check_transaction_id: String,
    operation_type: Option<String>,
}

/// Classifies an XML notification body, base64 encoded or not
#[tracing::instrument(skip_all)]
pub fn handle_notification(raw: &[u8]) -> CustomResult<GatewayResponse, ResponseMapperError> {
    let decoded = decoder::decode(raw, WireFormat::Xml)?;
    classifier::classify(&decoded)
}

/// Interprets the form fields posted to the merchant's return url.
///
/// A 3-D Secure return (`MD` and `PaRes`) takes precedence over `eppresponse`.
#[tracing::instrument(skip_all)]
pub fn handle_response(
    fields: &HashMap<String, String>,
) -> CustomResult<ResponseAction, ResponseMapperError> {
    if let (Some(merchant_data), Some(pa_res)) = (
        fields.get(consts::MERCHANT_DATA_FIELD),
        fields.get(consts::PA_RES_FIELD),
    ) {
        logger::debug!("redirect callback carries a 3-D Secure authentication result");
        let merchant_data = decode_merchant_data(merchant_data)?;

        return Ok(ResponseAction::ThreeDsContinuation(ThreeDsContinuation {
            parent_transaction_id: merchant_data.enrollment_check_transaction_id,
            operation: merchant_data.operation_type,
            pa_res: pa_res.clone(),
        }));
    }

    let epp_response = fields
        .get(consts::EPP_RESPONSE_FIELD)
        .ok_or_else(|| report!(ResponseMapperError::from(MalformedReason::MissingEppResponse)))
        .attach_printable_lazy(|| {
            format!("Redirect callback has {} unrecognized fields", fields.len())
        })?;

    handle_notification(epp_response.as_bytes()).map(ResponseAction::Completed)
}

fn decode_merchant_data(
    merchant_data: &str,
) -> CustomResult<ThreeDsMerchantData, ResponseMapperError> {
    let invalid = || ResponseMapperError::from(DecodeReason::InvalidThreeDsMerchantData);

    let bytes = BASE64_ENGINE
        .decode(merchant_data.trim())
        .change_context_lazy(invalid)?;

    bytes
        .as_slice()
        .parse_struct("ThreeDsMerchantData")
        .change_context_lazy(invalid)
}
