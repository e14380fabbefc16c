//! Authenticity check for notifications pushed by the gateway.
//!
//! The signature is an HMAC-SHA256 over the payload exactly as delivered,
//! i.e. still base64 encoded, keyed with the merchant secret.

use base64::Engine;
use common_utils::{
    consts::BASE64_ENGINE,
    crypto::{self, SignMessage, VerifySignature},
    errors::CustomResult,
};
use epp_models::{DecodeReason, ResponseMapperError};
use error_stack::ResultExt;

/// Checks `signature_base64` against the payload.
///
/// A mismatch is `Ok(false)`. A signature that is not base64 or an empty
/// secret is an error.
pub fn verify(
    raw_base64: &str,
    signature_base64: &str,
    secret: &[u8],
) -> CustomResult<bool, ResponseMapperError> {
    let signature = BASE64_ENGINE
        .decode(signature_base64.trim())
        .change_context(ResponseMapperError::DecodeFailed(
            DecodeReason::InvalidSignatureEncoding,
        ))?;

    crypto::HmacSha256
        .verify_signature(secret, &signature, raw_base64.as_bytes())
        .change_context(ResponseMapperError::MissingMerchantSecret)
}

/// Base64 signature the gateway would send along with `raw_base64`
pub fn sign(raw_base64: &str, secret: &[u8]) -> CustomResult<String, ResponseMapperError> {
    crypto::HmacSha256
        .sign_message(secret, raw_base64.as_bytes())
        .map(|signature| BASE64_ENGINE.encode(signature))
        .change_context(ResponseMapperError::MissingMerchantSecret)
}
