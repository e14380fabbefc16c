//! Message authentication used for gateway notifications
use ring::hmac;

use crate::{
    errors::{CryptoError, CustomResult},
    fp_utils::when,
};

/// Produces a tag over a message
pub trait SignMessage {
    /// Tag for `msg` under `secret`
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Checks a tag produced by the matching [`SignMessage`]
pub trait VerifySignature {
    /// `Ok(false)` when `signature` does not authenticate `msg`
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// HMAC-SHA256 as used for notification signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl HmacSha256 {
    fn key(secret: &[u8]) -> CustomResult<hmac::Key, CryptoError> {
        when(secret.is_empty(), || Err(CryptoError::EmptyKey))?;
        Ok(hmac::Key::new(hmac::HMAC_SHA256, secret))
    }
}

impl SignMessage for HmacSha256 {
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        let tag = hmac::sign(&Self::key(secret)?, msg);
        Ok(tag.as_ref().to_vec())
    }
}

impl VerifySignature for HmacSha256 {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        // constant time comparison
        Ok(hmac::verify(&Self::key(secret)?, msg, signature).is_ok())
    }
}
