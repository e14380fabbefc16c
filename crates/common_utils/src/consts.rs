//! Commonly used constants

/// Base64 engine used for gateway payloads and notification signatures
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "EPP";
