use serde::{Deserialize, Serialize};

/// Severity attached to a gateway status entry
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// Wire format a gateway payload is expected in.
///
/// XML is produced by the direct API and its notifications, JSON by the
/// hosted payment page.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Xml,
    Json,
}
