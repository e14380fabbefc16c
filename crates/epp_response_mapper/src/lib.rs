#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod classifier;
pub mod consts;
pub mod decoder;
pub mod details;
pub mod logger;
pub mod mapper;
pub mod notification;
pub mod settings;
pub mod signature;

pub use classifier::classify;
pub use decoder::{decode, DecodedBody, DecodedPayload, XmlNode};
pub use epp_models::{
    GatewayResponse, ResponseAction, ResponseMapperError, StatusCollection, WireFormat,
};
pub use mapper::ResponseMapper;
pub use settings::Settings;
