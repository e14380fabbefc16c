#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod entities;
pub mod enums;
pub mod errors;
pub mod flatten;
pub mod response;
pub mod status;

pub use enums::{Severity, WireFormat};
pub use errors::{DecodeReason, MalformedReason, ResponseMapperError};
pub use response::{
    FailureResponse, GatewayResponse, InteractionResponse, ResponseAction, ResponseDetails,
    SuccessResponse, ThreeDsContinuation,
};
pub use status::{Status, StatusCollection};
