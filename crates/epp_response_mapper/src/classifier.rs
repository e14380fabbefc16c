//! Turns a decoded payload into exactly one [`GatewayResponse`] variant.

pub mod json;
pub mod xml;

use common_utils::{errors::CustomResult, ext_traits::StringExt};
use epp_models::{
    GatewayResponse, MalformedReason as Reason, ResponseMapperError, Severity, Status,
};
use error_stack::{report, ResultExt};

use crate::{
    decoder::{DecodedBody, DecodedPayload},
    logger,
};

#[tracing::instrument(skip_all, fields(format = %decoded.format()))]
pub fn classify(decoded: &DecodedPayload) -> CustomResult<GatewayResponse, ResponseMapperError> {
    let response = match decoded.body() {
        DecodedBody::Xml(root) => xml::classify(decoded, root),
        DecodedBody::Json(map) => json::classify(decoded, map),
    }
    .map_err(|error| {
        logger::warn!(error = %error.current_context(), "gateway response could not be classified");
        error
    })?;

    logger::debug!(
        outcome = outcome_name(&response),
        statuses = response.statuses().len(),
        "classified gateway response"
    );
    Ok(response)
}

impl TryFrom<&DecodedPayload> for GatewayResponse {
    type Error = error_stack::Report<ResponseMapperError>;

    fn try_from(decoded: &DecodedPayload) -> Result<Self, Self::Error> {
        classify(decoded)
    }
}

fn outcome_name(response: &GatewayResponse) -> &'static str {
    match response {
        GatewayResponse::Success(_) => "success",
        GatewayResponse::Interaction(_) => "interaction",
        GatewayResponse::Failure(_) => "failure",
    }
}

/// Builds a [`Status`] from its three mandatory fields; empty counts as absent.
pub(crate) fn status_from_fields(
    code: Option<&str>,
    description: Option<&str>,
    severity: Option<&str>,
) -> CustomResult<Status, ResponseMapperError> {
    let code = non_empty(code).ok_or_else(|| malformed(Reason::MissingStatusCode))?;
    let description =
        non_empty(description).ok_or_else(|| malformed(Reason::MissingStatusDescription))?;
    let severity = non_empty(severity).ok_or_else(|| malformed(Reason::MissingStatusSeverity))?;

    let severity: Severity = severity
        .parse_enum("Severity")
        .change_context(ResponseMapperError::MalformedResponse(
            Reason::UnknownStatusSeverity,
        ))
        .attach_printable_lazy(|| format!("Status {code} has severity {severity:?}"))?;

    Ok(Status::new(code, description, severity))
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub(crate) fn malformed(reason: Reason) -> error_stack::Report<ResponseMapperError> {
    report!(ResponseMapperError::MalformedResponse(reason))
}
