//! Decision procedure for the hosted payment page JSON.

use std::collections::BTreeSet;

use common_utils::errors::CustomResult;
use epp_models::{
    FailureResponse, GatewayResponse, InteractionResponse, MalformedReason as Reason,
    ResponseMapperError, StatusCollection, SuccessResponse, WireFormat,
};
use error_stack::ResultExt;
use serde_json::{Map, Value};

use super::{malformed, non_empty, status_from_fields};
use crate::{consts, decoder::DecodedPayload, details, logger};

pub fn classify(
    decoded: &DecodedPayload,
    map: &Map<String, Value>,
) -> CustomResult<GatewayResponse, ResponseMapperError> {
    let payment = map.get(consts::PAYMENT).unwrap_or(&Value::Null);
    let state = text(payment, consts::TRANSACTION_STATE);
    let statuses = statuses(payment, map.get(consts::ERRORS));
    let details = details::extract(&decoded.to_value(), payment);
    let raw_payload = decoded.raw().to_owned();

    if map.contains_key(consts::ERRORS) || state == Some(consts::STATE_FAILED) {
        return Ok(GatewayResponse::Failure(FailureResponse {
            raw_payload,
            format: WireFormat::Json,
            statuses,
            details,
        }));
    }

    if let Some(redirect_url) = map.get(consts::PAYMENT_REDIRECT_URL) {
        let redirect_url = redirect_url
            .as_str()
            .ok_or_else(|| malformed(Reason::UnexpectedJsonResponse))
            .attach_printable("Payment redirect url is not a string")?;

        return Ok(GatewayResponse::Interaction(InteractionResponse {
            raw_payload,
            format: WireFormat::Json,
            statuses,
            transaction_id: non_empty(text(payment, consts::TRANSACTION_ID)).map(str::to_owned),
            redirect_url: redirect_url.to_owned(),
            details,
        }));
    }

    if state == Some(consts::STATE_SUCCESS) {
        let transaction_id = non_empty(text(payment, consts::TRANSACTION_ID))
            .ok_or_else(|| malformed(Reason::MissingTransactionId))?
            .to_owned();

        return Ok(GatewayResponse::Success(SuccessResponse {
            raw_payload,
            format: WireFormat::Json,
            statuses,
            transaction_id,
            provider_transaction_ids: provider_transaction_ids(payment),
            details,
        }));
    }

    Err(malformed(Reason::UnexpectedJsonResponse))
        .attach_printable_lazy(|| format!("Transaction state is {state:?}"))
}

fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Entries of `payment.statuses.status`, which the gateway renders as an
/// object for one status and an array for several
fn status_entries(payment: &Value) -> &[Value] {
    match payment
        .get(consts::STATUSES)
        .and_then(|statuses| statuses.get(consts::STATUS))
    {
        Some(Value::Array(entries)) => entries,
        Some(entry) => std::slice::from_ref(entry),
        None => &[],
    }
}

/// Statuses from `payment.statuses.status` followed by `errors`.
///
/// Entries missing a field or carrying an unknown severity are skipped; the
/// hosted payment page does not guarantee complete entries.
fn statuses(payment: &Value, errors: Option<&Value>) -> StatusCollection {
    let errors = match errors {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(Value::Null) | None => &[],
        Some(entry) => std::slice::from_ref(entry),
    };

    status_entries(payment)
        .iter()
        .chain(errors)
        .filter_map(|entry| {
            status_from_fields(
                text(entry, consts::STATUS_CODE),
                text(entry, consts::STATUS_DESCRIPTION),
                text(entry, consts::STATUS_SEVERITY),
            )
            .map_err(|error| {
                logger::debug!(reason = %error.current_context(), "skipped incomplete status entry")
            })
            .ok()
        })
        .collect()
}

fn provider_transaction_ids(payment: &Value) -> BTreeSet<String> {
    status_entries(payment)
        .iter()
        .filter_map(|entry| non_empty(text(entry, consts::PROVIDER_TRANSACTION_ID)))
        .map(str::to_owned)
        .collect()
}
