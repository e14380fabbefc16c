//! Decision procedure for the direct API and notification XML.
//!
//! The checks run in a fixed order, so a response missing several parts
//! always reports the same reason.

use std::collections::BTreeSet;

use common_utils::errors::CustomResult;
use epp_models::{
    FailureResponse, GatewayResponse, InteractionResponse, MalformedReason as Reason,
    ResponseMapperError, StatusCollection, SuccessResponse, WireFormat,
};

use super::{malformed, non_empty, status_from_fields};
use crate::{
    consts,
    decoder::{DecodedPayload, XmlNode},
    details,
};

pub fn classify(
    decoded: &DecodedPayload,
    root: &XmlNode,
) -> CustomResult<GatewayResponse, ResponseMapperError> {
    let state = root
        .child(consts::TRANSACTION_STATE)
        .map(XmlNode::text)
        .ok_or_else(|| malformed(Reason::MissingTransactionState))?;

    let status_nodes = root
        .child(consts::STATUSES)
        .map(|statuses| statuses.children_named(consts::STATUS).collect::<Vec<_>>())
        .unwrap_or_default();
    let statuses = status_nodes
        .iter()
        .map(|node| {
            status_from_fields(
                node.attribute(consts::STATUS_CODE),
                node.attribute(consts::STATUS_DESCRIPTION),
                node.attribute(consts::STATUS_SEVERITY),
            )
        })
        .collect::<CustomResult<StatusCollection, _>>()?;
    if statuses.is_empty() {
        return Err(malformed(Reason::StatusesEmpty));
    }

    let value = decoded.to_value();
    let details = details::extract(&value, &value);
    let raw_payload = decoded.raw().to_owned();

    if state != consts::STATE_SUCCESS {
        return Ok(GatewayResponse::Failure(FailureResponse {
            raw_payload,
            format: WireFormat::Xml,
            statuses,
            details,
        }));
    }

    let transaction_id = root
        .child(consts::TRANSACTION_ID)
        .map(XmlNode::text)
        .ok_or_else(|| malformed(Reason::MissingTransactionId))?
        .to_owned();

    let payment_methods = root
        .child(consts::PAYMENT_METHODS)
        .ok_or_else(|| malformed(Reason::MissingPaymentMethods))?
        .children_named(consts::PAYMENT_METHOD)
        .collect::<Vec<_>>();
    let payment_method = match payment_methods.as_slice() {
        [] => return Err(malformed(Reason::PaymentMethodsEmpty)),
        [payment_method] => *payment_method,
        _ => return Err(malformed(Reason::MorePaymentMethods)),
    };

    if let Some(redirect_url) = payment_method.attribute(consts::REDIRECT_URL_ATTRIBUTE) {
        return Ok(GatewayResponse::Interaction(InteractionResponse {
            raw_payload,
            format: WireFormat::Xml,
            statuses,
            transaction_id: Some(transaction_id),
            redirect_url: redirect_url.to_owned(),
            details,
        }));
    }

    let provider_transaction_id = provider_transaction_id(&status_nodes)?;

    Ok(GatewayResponse::Success(SuccessResponse {
        raw_payload,
        format: WireFormat::Xml,
        statuses,
        transaction_id,
        provider_transaction_ids: BTreeSet::from([provider_transaction_id]),
        details,
    }))
}

/// The single provider transaction id shared by every status that carries one.
///
/// Statuses without the attribute are ignored.
fn provider_transaction_id(
    status_nodes: &[&XmlNode],
) -> CustomResult<String, ResponseMapperError> {
    let ids = status_nodes
        .iter()
        .filter_map(|node| non_empty(node.attribute(consts::PROVIDER_TRANSACTION_ID)))
        .collect::<BTreeSet<_>>();

    let mut ids = ids.into_iter();
    match (ids.next(), ids.next()) {
        (Some(id), None) => Ok(id.to_owned()),
        (None, _) => Err(malformed(Reason::NoProviderTransactionId)),
        (Some(first), Some(second)) => Err(malformed(Reason::DivergentProviderTransactionIds)
            .attach_printable(format!(
                "Statuses report provider transaction ids {first} and {second}"
            ))),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::decoder::{decode, DecodedBody};

    fn classify_str(xml: &str) -> CustomResult<GatewayResponse, ResponseMapperError> {
        let decoded = decode(xml.as_bytes(), WireFormat::Xml).unwrap();
        let DecodedBody::Xml(root) = decoded.body() else {
            panic!("expected an xml body");
        };
        classify(&decoded, root)
    }

    fn reason(xml: &str) -> ResponseMapperError {
        *classify_str(xml).unwrap_err().current_context()
    }

    #[test]
    fn missing_state_is_checked_before_statuses() {
        assert_eq!(
            reason("<payment><statuses/></payment>"),
            ResponseMapperError::MalformedResponse(Reason::MissingTransactionState)
        );
    }

    #[test]
    fn missing_statuses_block_counts_as_empty() {
        assert_eq!(
            reason("<payment><transaction-state>success</transaction-state></payment>"),
            ResponseMapperError::MalformedResponse(Reason::StatusesEmpty)
        );
    }

    #[test]
    fn failure_does_not_need_transaction_id_or_payment_methods() {
        let response = classify_str(
            r#"<payment>
                <transaction-state>failed</transaction-state>
                <statuses><status code="500.1999" description="declined" severity="error"/></statuses>
            </payment>"#,
        )
        .unwrap();

        assert!(matches!(response, GatewayResponse::Failure(_)));
        assert_eq!(response.transaction_id(), None);
    }

    #[test]
    fn mixed_provider_id_presence_is_tolerated() {
        let response = classify_str(
            r#"<payment>
                <transaction-state>success</transaction-state>
                <transaction-id>tx</transaction-id>
                <statuses>
                    <status code="201.0000" description="ok" severity="information" provider-transaction-id="p1"/>
                    <status code="201.1126" description="note" severity="warning"/>
                </statuses>
                <payment-methods><payment-method name="creditcard"/></payment-methods>
            </payment>"#,
        )
        .unwrap();

        let GatewayResponse::Success(success) = response else {
            panic!("expected success");
        };
        assert_eq!(success.provider_transaction_id(), Some("p1"));
    }

    #[test]
    fn success_requires_a_provider_id() {
        assert_eq!(
            reason(
                r#"<payment>
                    <transaction-state>success</transaction-state>
                    <transaction-id>tx</transaction-id>
                    <statuses><status code="201.0000" description="ok" severity="information"/></statuses>
                    <payment-methods><payment-method name="creditcard"/></payment-methods>
                </payment>"#
            ),
            ResponseMapperError::MalformedResponse(Reason::NoProviderTransactionId)
        );
    }

    #[test]
    fn empty_payment_methods_block_is_malformed() {
        assert_eq!(
            reason(
                r#"<payment>
                    <transaction-state>success</transaction-state>
                    <transaction-id>tx</transaction-id>
                    <statuses><status code="201.0000" description="ok" severity="information"/></statuses>
                    <payment-methods/>
                </payment>"#
            ),
            ResponseMapperError::MalformedResponse(Reason::PaymentMethodsEmpty)
        );
    }

    #[test]
    fn empty_url_attribute_still_marks_an_interaction() {
        let response = classify_str(
            r#"<payment>
                <transaction-state>success</transaction-state>
                <transaction-id/>
                <statuses><status code="201.0000" description="ok" severity="information"/></statuses>
                <payment-methods><payment-method name="paypal" url=""/></payment-methods>
            </payment>"#,
        )
        .unwrap();

        let GatewayResponse::Interaction(interaction) = response else {
            panic!("expected an interaction");
        };
        assert_eq!(interaction.redirect_url, "");
        assert_eq!(interaction.transaction_id.as_deref(), Some(""));
    }
}
