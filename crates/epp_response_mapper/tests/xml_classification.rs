#![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

use base64::Engine;
use common_utils::consts::BASE64_ENGINE;
use epp_models::{MalformedReason, Severity, Status};
use epp_response_mapper::{
    classify, decode, GatewayResponse, ResponseMapper, ResponseMapperError, WireFormat,
};

const REDIRECT: &str = r#"<payment><transaction-state>success</transaction-state><transaction-id>myid</transaction-id><statuses><status code="200" description="OK" severity="information" provider-transaction-id="p1"/></statuses><payment-methods><payment-method name="paypal" url="http://example.com"/></payment-methods></payment>"#;

const FAILURE: &str = r#"<payment><transaction-state>failure</transaction-state><transaction-id>myid</transaction-id><statuses><status code="42" description="Declined" severity="information"/></statuses><payment-methods><payment-method name="paypal" url="http://example.com"/></payment-methods></payment>"#;

fn success_payment(statuses: &str, payment_methods: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<payment xmlns="http://www.elastic-payments.com/schema/payment" self="https://api.example/engine/rest/payments/1">
    <merchant-account-id>dfc3a296-3faa-4a1a-9abe-8f4b2b1e3b2c</merchant-account-id>
    <transaction-id>2f7c3c3a-1b2d-4e5f-9a8b-7c6d5e4f3a2b</transaction-id>
    <request-id>order-4711</request-id>
    <transaction-type>purchase</transaction-type>
    <transaction-state>success</transaction-state>
    <completion-time-stamp>2024-01-05T10:11:12.000Z</completion-time-stamp>
    <statuses>{statuses}</statuses>
    <requested-amount currency="EUR">12.59</requested-amount>
    <account-holder>
        <first-name>Jane</first-name>
        <last-name>Doe</last-name>
        <address><city>Berlin</city><country>DE</country></address>
    </account-holder>
    <order-items>
        <order-item><name>Shoe</name><amount currency="EUR">10.00</amount><quantity>1</quantity></order-item>
        <order-item><name>Lace</name><amount currency="EUR">2.59</amount><quantity>2</quantity></order-item>
    </order-items>
    <custom-fields>
        <custom-field field-name="paysdk_orderId" field-value="4711"/>
    </custom-fields>
    {payment_methods}
</payment>"#
    )
}

const ONE_STATUS: &str = r#"<status code="201.0000" description="The resource was successfully created." severity="information" provider-transaction-id="PROV-1"/>"#;
const CREDIT_CARD: &str =
    r#"<payment-methods><payment-method name="creditcard"/></payment-methods>"#;

fn malformed_reason(xml: &str) -> MalformedReason {
    match ResponseMapper::new().map(xml.as_bytes()).unwrap_err().current_context() {
        ResponseMapperError::MalformedResponse(reason) => *reason,
        other => panic!("expected a malformed response, got {other:?}"),
    }
}

#[test]
fn redirect_marker_takes_precedence_over_provider_id() {
    let response = ResponseMapper::new().map(REDIRECT.as_bytes()).unwrap();

    let GatewayResponse::Interaction(interaction) = response else {
        panic!("expected an interaction, got {response:?}");
    };
    assert_eq!(interaction.redirect_url, "http://example.com");
    assert_eq!(interaction.transaction_id.as_deref(), Some("myid"));
    assert_eq!(interaction.statuses.len(), 1);
}

#[test]
fn non_success_state_fails_even_with_redirect_marker() {
    let response = ResponseMapper::new().map(FAILURE.as_bytes()).unwrap();

    let GatewayResponse::Failure(failure) = response else {
        panic!("expected a failure, got {response:?}");
    };
    let statuses = failure.statuses.iter().collect::<Vec<_>>();
    assert_eq!(statuses, [&Status::new("42", "Declined", Severity::Information)]);
}

#[test]
fn failure_keeps_statuses_in_document_order() {
    let xml = r#"<payment>
        <transaction-state>failed</transaction-state>
        <statuses>
            <status code="400.1027" description="first" severity="error"/>
            <status code="201.1126" description="second" severity="warning"/>
            <status code="200.0000" description="third" severity="information"/>
        </statuses>
    </payment>"#;

    let response = ResponseMapper::new().map(xml.as_bytes()).unwrap();

    let codes = response
        .statuses()
        .iter()
        .map(Status::code)
        .collect::<Vec<_>>();
    assert_eq!(codes, ["400.1027", "201.1126", "200.0000"]);
    assert_eq!(response.statuses().with_severity(Severity::Error).count(), 1);
}

#[test]
fn success_carries_transaction_and_provider_ids() {
    let xml = success_payment(ONE_STATUS, CREDIT_CARD);

    let response = ResponseMapper::new().map(xml.as_bytes()).unwrap();

    let GatewayResponse::Success(success) = response else {
        panic!("expected success, got {response:?}");
    };
    assert_eq!(success.transaction_id, "2f7c3c3a-1b2d-4e5f-9a8b-7c6d5e4f3a2b");
    assert_eq!(success.provider_transaction_id(), Some("PROV-1"));
    assert_eq!(success.format, WireFormat::Xml);
}

#[test]
fn success_exposes_pass_through_details() {
    let xml = success_payment(ONE_STATUS, CREDIT_CARD);

    let response = ResponseMapper::new().map(xml.as_bytes()).unwrap();
    let details = response.details();

    assert_eq!(details.payment_method.as_deref(), Some("creditcard"));
    let amount = details.requested_amount.as_ref().unwrap();
    assert_eq!((amount.value.as_str(), amount.currency.as_str()), ("12.59", "EUR"));
    let holder = details.account_holder.as_ref().unwrap();
    assert_eq!(holder.last_name.as_deref(), Some("Doe"));
    assert_eq!(
        holder.address.as_ref().and_then(|address| address.city.as_deref()),
        Some("Berlin")
    );
    assert_eq!(details.basket.len(), 2);
    assert_eq!(details.basket[1].name, "Lace");
    assert_eq!(details.custom_fields.get("orderId"), Some("4711"));
    assert_eq!(details.data["order-items.order-item.1.amount.value"], "2.59");
    assert_eq!(details.data["requested-amount.currency"], "EUR");
}

#[test]
fn base64_notification_classifies_like_plain_xml() {
    let xml = success_payment(ONE_STATUS, CREDIT_CARD);
    let encoded = BASE64_ENGINE.encode(&xml);
    let mapper = ResponseMapper::new();

    let plain = mapper.map(xml.as_bytes()).unwrap();
    let notified = mapper.handle_notification(encoded.as_bytes()).unwrap();

    assert_eq!(plain, notified);
    assert_eq!(notified.raw_payload(), xml);
}

#[test]
fn classifying_twice_yields_equal_responses() {
    for xml in [REDIRECT.to_owned(), FAILURE.to_owned(), success_payment(ONE_STATUS, CREDIT_CARD)] {
        let decoded = decode(xml.as_bytes(), WireFormat::Xml).unwrap();

        let first = classify(&decoded).unwrap();
        let second = GatewayResponse::try_from(&decoded).unwrap();

        assert_eq!(first, second);
    }
}

#[test]
fn empty_statuses_block_is_malformed() {
    let xml = success_payment("", CREDIT_CARD);
    assert_eq!(malformed_reason(&xml), MalformedReason::StatusesEmpty);
}

#[test]
fn two_payment_methods_are_malformed() {
    let xml = success_payment(
        ONE_STATUS,
        r#"<payment-methods><payment-method name="creditcard"/><payment-method name="paypal"/></payment-methods>"#,
    );
    assert_eq!(malformed_reason(&xml), MalformedReason::MorePaymentMethods);
}

#[test]
fn divergent_provider_ids_are_malformed() {
    let statuses = r#"
        <status code="201.0000" description="ok" severity="information" provider-transaction-id="PROV-1"/>
        <status code="201.0001" description="ok" severity="information" provider-transaction-id="PROV-2"/>"#;
    let xml = success_payment(statuses, CREDIT_CARD);
    assert_eq!(
        malformed_reason(&xml),
        MalformedReason::DivergentProviderTransactionIds
    );
}

#[test]
fn agreeing_provider_ids_are_accepted() {
    let statuses = r#"
        <status code="201.0000" description="ok" severity="information" provider-transaction-id="PROV-1"/>
        <status code="201.0001" description="ok" severity="information" provider-transaction-id="PROV-1"/>"#;
    let xml = success_payment(statuses, CREDIT_CARD);

    let response = ResponseMapper::new().map(xml.as_bytes()).unwrap();
    assert!(response.is_success());
}

#[test]
fn missing_payment_methods_is_malformed() {
    let xml = success_payment(ONE_STATUS, "");
    assert_eq!(malformed_reason(&xml), MalformedReason::MissingPaymentMethods);
}

#[test]
fn missing_transaction_id_is_malformed() {
    let xml = r#"<payment>
        <transaction-state>success</transaction-state>
        <statuses><status code="201.0000" description="ok" severity="information"/></statuses>
    </payment>"#;
    assert_eq!(malformed_reason(xml), MalformedReason::MissingTransactionId);
}

#[test]
fn status_without_severity_is_malformed() {
    let xml = success_payment(r#"<status code="201.0000" description="ok"/>"#, CREDIT_CARD);
    assert_eq!(malformed_reason(&xml), MalformedReason::MissingStatusSeverity);
}

#[test]
fn invalid_xml_is_a_decode_error() {
    let error = ResponseMapper::new()
        .map(b"<payment><transaction-state>")
        .unwrap_err();
    assert_eq!(
        error.current_context().to_string(),
        "Failed to decode gateway payload: not a valid xml string"
    );
}
