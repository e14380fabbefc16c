//! Copies echoed request data out of a payload.
//!
//! Works on the JSON view of either wire format, so XML attributes and JSON
//! keys are read the same way. Absent fields stay `None`; nothing here can
//! fail a classification.

use epp_models::{
    entities::{AccountHolder, Address, Amount, BasketItem, CardToken, CustomField},
    flatten, ResponseDetails,
};
use serde_json::Value;

use crate::consts::{self, XML_TEXT_KEY};

const REQUESTED_AMOUNT: &str = "requested-amount";
const ACCOUNT_HOLDER: &str = "account-holder";
const SHIPPING: &str = "shipping";
const ORDER_ITEMS: &str = "order-items";
const ORDER_ITEM: &str = "order-item";
const CUSTOM_FIELDS: &str = "custom-fields";
const CUSTOM_FIELD: &str = "custom-field";
const CARD_TOKEN: &str = "card-token";

/// `payload` is the whole document, `payment` the node holding payment data
pub fn extract(payload: &Value, payment: &Value) -> ResponseDetails {
    ResponseDetails {
        data: flatten::flatten(payload),
        payment_method: payment
            .get(consts::PAYMENT_METHODS)
            .and_then(|methods| one_or_many(methods.get(consts::PAYMENT_METHOD)).first())
            .and_then(|method| field(method, "name")),
        requested_amount: payment.get(REQUESTED_AMOUNT).and_then(amount),
        account_holder: payment.get(ACCOUNT_HOLDER).map(account_holder),
        shipping: payment.get(SHIPPING).map(account_holder),
        basket: one_or_many(
            payment
                .get(ORDER_ITEMS)
                .and_then(|items| items.get(ORDER_ITEM)),
        )
        .iter()
        .filter_map(basket_item)
        .collect(),
        custom_fields: one_or_many(
            payment
                .get(CUSTOM_FIELDS)
                .and_then(|fields| fields.get(CUSTOM_FIELD)),
        )
        .iter()
        .filter_map(custom_field)
        .collect(),
        card_token: payment.get(CARD_TOKEN).and_then(card_token),
    }
}

/// Scalar content of a node; an element with attributes keeps it under `value`
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Object(map) => return map.get(XML_TEXT_KEY).and_then(as_text),
        Value::Null | Value::Array(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(as_text)
}

fn one_or_many(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(values)) => values,
        Some(Value::Null) | None => &[],
        Some(value) => std::slice::from_ref(value),
    }
}

fn amount(value: &Value) -> Option<Amount> {
    Some(Amount {
        value: as_text(value)?,
        currency: field(value, "currency")?,
    })
}

fn account_holder(value: &Value) -> AccountHolder {
    AccountHolder {
        first_name: field(value, "first-name"),
        last_name: field(value, "last-name"),
        email: field(value, "email"),
        phone: field(value, "phone"),
        date_of_birth: field(value, "date-of-birth"),
        address: value.get("address").map(|address| Address {
            street1: field(address, "street1"),
            street2: field(address, "street2"),
            city: field(address, "city"),
            state: field(address, "state"),
            country: field(address, "country"),
            postal_code: field(address, "postal-code"),
        }),
    }
}

fn basket_item(value: &Value) -> Option<BasketItem> {
    Some(BasketItem {
        name: field(value, "name")?,
        amount: value.get("amount").and_then(amount),
        quantity: field(value, "quantity"),
        article_number: field(value, "article-number"),
        description: field(value, "description"),
        tax_rate: field(value, "tax-rate"),
    })
}

fn custom_field(value: &Value) -> Option<CustomField> {
    let name = field(value, "field-name")?;
    let value = field(value, "field-value").unwrap_or_default();
    Some(CustomField::from_gateway_name(&name, value))
}

fn card_token(value: &Value) -> Option<CardToken> {
    Some(CardToken {
        token_id: field(value, "token-id")?,
        masked_account_number: field(value, "masked-account-number"),
    })
}
