//! Basket, account holder and custom field data the gateway echoes back.
//!
//! These are surfaced as-is next to the classified response and carry no
//! decision logic of their own.

use serde::Serialize;

/// Gateway prefix on merchant supplied custom field names
pub const CUSTOM_FIELD_PREFIX: &str = "paysdk_";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Amount {
    /// Amount in major units exactly as the gateway rendered it
    pub value: String,
    pub currency: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Address {
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AccountHolder {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<Address>,
}

/// One line of the order basket
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BasketItem {
    pub name: String,
    pub amount: Option<Amount>,
    pub quantity: Option<String>,
    pub article_number: Option<String>,
    pub description: Option<String>,
    pub tax_rate: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CardToken {
    pub token_id: String,
    pub masked_account_number: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CustomField {
    name: String,
    value: String,
}

impl CustomField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Builds a field from the gateway's `field-name`, dropping the [`CUSTOM_FIELD_PREFIX`]
    pub fn from_gateway_name(field_name: &str, value: impl Into<String>) -> Self {
        let name = field_name
            .strip_prefix(CUSTOM_FIELD_PREFIX)
            .unwrap_or(field_name);
        Self::new(name, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFieldCollection(Vec<CustomField>);

impl CustomFieldCollection {
    pub fn add(&mut self, field: CustomField) {
        self.0.push(field);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|field| field.name == name)
            .map(CustomField::value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CustomField> for CustomFieldCollection {
    fn from_iter<I: IntoIterator<Item = CustomField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_field_prefix_is_stripped_once() {
        let fields = [
            CustomField::from_gateway_name("paysdk_orderRef", "A-1"),
            CustomField::from_gateway_name("plain", "x"),
            CustomField::from_gateway_name("paysdk_paysdk_nested", "y"),
        ]
        .into_iter()
        .collect::<CustomFieldCollection>();

        assert_eq!(fields.get("orderRef"), Some("A-1"));
        assert_eq!(fields.get("plain"), Some("x"));
        assert_eq!(fields.get("paysdk_nested"), Some("y"));
        assert_eq!(fields.len(), 3);
    }
}
