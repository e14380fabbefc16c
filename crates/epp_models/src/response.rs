use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    entities::{AccountHolder, Amount, BasketItem, CardToken, CustomFieldCollection},
    enums::WireFormat,
    status::StatusCollection,
};

/// Outcome of classifying one gateway payload.
///
/// The orchestrating workflow redirects the browser on `Interaction`,
/// surfaces the statuses on `Failure` and proceeds on `Success`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GatewayResponse {
    Success(SuccessResponse),
    Interaction(InteractionResponse),
    Failure(FailureResponse),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub raw_payload: String,
    pub format: WireFormat,
    pub statuses: StatusCollection,
    pub transaction_id: String,
    pub provider_transaction_ids: BTreeSet<String>,
    pub details: ResponseDetails,
}

impl SuccessResponse {
    /// The provider transaction id when the gateway reported exactly one
    pub fn provider_transaction_id(&self) -> Option<&str> {
        let mut ids = self.provider_transaction_ids.iter();
        match (ids.next(), ids.next()) {
            (Some(id), None) => Some(id.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InteractionResponse {
    pub raw_payload: String,
    pub format: WireFormat,
    pub statuses: StatusCollection,
    /// Always present for XML responses; the hosted payment page redirect carries none
    pub transaction_id: Option<String>,
    pub redirect_url: String,
    pub details: ResponseDetails,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FailureResponse {
    pub raw_payload: String,
    pub format: WireFormat,
    pub statuses: StatusCollection,
    pub details: ResponseDetails,
}

/// Pass-through data copied out of the payload at classification time
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ResponseDetails {
    /// Whole payload as dotted path -> value pairs
    pub data: BTreeMap<String, String>,
    pub payment_method: Option<String>,
    pub requested_amount: Option<Amount>,
    pub account_holder: Option<AccountHolder>,
    pub shipping: Option<AccountHolder>,
    pub basket: Vec<BasketItem>,
    pub custom_fields: CustomFieldCollection,
    pub card_token: Option<CardToken>,
}

impl GatewayResponse {
    pub fn raw_payload(&self) -> &str {
        match self {
            Self::Success(response) => &response.raw_payload,
            Self::Interaction(response) => &response.raw_payload,
            Self::Failure(response) => &response.raw_payload,
        }
    }

    pub fn statuses(&self) -> &StatusCollection {
        match self {
            Self::Success(response) => &response.statuses,
            Self::Interaction(response) => &response.statuses,
            Self::Failure(response) => &response.statuses,
        }
    }

    pub fn format(&self) -> WireFormat {
        match self {
            Self::Success(response) => response.format,
            Self::Interaction(response) => response.format,
            Self::Failure(response) => response.format,
        }
    }

    pub fn details(&self) -> &ResponseDetails {
        match self {
            Self::Success(response) => &response.details,
            Self::Interaction(response) => &response.details,
            Self::Failure(response) => &response.details,
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Success(response) => Some(&response.transaction_id),
            Self::Interaction(response) => response.transaction_id.as_deref(),
            Self::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Data needed to continue a 3-D Secure flow after the issuer's ACS
/// posted back to the merchant
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ThreeDsContinuation {
    /// Transaction id of the enrollment check the authentication belongs to
    pub parent_transaction_id: String,
    /// Operation to perform once authenticated, e.g. `authorization`
    pub operation: Option<String>,
    pub pa_res: String,
}

/// What a browser redirect callback asks the orchestrator to do next
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ResponseAction {
    Completed(GatewayResponse),
    /// A follow-up request has to be sent with the authentication result
    ThreeDsContinuation(ThreeDsContinuation),
}
