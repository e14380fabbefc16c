//! Element, attribute and key names used by the gateway

pub const TRANSACTION_STATE: &str = "transaction-state";
pub const TRANSACTION_ID: &str = "transaction-id";
pub const STATUSES: &str = "statuses";
pub const STATUS: &str = "status";
pub const PAYMENT_METHODS: &str = "payment-methods";
pub const PAYMENT_METHOD: &str = "payment-method";
pub const PROVIDER_TRANSACTION_ID: &str = "provider-transaction-id";
pub const REDIRECT_URL_ATTRIBUTE: &str = "url";

pub const STATUS_CODE: &str = "code";
pub const STATUS_DESCRIPTION: &str = "description";
pub const STATUS_SEVERITY: &str = "severity";

pub const STATE_SUCCESS: &str = "success";
pub const STATE_FAILED: &str = "failed";

/// Hosted payment page keys
pub const PAYMENT: &str = "payment";
pub const ERRORS: &str = "errors";
pub const PAYMENT_REDIRECT_URL: &str = "payment-redirect-url";

/// Key under which element text is kept when the element also has attributes or children
pub const XML_TEXT_KEY: &str = "value";

/// Redirect callback form fields
pub const EPP_RESPONSE_FIELD: &str = "eppresponse";
pub const MERCHANT_DATA_FIELD: &str = "MD";
pub const PA_RES_FIELD: &str = "PaRes";
