//! NVP protocol constants.
//!
//! Endpoint URLs, the protocol version and every field name this crate reads
//! or writes.

/// Sandbox NVP API endpoint.
pub const NVP_SANDBOX_URL: &str = "https://api-3t.sandbox.paypal.com/nvp";

/// Production NVP API endpoint.
pub const NVP_PRODUCTION_URL: &str = "https://api-3t.paypal.com/nvp";

/// Sandbox checkout redirect endpoint.
pub const CHECKOUT_SANDBOX_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// Production checkout redirect endpoint.
pub const CHECKOUT_PRODUCTION_URL: &str = "https://www.paypal.com/cgi-bin/webscr";

/// NVP protocol version sent with every request.
pub const NVP_VERSION: &str = "84";

/// `Content-Type` of request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Value of the `cmd` query parameter on the checkout redirect.
pub const EXPRESS_CHECKOUT_CMD: &str = "_express-checkout";

/// API method names.
pub mod method {
    /// Starts an Express Checkout and obtains a token.
    pub const SET_EXPRESS_CHECKOUT: &str = "SetExpressCheckout";
    /// Completes an Express Checkout payment.
    pub const DO_EXPRESS_CHECKOUT_PAYMENT: &str = "DoExpressCheckoutPayment";
    /// Fetches buyer and payment details for a token.
    pub const GET_EXPRESS_CHECKOUT_DETAILS: &str = "GetExpressCheckoutDetails";
}

/// Request and response field names.
pub mod field {
    /// API method selector.
    pub const METHOD: &str = "METHOD";
    /// API username.
    pub const USER: &str = "USER";
    /// API password.
    pub const PWD: &str = "PWD";
    /// API signature.
    pub const SIGNATURE: &str = "SIGNATURE";
    /// Protocol version (sent and echoed back).
    pub const VERSION: &str = "VERSION";
    /// Express Checkout token.
    pub const TOKEN: &str = "TOKEN";
    /// Buyer identifier returned to the return URL.
    pub const PAYER_ID: &str = "PAYERID";
    /// Buyer return URL.
    pub const RETURN_URL: &str = "RETURNURL";
    /// Buyer cancel URL.
    pub const CANCEL_URL: &str = "CANCELURL";
    /// Whether a confirmed shipping address is required.
    pub const REQ_CONFIRM_SHIPPING: &str = "REQCONFIRMSHIPPING";
    /// Whether shipping fields are shown at all.
    pub const NO_SHIPPING: &str = "NOSHIPPING";
    /// Whether a PayPal account is optional.
    pub const SOLUTION_TYPE: &str = "SOLUTIONTYPE";

    /// Order total.
    pub const PAYMENT_AMT: &str = "PAYMENTREQUEST_0_AMT";
    /// Sale, authorization or order.
    pub const PAYMENT_ACTION: &str = "PAYMENTREQUEST_0_PAYMENTACTION";
    /// ISO-4217 currency code.
    pub const PAYMENT_CURRENCY_CODE: &str = "PAYMENTREQUEST_0_CURRENCYCODE";
    /// Merchant invoice number.
    pub const PAYMENT_INVNUM: &str = "PAYMENTREQUEST_0_INVNUM";
    /// Transaction identifier of a completed payment.
    pub const PAYMENT_TRANSACTION_ID: &str = "PAYMENTREQUEST_0_TRANSACTIONID";

    /// Line item name prefix; the item index is appended.
    pub const ITEM_NAME_PREFIX: &str = "L_PAYMENTREQUEST_0_NAME";
    /// Line item unit amount prefix.
    pub const ITEM_AMT_PREFIX: &str = "L_PAYMENTREQUEST_0_AMT";
    /// Line item quantity prefix.
    pub const ITEM_QTY_PREFIX: &str = "L_PAYMENTREQUEST_0_QTY";
    /// Line item category prefix.
    pub const ITEM_CATEGORY_PREFIX: &str = "L_PAYMENTREQUEST_0_ITEMCATEGORY";

    /// Acknowledgement status.
    pub const ACK: &str = "ACK";
    /// Correlation id for PayPal support.
    pub const CORRELATION_ID: &str = "CORRELATIONID";
    /// Server timestamp.
    pub const TIMESTAMP: &str = "TIMESTAMP";
    /// Server build identifier.
    pub const BUILD: &str = "BUILD";

    /// Error code prefix; the error index is appended.
    pub const ERROR_CODE_PREFIX: &str = "L_ERRORCODE";
    /// Short error message prefix.
    pub const SHORT_MESSAGE_PREFIX: &str = "L_SHORTMESSAGE";
    /// Long error message prefix.
    pub const LONG_MESSAGE_PREFIX: &str = "L_LONGMESSAGE";
    /// Severity code prefix.
    pub const SEVERITY_CODE_PREFIX: &str = "L_SEVERITYCODE";
}

/// Fixed request values.
pub mod value {
    /// Immediate charge payment action.
    pub const SALE: &str = "Sale";
    /// Authorization hold payment action.
    pub const AUTHORIZATION: &str = "Authorization";
    /// Deferred order payment action.
    pub const ORDER: &str = "Order";
    /// Line item category for digital goods.
    pub const DIGITAL: &str = "Digital";
    /// Buyer does not need a PayPal account.
    pub const SOLE: &str = "Sole";
    /// Boolean false.
    pub const FALSE: &str = "0";
    /// Boolean true.
    pub const TRUE: &str = "1";
}

/// Acknowledgement values that mark a failed call (compared case-insensitively).
pub const FAILURE_ACKS: [&str; 2] = ["failure", "failurewithwarning"];
