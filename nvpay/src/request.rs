//! Express Checkout request builders.
//!
//! Each request type turns typed arguments into the [`ParameterSet`] for one
//! API method. None of them touch credentials or the network.
//!
//! | Type | `METHOD` |
//! |---|---|
//! | [`DigitalGoodsCheckout`] | `SetExpressCheckout` |
//! | [`ExpressCheckoutPayment`] | `DoExpressCheckoutPayment` |
//! | [`CheckoutDetails`] | `GetExpressCheckoutDetails` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{field, method, value};
use crate::item::{LineItem, format_amount, sum_amounts};
use crate::params::ParameterSet;

/// How PayPal should treat the funds of a completed checkout.
///
/// Not validated locally: [`PaymentAction::Other`] is passed through and the
/// remote API decides whether it is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentAction {
    /// Immediate charge.
    #[default]
    Sale,
    /// Authorization hold, captured later.
    Authorization,
    /// Order, authorized and captured later (ship later).
    Order,
    /// Any other value, sent as-is.
    Other(String),
}

impl PaymentAction {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sale => value::SALE,
            Self::Authorization => value::AUTHORIZATION,
            Self::Order => value::ORDER,
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for PaymentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PaymentAction {
    fn from(s: &str) -> Self {
        match s {
            value::SALE => Self::Sale,
            value::AUTHORIZATION => Self::Authorization,
            value::ORDER => Self::Order,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PaymentAction {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PaymentAction> for String {
    fn from(action: PaymentAction) -> Self {
        match action {
            PaymentAction::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

/// `SetExpressCheckout` for digital goods.
///
/// Always a `Sale`, with shipping suppressed and guest checkout allowed
/// (`SOLUTIONTYPE=Sole`). Every item is sent with category `Digital`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalGoodsCheckout {
    /// Order total.
    pub amount: f64,
    /// ISO-4217 currency code.
    pub currency_code: String,
    /// Where PayPal sends the buyer after approval.
    pub return_url: String,
    /// Where PayPal sends the buyer after cancelling.
    pub cancel_url: String,
    /// Merchant invoice number.
    pub invoice_number: String,
    /// Purchased goods.
    pub items: Vec<LineItem>,
}

impl DigitalGoodsCheckout {
    /// Creates a checkout with an explicit total.
    pub fn new(
        amount: f64,
        currency_code: impl Into<String>,
        return_url: impl Into<String>,
        cancel_url: impl Into<String>,
        invoice_number: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
            return_url: return_url.into(),
            cancel_url: cancel_url.into(),
            invoice_number: invoice_number.into(),
            items,
        }
    }

    /// Creates a checkout whose total is the sum of its items.
    pub fn from_items(
        currency_code: impl Into<String>,
        return_url: impl Into<String>,
        cancel_url: impl Into<String>,
        invoice_number: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        let amount = sum_amounts(&items);
        Self::new(
            amount,
            currency_code,
            return_url,
            cancel_url,
            invoice_number,
            items,
        )
    }

    /// Builds the request fields.
    #[must_use]
    pub fn to_params(&self) -> ParameterSet {
        let mut params = ParameterSet::new()
            .with(field::METHOD, method::SET_EXPRESS_CHECKOUT)
            .with(field::PAYMENT_AMT, format_amount(self.amount))
            .with(field::PAYMENT_ACTION, value::SALE)
            .with(field::PAYMENT_CURRENCY_CODE, &self.currency_code)
            .with(field::PAYMENT_INVNUM, &self.invoice_number)
            .with(field::RETURN_URL, &self.return_url)
            .with(field::CANCEL_URL, &self.cancel_url)
            .with(field::REQ_CONFIRM_SHIPPING, value::FALSE)
            .with(field::NO_SHIPPING, value::TRUE)
            .with(field::SOLUTION_TYPE, value::SOLE);

        for (i, item) in self.items.iter().enumerate() {
            params = params
                .with_indexed(field::ITEM_NAME_PREFIX, i, &item.name)
                .with_indexed(field::ITEM_AMT_PREFIX, i, format_amount(item.amount))
                .with_indexed(field::ITEM_QTY_PREFIX, i, item.quantity.to_string())
                .with_indexed(field::ITEM_CATEGORY_PREFIX, i, value::DIGITAL);
        }

        params
    }
}

/// `DoExpressCheckoutPayment`: completes a checkout the buyer approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressCheckoutPayment {
    /// Token from `SetExpressCheckout`.
    pub token: String,
    /// Payer id PayPal appended to the return URL.
    pub payer_id: String,
    /// Sale, authorization or order.
    pub action: PaymentAction,
    /// ISO-4217 currency code.
    pub currency_code: String,
    /// Final amount to charge.
    pub amount: f64,
}

impl ExpressCheckoutPayment {
    /// Creates a payment request.
    pub fn new(
        token: impl Into<String>,
        payer_id: impl Into<String>,
        action: impl Into<PaymentAction>,
        currency_code: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            token: token.into(),
            payer_id: payer_id.into(),
            action: action.into(),
            currency_code: currency_code.into(),
            amount,
        }
    }

    /// Creates an immediate-charge payment request.
    pub fn sale(
        token: impl Into<String>,
        payer_id: impl Into<String>,
        currency_code: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self::new(token, payer_id, PaymentAction::Sale, currency_code, amount)
    }

    /// Builds the request fields.
    #[must_use]
    pub fn to_params(&self) -> ParameterSet {
        ParameterSet::new()
            .with(field::METHOD, method::DO_EXPRESS_CHECKOUT_PAYMENT)
            .with(field::TOKEN, &self.token)
            .with(field::PAYER_ID, &self.payer_id)
            .with(field::PAYMENT_ACTION, self.action.as_str())
            .with(field::PAYMENT_CURRENCY_CODE, &self.currency_code)
            .with(field::PAYMENT_AMT, format_amount(self.amount))
    }
}

/// `GetExpressCheckoutDetails`: looks up buyer and payment details by token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    /// Token from `SetExpressCheckout`.
    pub token: String,
}

impl CheckoutDetails {
    /// Creates a details request.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Builds the request fields.
    #[must_use]
    pub fn to_params(&self) -> ParameterSet {
        ParameterSet::new()
            .with(field::METHOD, method::GET_EXPRESS_CHECKOUT_DETAILS)
            .with(field::TOKEN, &self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout() -> DigitalGoodsCheckout {
        DigitalGoodsCheckout::new(
            3.0,
            "USD",
            "https://shop.example/return",
            "https://shop.example/cancel",
            "INV-42",
            vec![LineItem::new("Song", 1.0, 1), LineItem::new("Ringtone", 1.0, 2)],
        )
    }

    #[test]
    fn test_digital_goods_fixed_fields() {
        let params = checkout().to_params();
        assert_eq!(params.method(), Some("SetExpressCheckout"));
        assert_eq!(params.get("PAYMENTREQUEST_0_AMT"), Some("3.00"));
        assert_eq!(params.get("PAYMENTREQUEST_0_PAYMENTACTION"), Some("Sale"));
        assert_eq!(params.get("PAYMENTREQUEST_0_CURRENCYCODE"), Some("USD"));
        assert_eq!(params.get("PAYMENTREQUEST_0_INVNUM"), Some("INV-42"));
        assert_eq!(params.get("RETURNURL"), Some("https://shop.example/return"));
        assert_eq!(params.get("CANCELURL"), Some("https://shop.example/cancel"));
        assert_eq!(params.get("REQCONFIRMSHIPPING"), Some("0"));
        assert_eq!(params.get("NOSHIPPING"), Some("1"));
        assert_eq!(params.get("SOLUTIONTYPE"), Some("Sole"));
    }

    #[test]
    fn test_digital_goods_indexed_items() {
        let params = checkout().to_params();
        assert_eq!(params.get("L_PAYMENTREQUEST_0_NAME0"), Some("Song"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_AMT0"), Some("1.00"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_QTY0"), Some("1"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_ITEMCATEGORY0"), Some("Digital"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_NAME1"), Some("Ringtone"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_AMT1"), Some("1.00"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_QTY1"), Some("2"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_ITEMCATEGORY1"), Some("Digital"));
        assert_eq!(params.get("L_PAYMENTREQUEST_0_NAME2"), None);
        assert_eq!(params.len(), 10 + 2 * 4);
    }

    #[test]
    fn test_digital_goods_from_items_sums_total() {
        let checkout = DigitalGoodsCheckout::from_items(
            "EUR",
            "https://r",
            "https://c",
            "INV",
            vec![LineItem::new("a", 2.5, 2), LineItem::new("b", 0.75, 4)],
        );
        assert_eq!(checkout.to_params().get("PAYMENTREQUEST_0_AMT"), Some("8.00"));
    }

    #[test]
    fn test_express_checkout_payment_fields() {
        let params =
            ExpressCheckoutPayment::new("EC-1", "PAYER1", "Authorization", "USD", 10.5).to_params();
        assert_eq!(params.method(), Some("DoExpressCheckoutPayment"));
        assert_eq!(params.get("TOKEN"), Some("EC-1"));
        assert_eq!(params.get("PAYERID"), Some("PAYER1"));
        assert_eq!(
            params.get("PAYMENTREQUEST_0_PAYMENTACTION"),
            Some("Authorization")
        );
        assert_eq!(params.get("PAYMENTREQUEST_0_CURRENCYCODE"), Some("USD"));
        assert_eq!(params.get("PAYMENTREQUEST_0_AMT"), Some("10.50"));
    }

    #[test]
    fn test_express_checkout_sale() {
        let payment = ExpressCheckoutPayment::sale("EC-1", "PAYER1", "USD", 1.0);
        assert_eq!(payment.action, PaymentAction::Sale);
        assert_eq!(
            payment.to_params().get("PAYMENTREQUEST_0_PAYMENTACTION"),
            Some("Sale")
        );
    }

    #[test]
    fn test_unknown_payment_action_passes_through() {
        let action = PaymentAction::from("Capture");
        assert_eq!(action, PaymentAction::Other("Capture".into()));
        let params = ExpressCheckoutPayment::new("EC-1", "P", action, "USD", 1.0).to_params();
        assert_eq!(params.get("PAYMENTREQUEST_0_PAYMENTACTION"), Some("Capture"));
    }

    #[test]
    fn test_payment_action_serde() {
        let json = serde_json::to_string(&PaymentAction::Order).unwrap();
        assert_eq!(json, "\"Order\"");
        let action: PaymentAction = serde_json::from_str("\"Sale\"").unwrap();
        assert_eq!(action, PaymentAction::Sale);
    }

    #[test]
    fn test_checkout_details_fields() {
        let params = CheckoutDetails::new("EC-9").to_params();
        assert_eq!(params.method(), Some("GetExpressCheckoutDetails"));
        assert_eq!(params.get("TOKEN"), Some("EC-9"));
        assert_eq!(params.len(), 2);
    }
}
