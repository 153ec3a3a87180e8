#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the PayPal Name-Value Pair (NVP) API.
//!
//! This crate holds everything about the NVP protocol that does not involve
//! the network: building request parameter sets, decoding flat
//! `key=value&key=value` response bodies, classifying remote failures and
//! constructing the browser-facing checkout redirect. The HTTP transport lives
//! in the `nvpay-http` crate.
//!
//! # Overview
//!
//! A call is made in three steps:
//!
//! 1. A typed request from [`request`] is turned into a [`ParameterSet`].
//! 2. The transport merges [`Credentials`] into a *new* set with
//!    [`ParameterSet::with_credentials`] and POSTs it.
//! 3. The body is decoded by [`response::decode`] into an [`Outcome`]: either a
//!    successful [`Response`], or a failure that carries both the classified
//!    error and whatever was decoded.
//!
//! # Modules
//!
//! - [`constants`] - Endpoint URLs, protocol version and field names
//! - [`credentials`] - API credentials
//! - [`environment`] - Sandbox/production selection and endpoint pairs
//! - [`error`] - Remote, decode and redirect error types
//! - [`item`] - Line items and amount formatting
//! - [`outcome`] - Tagged result of a decoded call
//! - [`params`] - Ordered request parameter sets
//! - [`request`] - Express Checkout request builders
//! - [`response`] - Response decoding and error classification

pub mod constants;
pub mod credentials;
pub mod environment;
pub mod error;
pub mod item;
pub mod outcome;
pub mod params;
pub mod request;
pub mod response;

pub use credentials::Credentials;
pub use environment::{Endpoints, Environment};
pub use error::{CheckoutUrlError, DecodeError, ErrorDetail, RemoteError, ResponseError};
pub use item::LineItem;
pub use outcome::{Outcome, ResponseFailure};
pub use params::ParameterSet;
pub use request::{CheckoutDetails, DigitalGoodsCheckout, ExpressCheckoutPayment, PaymentAction};
pub use response::{ErrorDecoding, NvpValues, Response};
