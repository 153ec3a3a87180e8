#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the PayPal Name-Value Pair (NVP) API.
//!
//! [`NvpClient`] owns the credentials and the endpoint pair, signs each
//! [`ParameterSet`](nvpay::ParameterSet), POSTs it as a form body with
//! `reqwest` and decodes the reply into an [`Outcome`](nvpay::Outcome).
//!
//! Each operation is exactly one round trip. There are no retries, no caching
//! and no background tasks; deadlines come from [`ClientConfig::with_timeout`]
//! or from the injected `reqwest::Client`.
//!
//! # Modules
//!
//! - [`client`] - The transport client and the Express Checkout operations
//! - [`config`] - Client configuration
//! - [`error`] - Transport error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of every submitted call

pub mod client;
pub mod config;
pub mod error;

pub use client::NvpClient;
pub use config::ClientConfig;
pub use error::ClientError;
