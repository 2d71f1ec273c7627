//! Shared helpers for the HTTP layer.
//!
//! - [`payment`]: Checkout order ids and payment signature checks

pub mod payment;
