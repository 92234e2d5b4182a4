//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits and the
//! `Params` derive for easy glob importing:
//!
//! ```ignore
//! use shipkit::prelude::*;
//! ```

pub use crate::{
    Address, ApiRequest, ClientConfig, Error, HttpClient, HyperClient, ObjectMeta, Params, Parcel,
    Rate, RateFilter, Result, Shipment, ShippingClient, ToParamValue, ToParams, Verify,
};
pub use serde::Deserialize;
