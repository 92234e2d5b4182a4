//! Async client for a shipping label API.
//!
//! Requests are sent as bracket-notation form bodies
//! (`shipment[to_address][city]=...`), responses are JSON objects that are
//! sometimes wrapped in a root element. Both directions are typed:
//! request objects derive [`Params`], response objects derive
//! [`serde::Deserialize`].
//!
//! # Example
//!
//! ```ignore
//! use shipkit::prelude::*;
//!
//! let client = ShippingClient::new("sk_test_123")?;
//!
//! let shipment = client
//!     .create_shipment(&Shipment {
//!         to_address: Some(Address {
//!             meta: ObjectMeta::with_id("adr_to"),
//!             ..Address::default()
//!         }),
//!         from_address: Some(Address {
//!             meta: ObjectMeta::with_id("adr_from"),
//!             ..Address::default()
//!         }),
//!         parcel: Some(Parcel {
//!             weight: Some(15.4),
//!             ..Parcel::default()
//!         }),
//!         ..Shipment::default()
//!     })
//!     .await?;
//!
//! let rate = shipment
//!     .lowest_rate(&RateFilter::new().include_carriers(["USPS"]))?
//!     .and_then(|rate| rate.meta.id.clone());
//! ```
//!
//! Custom request objects use the same derive:
//!
//! ```
//! use shipkit::{Params, ToParams, encode, flatten_params};
//!
//! #[derive(Params)]
//! struct DockSlot {
//!     reference: String,
//!     #[params(skip)]
//!     internal_note: String,
//!     instructions: Option<String>,
//! }
//!
//! let slot = DockSlot {
//!     reference: "dock 4".to_string(),
//!     internal_note: "ignored".to_string(),
//!     instructions: None,
//! };
//! let body = encode(&flatten_params(&slot.to_params(), "pickup"));
//! assert_eq!(body, "pickup%5Breference%5D=dock%204");
//! ```

extern crate self as shipkit;

mod api;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
pub mod resources;

pub use api::{ApiRequest, ShippingClient};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_API_BASE, DEFAULT_USER_AGENT, TransportConfig,
};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use shipkit_core::{
    ContentType, Error, FieldError, FlatParam, HttpClient, Method, ParamListItem, ParamValue,
    Params, RESPONSE_PARSE_ERROR, Request, RequestBuilder, Response, Result, RootElement,
    ToParamValue, ToParams, deserialize, encode, flatten, flatten_list, flatten_params,
    format_body_datetime, format_query_datetime, from_value, to_query_pairs,
};

// Re-export http types for status codes and headers
pub use shipkit_core::{StatusCode, header};

// Re-export the derive, it shares the name of the `Params` type
pub use shipkit_macro::Params;

pub use resources::{
    Address, Batch, CarrierAccount, CarrierType, CustomsInfo, CustomsItem, Event, ObjectMeta,
    Order, Parcel, Pickup, Rate, RateFilter, Report, ReportList, ReportListOptions, ScanForm,
    ScanFormList, ScanFormListOptions, Shipment, ShipmentList, ShipmentListOptions, Tracker,
    TrackerList, TrackerListOptions, User, Verify, Webhook, WebhookList,
};
