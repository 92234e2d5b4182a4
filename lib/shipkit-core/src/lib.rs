//! Core types and traits for the shipkit shipping API client.
//!
//! This crate provides the foundational, transport-free pieces used by shipkit:
//! - [`Params`], [`ParamValue`] and the [`ToParams`] family - request parameter model
//! - [`flatten`], [`encode`] and [`to_query_pairs`] - bracket-notation form encoding
//! - [`deserialize`] and [`RootElement`] - response unwrapping
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod client;
mod error;
mod method;
pub mod params;
mod request;
mod response;
mod unwrap;

pub use body::ContentType;
pub use client::HttpClient;
pub use error::{Error, FieldError, RESPONSE_PARSE_ERROR, Result};
pub use method::Method;
pub use params::{
    FlatParam, ParamListItem, ParamValue, Params, ToParamValue, ToParams, encode, flatten,
    flatten_list, flatten_params, format_body_datetime, format_query_datetime, to_query_pairs,
};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use unwrap::{RootElement, deserialize, from_value};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
