//! Procedural macros for the shipkit shipping API client.
//!
//! This crate provides `#[derive(Params)]`, which renders a struct as the
//! ordered parameter mapping that shipkit flattens into form bodies.
//!
//! # Example
//!
//! ```ignore
//! use shipkit::Params;
//!
//! #[derive(Params)]
//! struct Parcel {
//!     length: Option<f64>,
//!     weight: f64,
//!     #[params(rename = "predefined_package")]
//!     package: Option<String>,
//! }
//! ```

mod params_derive;

use proc_macro::TokenStream;

/// Derive `ToParams`, `ToParamValue` and `ParamListItem` for a struct.
///
/// Fields are emitted in declaration order under their `snake_case` name.
///
/// # Attributes
///
/// - `#[params(rename_all = "...")]` on the struct: apply a case rule to every field name
/// - `#[params(rename = "...")]`: use an explicit wire name
/// - `#[params(skip)]`: leave the field out
/// - `#[params(flatten)]`: inline the entries of a nested `ToParams` value
///
/// `Option` fields that are `None` render as null and are dropped when flattened.
///
/// # Example
///
/// ```ignore
/// #[derive(Params)]
/// struct CustomsItem {
///     description: Option<String>,
///     quantity: Option<u32>,
///     #[params(skip)]
///     currency: Option<String>,
/// }
/// ```
#[proc_macro_derive(Params, attributes(params))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    params_derive::expand_params_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
