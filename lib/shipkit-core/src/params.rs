//! Parameter model and form flattening.
//!
//! The remote API takes request bodies as `application/x-www-form-urlencoded`
//! with nested structure encoded in bracket-indexed keys:
//!
//! ```text
//! shipment[to_address][street1]=164 Townsend St
//! shipment[customs_info][customs_items][0][description]=T-shirt
//! ```
//!
//! Domain objects describe themselves through [`ToParams`] (usually derived with
//! `#[derive(Params)]`), producing an ordered [`Params`] mapping. [`flatten`] turns
//! that mapping into [`FlatParam`] pairs and [`encode`] percent-encodes them into
//! the final body string.
//!
//! # Example
//!
//! ```
//! use shipkit_core::{Params, ParamValue, encode, flatten};
//!
//! let params = Params::new().with("foo", "bar").with("baz", "qux");
//! let pairs = flatten(&ParamValue::Map(params), "parent");
//! assert_eq!(encode(&pairs), "parent%5Bfoo%5D=bar&parent%5Bbaz%5D=qux");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// A flattened `(key, value)` pair, e.g. `("parent[foo]", "bar")`.
pub type FlatParam = (String, String);

/// Everything but the RFC 3986 unreserved characters gets escaped.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const BODY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Values
// ============================================================================

/// A value that can be flattened into form parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Absent value, never emitted.
    Null,
    /// String scalar.
    Str(String),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    UInt(u64),
    /// Finite floating point scalar, rendered with the shortest round-trip digits.
    Float(f64),
    /// Boolean scalar, rendered as `true` / `false`.
    Bool(bool),
    /// Date and time, with the offset it was created with.
    DateTime(DateTime<FixedOffset>),
    /// Nested mapping (also the rendering of a nested object).
    Map(Params),
    /// List of nested mappings or objects.
    ObjectList(Vec<Params>),
    /// List of string scalars.
    StrList(Vec<String>),
}

impl ParamValue {
    /// Returns `true` for [`ParamValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String rendering of a scalar, `None` for null, date and structured values.
    #[must_use]
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Self::Str(value) => Some(value.clone()),
            Self::Int(value) => Some(value.to_string()),
            Self::UInt(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            // Always lowercase `true` / `false`, the API accepts either case
            Self::Bool(value) => Some(value.to_string()),
            Self::Null
            | Self::DateTime(_)
            | Self::Map(_)
            | Self::ObjectList(_)
            | Self::StrList(_) => None,
        }
    }
}

// ============================================================================
// Ordered mapping
// ============================================================================

/// An ordered mapping from wire names to [`ParamValue`]s.
///
/// Iteration follows insertion order. Inserting a key that already exists
/// replaces the value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty mapping with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToParamValue) {
        self.insert_value(key.into(), value.to_param_value());
    }

    /// Inserts an already converted value.
    pub fn insert_value(&mut self, key: String, value: ParamValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToParamValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts every entry of `other`, in order.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.insert_value(key, value);
        }
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert_value(key.into(), value);
        }
        params
    }
}

// ============================================================================
// Conversion traits
// ============================================================================

/// Types that render themselves as an ordered [`Params`] mapping.
///
/// The mapping is rebuilt on every call. Derive it with `#[derive(Params)]`,
/// which also implements [`ToParamValue`] and [`ParamListItem`] so the type can
/// be nested in other objects and in lists.
pub trait ToParams {
    /// Render the fields as wire-name → value pairs, in declaration order.
    fn to_params(&self) -> Params;
}

impl ToParams for Params {
    fn to_params(&self) -> Params {
        self.clone()
    }
}

/// Conversion of a single field value into a [`ParamValue`].
pub trait ToParamValue {
    /// Convert to a [`ParamValue`].
    fn to_param_value(&self) -> ParamValue;
}

/// Element types allowed inside a list value.
///
/// Strings produce [`ParamValue::StrList`], objects and mappings produce
/// [`ParamValue::ObjectList`]. Lists of any other element type are rejected at
/// compile time.
pub trait ParamListItem: Sized {
    /// Convert a slice of items into a list value.
    fn list_value(items: &[Self]) -> ParamValue;
}

impl ToParamValue for ParamValue {
    fn to_param_value(&self) -> ParamValue {
        self.clone()
    }
}

impl<T: ToParamValue + ?Sized> ToParamValue for &T {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl<T: ToParamValue> ToParamValue for Option<T> {
    fn to_param_value(&self) -> ParamValue {
        self.as_ref()
            .map_or(ParamValue::Null, ToParamValue::to_param_value)
    }
}

impl ToParamValue for str {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.to_owned())
    }
}

impl ToParamValue for String {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Str(self.clone())
    }
}

impl ToParamValue for bool {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Bool(*self)
    }
}

macro_rules! impl_to_param_value {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl ToParamValue for $ty {
                fn to_param_value(&self) -> ParamValue {
                    ParamValue::$variant(<$target>::from(*self))
                }
            }
        )+
    };
}

impl_to_param_value!(Int as i64: i8, i16, i32, i64);
impl_to_param_value!(UInt as u64: u8, u16, u32, u64);

// NaN and infinities have no wire form, they are treated as absent
impl ToParamValue for f64 {
    fn to_param_value(&self) -> ParamValue {
        if self.is_finite() {
            ParamValue::Float(*self)
        } else {
            ParamValue::Null
        }
    }
}

impl ToParamValue for f32 {
    fn to_param_value(&self) -> ParamValue {
        f64::from(*self).to_param_value()
    }
}

impl<Tz: TimeZone> ToParamValue for DateTime<Tz> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::DateTime(self.fixed_offset())
    }
}

impl ToParamValue for NaiveDate {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::DateTime(self.and_time(NaiveTime::MIN).and_utc().fixed_offset())
    }
}

impl ToParamValue for Params {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Map(self.clone())
    }
}

/// Keyed values such as carrier credentials, in key order.
impl<V: ToParamValue> ToParamValue for BTreeMap<String, V> {
    fn to_param_value(&self) -> ParamValue {
        let mut params = Params::with_capacity(self.len());
        for (key, value) in self {
            params.insert(key.clone(), value);
        }
        ParamValue::Map(params)
    }
}

impl<T: ParamListItem> ToParamValue for [T] {
    fn to_param_value(&self) -> ParamValue {
        T::list_value(self)
    }
}

impl<T: ParamListItem> ToParamValue for Vec<T> {
    fn to_param_value(&self) -> ParamValue {
        T::list_value(self)
    }
}

impl ParamListItem for String {
    fn list_value(items: &[Self]) -> ParamValue {
        ParamValue::StrList(items.to_vec())
    }
}

impl ParamListItem for &str {
    fn list_value(items: &[Self]) -> ParamValue {
        ParamValue::StrList(items.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl ParamListItem for Params {
    fn list_value(items: &[Self]) -> ParamValue {
        ParamValue::ObjectList(items.to_vec())
    }
}

// ============================================================================
// Flattening
// ============================================================================

/// Flatten a value into bracket-indexed pairs.
///
/// Mapping entries are visited in insertion order; list elements get their
/// index nested inside the list's own key (`parent[items][0][name]`). Null
/// values produce nothing.
#[must_use]
pub fn flatten(value: &ParamValue, prefix: &str) -> Vec<FlatParam> {
    let mut pairs = Vec::new();
    flatten_into(value, prefix, &mut pairs);
    pairs
}

/// Flatten an object under `prefix`, e.g. `address[street1]`.
#[must_use]
pub fn flatten_params(params: &Params, prefix: &str) -> Vec<FlatParam> {
    let mut pairs = Vec::new();
    flatten_map(params, prefix, &mut pairs);
    pairs
}

/// Flatten a list of mappings passed directly, e.g. `shipments[0][id]`.
#[must_use]
pub fn flatten_list(items: &[Params], prefix: &str) -> Vec<FlatParam> {
    let mut pairs = Vec::new();
    for (index, item) in items.iter().enumerate() {
        flatten_map(item, &child_key(prefix, &index.to_string()), &mut pairs);
    }
    pairs
}

fn flatten_into(value: &ParamValue, key: &str, pairs: &mut Vec<FlatParam>) {
    match value {
        ParamValue::Null => {}
        ParamValue::Map(params) => flatten_map(params, key, pairs),
        ParamValue::ObjectList(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_map(item, &child_key(key, &index.to_string()), pairs);
            }
        }
        ParamValue::StrList(items) => {
            for (index, item) in items.iter().enumerate() {
                pairs.push((child_key(key, &index.to_string()), item.clone()));
            }
        }
        ParamValue::DateTime(datetime) => {
            pairs.push((key.to_owned(), format_body_datetime(datetime)));
        }
        ParamValue::Str(_)
        | ParamValue::Int(_)
        | ParamValue::UInt(_)
        | ParamValue::Float(_)
        | ParamValue::Bool(_) => {
            if let Some(scalar) = value.scalar_string() {
                pairs.push((key.to_owned(), scalar));
            }
        }
    }
}

fn flatten_map(params: &Params, prefix: &str, pairs: &mut Vec<FlatParam>) {
    for (key, value) in params.iter() {
        flatten_into(value, &child_key(prefix, key), pairs);
    }
}

fn child_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}[{key}]")
    }
}

/// Body date format: always UTC with a `Z` suffix.
#[must_use]
pub fn format_body_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime
        .with_timezone(&Utc)
        .format(BODY_DATETIME_FORMAT)
        .to_string()
}

/// Query date format: a bare date at midnight, otherwise RFC 3339 keeping the offset.
#[must_use]
pub fn format_query_datetime(datetime: &DateTime<FixedOffset>) -> String {
    if datetime.time() == NaiveTime::MIN {
        datetime.format(QUERY_DATE_FORMAT).to_string()
    } else {
        datetime.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Percent-encode pairs into an `application/x-www-form-urlencoded` body.
///
/// Keys and values are escaped independently (brackets and spaces included)
/// and joined with `=` and `&`.
#[must_use]
pub fn encode(pairs: &[FlatParam]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_ENCODE_SET),
                utf8_percent_encode(value, FORM_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Query-string pairs for the top-level entries of `params`.
///
/// Null entries are skipped and dates use [`format_query_datetime`]. Nested
/// values are flattened under their key with the body rules.
#[must_use]
pub fn to_query_pairs(params: &Params) -> Vec<FlatParam> {
    let mut pairs = Vec::new();
    for (key, value) in params.iter() {
        match value {
            ParamValue::Null => {}
            ParamValue::DateTime(datetime) => {
                pairs.push((key.to_owned(), format_query_datetime(datetime)));
            }
            ParamValue::Map(_) | ParamValue::ObjectList(_) | ParamValue::StrList(_) => {
                flatten_into(value, key, &mut pairs);
            }
            ParamValue::Str(_)
            | ParamValue::Int(_)
            | ParamValue::UInt(_)
            | ParamValue::Float(_)
            | ParamValue::Bool(_) => {
                if let Some(scalar) = value.scalar_string() {
                    pairs.push((key.to_owned(), scalar));
                }
            }
        }
    }
    pairs
}
