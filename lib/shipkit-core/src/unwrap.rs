//! Response unwrapping with an optional root element.
//!
//! Some endpoints wrap their payload in an envelope named after the resource
//! (`{"address": {...}}`), others return the object or list directly. The same
//! typed call handles both: when a root element is requested and present, its
//! value is deserialized, otherwise the whole payload is.

use derive_more::Display;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Name of the JSON key wrapping a response payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct RootElement(String);

impl RootElement {
    /// Create a new root element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RootElement {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for RootElement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deserialize a raw JSON body, unwrapping `root` when the payload carries it.
///
/// # Errors
///
/// Returns [`Error::JsonParse`] for malformed JSON and
/// [`Error::JsonDeserialization`] when the selected value does not fit `T`.
///
/// # Example
///
/// ```
/// use shipkit_core::deserialize;
///
/// #[derive(Debug, serde::Deserialize)]
/// struct Address { id: String }
///
/// let wrapped: Address = deserialize(br#"{"address":{"id":"adr_123"}}"#, Some("address")).unwrap();
/// let bare: Address = deserialize(br#"{"id":"adr_123"}"#, Some("address")).unwrap();
/// assert_eq!(wrapped.id, bare.id);
/// ```
pub fn deserialize<T: DeserializeOwned>(raw: &[u8], root: Option<&str>) -> Result<T> {
    let value: Value = serde_json::from_slice(raw).map_err(Error::JsonParse)?;
    from_value(select_root(value, root))
}

/// Pick the value under `root` if the payload is an object containing it.
fn select_root(value: Value, root: Option<&str>) -> Value {
    match (value, root) {
        (Value::Object(mut object), Some(root)) if !root.is_empty() => {
            match object.remove(root) {
                Some(inner) => inner,
                None => Value::Object(object),
            }
        }
        (value, _) => value,
    }
}

/// Deserialize an already parsed value, keeping the path of the failing field.
///
/// # Errors
///
/// Returns [`Error::JsonDeserialization`] when `value` does not fit `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value)
        .map_err(|e| Error::json_deserialization(e.path().to_string(), e.inner().to_string()))
}
