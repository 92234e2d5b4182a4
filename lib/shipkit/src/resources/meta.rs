//! Metadata shared by every API object, and lenient field decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::Params;

/// Common fields carried by every API object.
///
/// Flattened into each resource, both on the wire and in serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Params)]
#[serde(default)]
pub struct ObjectMeta {
    /// Unique identifier, absent until the object is created.
    pub id: Option<String>,
    /// Object type name, e.g. `Address`.
    pub object: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// `test` or `production`.
    pub mode: Option<String>,
    /// Caller supplied reference.
    pub reference: Option<String>,
}

impl ObjectMeta {
    /// Metadata holding only an id, to reference an existing object.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Metadata holding only a reference.
    #[must_use]
    pub fn with_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// Decode an amount the API may send as a JSON number or a numeric string.
///
/// Empty strings and `null` decode as `None`.
pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
