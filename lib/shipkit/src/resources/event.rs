//! Events: notifications about changes to other objects, also delivered to webhooks.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ObjectMeta;
use crate::{ApiRequest, HttpClient, Result, ShippingClient};

/// A change notification.
///
/// `result` holds the object the event is about, its `object` key names its type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Event name, e.g. `tracker.updated`.
    pub description: Option<String>,
    /// Previous values of the changed attributes.
    pub previous_attributes: Option<Map<String, Value>>,
    /// The object the event is about.
    pub result: Option<Value>,
    /// `completed`, `failed`, `in_queue` or `retrying`.
    pub status: Option<String>,
    /// Webhook URLs not yet notified.
    pub pending_urls: Vec<String>,
    /// Webhook URLs already notified.
    pub completed_urls: Vec<String>,
}

impl Event {
    /// Decode a webhook delivery body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonParse`] or [`crate::Error::JsonDeserialization`]
    /// when the body is not an event.
    pub fn from_webhook_body(body: &[u8]) -> Result<Self> {
        crate::deserialize(body, None)
    }

    /// Object type of `result`, e.g. `Tracker`.
    #[must_use]
    pub fn result_object(&self) -> Option<&str> {
        self.result.as_ref()?.get("object")?.as_str()
    }

    /// Decode `result` into a typed object such as a [`super::Tracker`].
    ///
    /// Returns `None` when the event has no result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] when `result` does not fit `T`.
    pub fn result_as<T: serde::de::DeserializeOwned>(&self) -> Result<Option<T>> {
        self.result.clone().map(crate::from_value::<T>).transpose()
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve an event.
    pub async fn get_event(&self, id: &str) -> Result<Event> {
        self.send(ApiRequest::get("events").segment(id)).await
    }
}
