//! Webhook endpoints receiving event notifications.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ObjectMeta;
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// A registered webhook URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Webhook {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Notification target.
    pub url: Option<String>,
    /// Set when delivery was disabled after repeated failures.
    pub disabled_at: Option<DateTime<Utc>>,
}

/// All registered webhooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookList {
    /// Webhooks.
    pub webhooks: Vec<Webhook>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a webhook.
    pub async fn get_webhook(&self, id: &str) -> Result<Webhook> {
        self.send(ApiRequest::get("webhooks").segment(id)).await
    }

    /// List every webhook.
    pub async fn list_webhooks(&self) -> Result<WebhookList> {
        self.send(ApiRequest::get("webhooks")).await
    }

    /// Register `url` for notifications.
    pub async fn create_webhook(&self, url: &str) -> Result<Webhook> {
        let request =
            ApiRequest::post("webhooks").body_params("webhook", &Params::new().with("url", url));
        self.send(request).await
    }

    /// Re-enable a disabled webhook.
    pub async fn update_webhook(&self, id: &str) -> Result<Webhook> {
        self.send(ApiRequest::put("webhooks").segment(id)).await
    }

    /// Unregister a webhook.
    pub async fn delete_webhook(&self, id: &str) -> Result<()> {
        self.send_empty(ApiRequest::delete("webhooks").segment(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_list_deserializes() {
        let raw = r#"{"webhooks":[
            {"id":"hook_1","object":"Webhook","mode":"test","url":"https://example.com/hooks","disabled_at":null},
            {"id":"hook_2","object":"Webhook","mode":"test","url":"https://example.com/old","disabled_at":"2024-01-05T12:00:00Z"}
        ]}"#;
        let list: WebhookList = serde_json::from_str(raw).expect("deserialize");

        assert_eq!(list.webhooks.len(), 2);
        assert_eq!(list.webhooks[0].disabled_at, None);
        assert!(list.webhooks[1].disabled_at.is_some());
        assert_eq!(list.webhooks[1].meta.mode.as_deref(), Some("test"));
    }
}
