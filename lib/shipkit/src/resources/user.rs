//! Users, child users and their API keys.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ObjectMeta;
use crate::api::require_id;
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// An account holder, or a child user of one.
///
/// Money amounts are kept as the decimal strings the API uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Params)]
#[serde(default)]
pub struct User {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Parent user, `None` for top-level users.
    #[params(skip)]
    pub parent_id: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// New password, only sent.
    #[serde(skip_deserializing)]
    pub password: Option<String>,
    /// Confirmation of `password`, only sent.
    #[serde(skip_deserializing)]
    pub password_confirmation: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Current balance, e.g. `"10.00000"`.
    #[params(skip)]
    pub balance: Option<String>,
    /// Primary recharge amount in USD.
    pub recharge_amount: Option<String>,
    /// Secondary recharge amount in USD.
    pub secondary_recharge_amount: Option<String>,
    /// Balance in cents below which the account is recharged.
    pub recharge_threshold: Option<String>,
    /// Price charged per shipment.
    #[params(skip)]
    pub price_per_shipment: Option<String>,
    /// Child users.
    #[params(skip)]
    pub children: Vec<User>,
    /// API keys of the user.
    #[params(skip)]
    pub api_keys: Vec<ApiKey>,
}

/// One API key of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    /// Key value.
    pub key: Option<String>,
    /// `test` or `production`.
    pub mode: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a user, or the user owning the API key when `id` is `None`.
    pub async fn get_user(&self, id: Option<&str>) -> Result<User> {
        let request = match id {
            Some(id) => ApiRequest::get("users").segment(id),
            None => ApiRequest::get("users"),
        };
        self.send(request).await
    }

    /// Create a child user named `name`.
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let request = ApiRequest::post("users").body_params("user", &Params::new().with("name", name));
        self.send(request).await
    }

    /// Update a user with the fields set on `user`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingField`] if the user has no id.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let id = require_id(user.meta.id.as_deref(), "user")?;
        self.send(ApiRequest::put("users").segment(id).body("user", user))
            .await
    }

    /// Delete a child user.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.send_empty(ApiRequest::delete("users").segment(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ToParams, flatten_params};

    use super::*;

    #[test]
    fn update_sends_editable_fields_only() {
        let user = User {
            meta: ObjectMeta::with_id("user_1"),
            name: Some("Jane Doe".to_string()),
            recharge_threshold: Some("5000".to_string()),
            balance: Some("10.00000".to_string()),
            children: vec![User::default()],
            ..User::default()
        };

        let keys: Vec<_> = flatten_params(&user.to_params(), "user")
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["user[id]", "user[name]", "user[recharge_threshold]"]);
    }

    #[test]
    fn user_deserializes_children_and_keys() {
        let raw = r#"{
            "id": "user_1",
            "object": "User",
            "parent_id": null,
            "name": "Jane Doe",
            "balance": "10.00000",
            "password": "never-returned",
            "children": [{"id": "user_2", "object": "User", "parent_id": "user_1", "children": []}],
            "api_keys": [{"object": "ApiKey", "key": "sk_test_1", "mode": "test", "created_at": "2024-01-01T00:00:00Z"}]
        }"#;
        let user: User = serde_json::from_str(raw).expect("deserialize");

        assert_eq!(user.password, None);
        assert_eq!(user.children[0].parent_id.as_deref(), Some("user_1"));
        assert_eq!(user.api_keys[0].mode.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn update_without_id_fails_without_request() {
        let client = ShippingClient::new("sk_test").expect("client");
        let err = client
            .update_user(&User::default())
            .await
            .expect_err("no id");

        assert!(matches!(err, Error::MissingField { resource: "user", field: "id" }));
    }
}
