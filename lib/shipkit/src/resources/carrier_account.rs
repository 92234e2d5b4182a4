//! Carrier accounts and the carrier types they can be created from.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::ObjectMeta;
use crate::api::{ensure_not_created, require_id};
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// A carrier account linked to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Params)]
#[serde(default)]
pub struct CarrierAccount {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Carrier type, e.g. `UpsAccount`.
    pub r#type: Option<String>,
    /// Label to tell accounts apart.
    pub description: Option<String>,
    /// Display name of the carrier type.
    #[params(skip)]
    pub readable: Option<String>,
    /// Production credentials, by field name.
    pub credentials: Option<BTreeMap<String, String>>,
    /// Test credentials, by field name.
    pub test_credentials: Option<BTreeMap<String, String>>,
}

/// A carrier integration and the fields needed to link an account of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarrierType {
    /// Object type name.
    pub object: Option<String>,
    /// Account type, e.g. `UpsAccount`.
    pub r#type: Option<String>,
    /// Display name.
    pub readable: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
    /// Fields to fill when creating an account.
    pub fields: CarrierFields,
}

/// Account creation requirements of a [`CarrierType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarrierFields {
    /// No credentials needed when set.
    pub auto_link: Option<bool>,
    /// Creation needs steps outside this API when set.
    pub custom_workflow: Option<bool>,
    /// Production credential fields.
    pub credentials: BTreeMap<String, CredentialField>,
    /// Test credential fields.
    pub test_credentials: BTreeMap<String, CredentialField>,
}

/// How to render and store one credential field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CredentialField {
    /// `visible`, `checkbox`, `fake`, `password` or `masked`.
    pub visibility: Option<String>,
    /// Form label.
    pub label: Option<String>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// List the user's carrier accounts.
    pub async fn list_carrier_accounts(&self) -> Result<Vec<CarrierAccount>> {
        self.send(ApiRequest::get("carrier_accounts")).await
    }

    /// Retrieve a carrier account.
    pub async fn get_carrier_account(&self, id: &str) -> Result<CarrierAccount> {
        self.send(ApiRequest::get("carrier_accounts").segment(id))
            .await
    }

    /// Link a carrier account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceAlreadyCreated`] if the account has an id.
    pub async fn create_carrier_account(&self, account: &CarrierAccount) -> Result<CarrierAccount> {
        ensure_not_created(account.meta.id.as_deref(), "carrier_account")?;
        self.send(ApiRequest::post("carrier_accounts").body("carrier_account", account))
            .await
    }

    /// Update a carrier account with the fields set on `account`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingField`] if the account has no id.
    pub async fn update_carrier_account(&self, account: &CarrierAccount) -> Result<CarrierAccount> {
        let id = require_id(account.meta.id.as_deref(), "carrier_account")?;
        let request = ApiRequest::put("carrier_accounts")
            .segment(id)
            .body("carrier_account", account);
        self.send(request).await
    }

    /// Unlink a carrier account.
    pub async fn delete_carrier_account(&self, id: &str) -> Result<()> {
        self.send_empty(ApiRequest::delete("carrier_accounts").segment(id))
            .await
    }

    /// List every carrier type. The response is a bare array.
    pub async fn list_carrier_types(&self) -> Result<Vec<CarrierType>> {
        self.send(ApiRequest::get("carrier_types")).await
    }
}
