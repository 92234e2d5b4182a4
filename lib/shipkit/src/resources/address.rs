//! Addresses and address verification.

use serde::Deserialize;

use super::ObjectMeta;
use crate::api::{ensure_not_created, require_id};
use crate::{ApiRequest, FieldError, HttpClient, Params, Result, ShippingClient};

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct Address {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// First street line.
    pub street1: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// ISO 3166 country code.
    pub country: Option<String>,
    /// Whether the address is residential.
    pub residential: Option<bool>,
    /// Carrier facility code, for pickups at a facility.
    pub carrier_facility: Option<String>,
    /// Recipient name.
    pub name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Federal tax identifier.
    pub federal_tax_id: Option<String>,
    /// State tax identifier.
    pub state_tax_id: Option<String>,
    /// Verification results, filled in by the API.
    #[params(skip)]
    pub verifications: Option<Verifications>,
}

/// Results of the verifications requested at creation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Verifications {
    /// ZIP+4 verification.
    pub zip4: Option<Verification>,
    /// Deliverability verification.
    pub delivery: Option<Verification>,
}

/// Outcome of one verification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Verification {
    /// Whether the verification passed.
    pub success: bool,
    /// Reasons for a failed verification.
    pub errors: Vec<FieldError>,
    /// Location details on success.
    pub details: Option<VerificationDetails>,
}

/// Geolocation of a verified address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerificationDetails {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Verification to run when creating an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verify {
    /// Check deliverability, report failures in `verifications`.
    Delivery,
    /// Check the ZIP+4 code, report failures in `verifications`.
    Zip4,
    /// Check deliverability, reject the address on failure.
    DeliveryStrict,
    /// Check the ZIP+4 code, reject the address on failure.
    Zip4Strict,
}

impl Verify {
    /// Query pair requesting this verification.
    #[must_use]
    pub fn query_pair(self) -> (String, String) {
        let (key, value) = match self {
            Self::Delivery => ("verify[]", "delivery"),
            Self::Zip4 => ("verify[]", "zip4"),
            Self::DeliveryStrict => ("verify_strict[]", "delivery"),
            Self::Zip4Strict => ("verify_strict[]", "zip4"),
        };
        (key.to_string(), value.to_string())
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve an address.
    pub async fn get_address(&self, id: &str) -> Result<Address> {
        self.send(ApiRequest::get("addresses").segment(id)).await
    }

    /// Create an address, running the requested verifications.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceAlreadyCreated`] if the address has an id.
    pub async fn create_address(&self, address: &Address, verify: &[Verify]) -> Result<Address> {
        ensure_not_created(address.meta.id.as_deref(), "address")?;

        let request = ApiRequest::post("addresses")
            .body("address", address)
            .query_pairs(verify.iter().map(|v| v.query_pair()));
        self.send(request).await
    }

    /// Verify an address, creating it first when it has no id.
    pub async fn verify_address(&self, address: &Address, carrier: Option<&str>) -> Result<Address> {
        let created;
        let address = if address.meta.id.is_some() {
            address
        } else {
            created = self.create_address(address, &[]).await?;
            &created
        };
        let id = require_id(address.meta.id.as_deref(), "address")?;

        let request = ApiRequest::get("addresses")
            .segment(id)
            .segment("verify")
            .root("address")
            .query("carrier", carrier);
        self.send(request).await
    }
}
