//! Carrier pickups for purchased shipments.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Address, CarrierAccount, ObjectMeta, Rate, RateFilter, Shipment};
use crate::api::ensure_not_created;
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient};

/// A request for a carrier to collect packages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct Pickup {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// `unknown`, `scheduled` or `canceled`.
    #[params(skip)]
    pub status: Option<String>,
    /// Name of the pickup.
    pub name: Option<String>,
    /// Earliest time the packages are ready.
    pub min_datetime: Option<DateTime<Utc>>,
    /// Latest time the packages are ready, after `min_datetime`.
    pub max_datetime: Option<DateTime<Utc>>,
    /// Whether `address` is the account's address.
    pub is_account_address: Option<bool>,
    /// Directions for the driver.
    pub instructions: Option<String>,
    /// Carrier errors raised while rating.
    #[params(skip)]
    pub messages: Option<Vec<String>>,
    /// Carrier confirmation number, once bought.
    #[params(skip)]
    pub confirmation: Option<String>,
    /// Shipment to collect.
    pub shipment: Option<Shipment>,
    /// Where to collect.
    pub address: Option<Address>,
    /// Rate with these carrier accounts only, all when empty.
    pub carrier_accounts: Option<Vec<CarrierAccount>>,
    /// One rate per carrier and pickup service.
    #[params(skip)]
    pub pickup_rates: Option<Vec<Rate>>,
}

impl Pickup {
    /// Cheapest pickup rate accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when the pickup carries no rates.
    pub fn lowest_rate(&self, filter: &RateFilter) -> Result<Option<&Rate>> {
        let rates = self
            .pickup_rates
            .as_ref()
            .ok_or(Error::missing_field("pickup", "pickup_rates"))?;
        Ok(filter.lowest(rates))
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a pickup.
    pub async fn get_pickup(&self, id: &str) -> Result<Pickup> {
        self.send(ApiRequest::get("pickups").segment(id)).await
    }

    /// Create a pickup and rate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceAlreadyCreated`] if the pickup has an id.
    pub async fn create_pickup(&self, pickup: &Pickup) -> Result<Pickup> {
        ensure_not_created(pickup.meta.id.as_deref(), "pickup")?;
        self.send(ApiRequest::post("pickups").body("pickup", pickup))
            .await
    }

    /// Schedule the pickup with `carrier` and `service`.
    pub async fn buy_pickup(&self, id: &str, carrier: &str, service: &str) -> Result<Pickup> {
        let body = Params::new()
            .with("carrier", carrier)
            .with("service", service);
        let request = ApiRequest::post("pickups")
            .segment(id)
            .segment("buy")
            .body_params("", &body);
        self.send(request).await
    }

    /// Cancel a scheduled pickup.
    pub async fn cancel_pickup(&self, id: &str) -> Result<Pickup> {
        self.send(ApiRequest::post("pickups").segment(id).segment("cancel"))
            .await
    }
}
