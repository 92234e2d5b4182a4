//! Carrier rates quoted for a shipment.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ObjectMeta;
use super::meta::lenient_f64;
use crate::{ApiRequest, HttpClient, Result, ShippingClient};

/// A price quoted by a carrier for one service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rate {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Service level, e.g. `Priority`.
    pub service: Option<String>,
    /// Carrier name, e.g. `USPS`.
    pub carrier: Option<String>,
    /// Carrier account the rate was quoted from.
    pub carrier_account_id: Option<String>,
    /// Shipment the rate belongs to.
    pub shipment_id: Option<String>,
    /// Negotiated price.
    #[serde(deserialize_with = "lenient_f64")]
    pub rate: Option<f64>,
    /// Currency of `rate`.
    pub currency: Option<String>,
    /// Retail price.
    #[serde(deserialize_with = "lenient_f64")]
    pub retail_rate: Option<f64>,
    /// Currency of `retail_rate`.
    pub retail_currency: Option<String>,
    /// Published list price.
    #[serde(deserialize_with = "lenient_f64")]
    pub list_rate: Option<f64>,
    /// Currency of `list_rate`.
    pub list_currency: Option<String>,
    /// Days in transit.
    pub delivery_days: Option<u32>,
    /// Expected delivery date.
    pub delivery_date: Option<DateTime<Utc>>,
    /// Whether the carrier guarantees `delivery_date`.
    pub delivery_date_guaranteed: Option<bool>,
    /// Estimated days in transit.
    pub est_delivery_days: Option<u32>,
}

/// Carrier and service restrictions used to pick a rate.
///
/// An include list, when set, keeps only matching rates; an exclude list drops
/// matching rates. Names are compared exactly.
///
/// # Example
///
/// ```
/// use shipkit::resources::RateFilter;
///
/// let filter = RateFilter::new()
///     .include_carriers(["USPS", "UPS"])
///     .exclude_services(["ParcelSelect"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateFilter {
    include_carriers: Option<Vec<String>>,
    include_services: Option<Vec<String>>,
    exclude_carriers: Option<Vec<String>>,
    exclude_services: Option<Vec<String>>,
}

fn to_list<I, S>(names: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(names.into_iter().map(Into::into).collect())
}

fn listed(list: Option<&Vec<String>>, name: Option<&str>) -> bool {
    name.is_some_and(|name| list.is_some_and(|list| list.iter().any(|item| item == name)))
}

impl RateFilter {
    /// A filter accepting every rate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only rates from these carriers.
    #[must_use]
    pub fn include_carriers<I, S>(mut self, carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_carriers = to_list(carriers);
        self
    }

    /// Keep only rates for these services.
    #[must_use]
    pub fn include_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_services = to_list(services);
        self
    }

    /// Drop rates from these carriers.
    #[must_use]
    pub fn exclude_carriers<I, S>(mut self, carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_carriers = to_list(carriers);
        self
    }

    /// Drop rates for these services.
    #[must_use]
    pub fn exclude_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_services = to_list(services);
        self
    }

    /// Whether `rate` passes every restriction.
    #[must_use]
    pub fn accepts(&self, rate: &Rate) -> bool {
        let carrier = rate.carrier.as_deref();
        let service = rate.service.as_deref();

        (self.include_carriers.is_none() || listed(self.include_carriers.as_ref(), carrier))
            && (self.include_services.is_none() || listed(self.include_services.as_ref(), service))
            && !listed(self.exclude_carriers.as_ref(), carrier)
            && !listed(self.exclude_services.as_ref(), service)
    }

    /// Cheapest accepted rate. Rates without a price are ignored.
    pub fn lowest<'a>(&self, rates: impl IntoIterator<Item = &'a Rate>) -> Option<&'a Rate> {
        rates
            .into_iter()
            .filter(|rate| rate.rate.is_some() && self.accepts(rate))
            .min_by(|a, b| a.rate.unwrap_or_default().total_cmp(&b.rate.unwrap_or_default()))
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a rate.
    pub async fn get_rate(&self, id: &str) -> Result<Rate> {
        self.send(ApiRequest::get("rates").segment(id)).await
    }
}
