//! Package tracking.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Fee, ObjectMeta};
use crate::api::require_id;
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient, ToParams};

/// Tracking state of one package.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tracker {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Carrier tracking code.
    pub tracking_code: Option<String>,
    /// Status, e.g. `in_transit` or `delivered`.
    pub status: Option<String>,
    /// Who signed for the package.
    pub signed_by: Option<String>,
    /// Weight reported by the carrier, in ounces.
    pub weight: Option<f64>,
    /// Estimated delivery.
    pub est_delivery_date: Option<DateTime<Utc>>,
    /// Shipment the tracker belongs to.
    pub shipment_id: Option<String>,
    /// Carrier name.
    pub carrier: Option<String>,
    /// Scan events, oldest first.
    pub tracking_details: Vec<TrackingDetail>,
    /// Carrier specific details.
    pub carrier_detail: Option<CarrierDetail>,
    /// Public tracking page.
    pub public_url: Option<String>,
    /// Fees charged for tracking.
    pub fees: Vec<Fee>,
    /// Last time the carrier reported.
    pub tracking_updated_at: Option<DateTime<Utc>>,
}

/// One scan event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingDetail {
    /// Carrier description.
    pub message: Option<String>,
    /// Status after the event.
    pub status: Option<String>,
    /// When it happened.
    pub datetime: Option<DateTime<Utc>>,
    /// Event source.
    pub source: Option<String>,
    /// Where it happened.
    pub tracking_location: Option<TrackingLocation>,
}

/// Location of a scan event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TrackingLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// Carrier specific tracking details.
///
/// Local dates are kept as the carrier sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CarrierDetail {
    pub guaranteed_delivery_date: Option<DateTime<Utc>>,
    pub origin_location: Option<String>,
    pub destination_location: Option<String>,
    pub service: Option<String>,
    pub container_type: Option<String>,
    pub est_delivery_date_local: Option<String>,
    pub est_delivery_time_local: Option<String>,
}

/// Filters for [`ShippingClient::list_trackers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Params)]
pub struct TrackerListOptions {
    /// Only trackers for this code.
    pub tracking_code: Option<String>,
    /// Only trackers for this carrier.
    pub carrier: Option<String>,
    /// Only trackers created before this id.
    pub before_id: Option<String>,
    /// Only trackers created after this id.
    pub after_id: Option<String>,
    /// Only trackers created at or after this time.
    pub start_datetime: Option<DateTime<Utc>>,
    /// Only trackers created before this time.
    pub end_datetime: Option<DateTime<Utc>>,
    /// Page size.
    pub page_size: Option<u32>,
}

/// One page of trackers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerList {
    /// Trackers, newest first.
    pub trackers: Vec<Tracker>,
    /// Whether an older page exists.
    pub has_more: bool,
    /// Filters that produced this page.
    #[serde(skip)]
    pub options: Option<TrackerListOptions>,
}

impl TrackerList {
    /// Fetch the page after this one with the same filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when this page is empty or its last
    /// tracker has no id.
    pub async fn next_page<C: HttpClient>(&self, client: &ShippingClient<C>) -> Result<Self> {
        let last = self
            .trackers
            .last()
            .ok_or(Error::missing_field("tracker_list", "trackers"))?;
        let before_id = require_id(last.meta.id.as_deref(), "tracker")?;

        let mut options = self.options.clone().unwrap_or_default();
        options.before_id = Some(before_id.to_string());
        client.list_trackers(Some(&options)).await
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Start tracking `tracking_code` with `carrier`.
    pub async fn create_tracker(&self, carrier: &str, tracking_code: &str) -> Result<Tracker> {
        let tracker = Params::new()
            .with("tracking_code", tracking_code)
            .with("carrier", carrier);
        self.send(ApiRequest::post("trackers").body_params("tracker", &tracker))
            .await
    }

    /// Retrieve a tracker.
    pub async fn get_tracker(&self, id: &str) -> Result<Tracker> {
        self.send(ApiRequest::get("trackers").segment(id)).await
    }

    /// List trackers, newest first.
    pub async fn list_trackers(&self, options: Option<&TrackerListOptions>) -> Result<TrackerList> {
        let mut request = ApiRequest::get("trackers");
        if let Some(options) = options {
            request = request.query_params(&options.to_params());
        }

        let mut list: TrackerList = self.send(request).await?;
        list.options = options.cloned();
        Ok(list)
    }
}
