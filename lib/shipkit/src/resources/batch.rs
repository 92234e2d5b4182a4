//! Batches: buying and printing many shipments at once.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ObjectMeta, ScanForm, Shipment};
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// A group of shipments bought and printed together.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Batch {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Processing state, e.g. `created` or `purchased`.
    pub state: Option<String>,
    /// Number of shipments.
    pub num_shipments: Option<u32>,
    /// Shipments and their state inside the batch.
    pub shipments: Vec<BatchShipment>,
    /// Shipment count per status.
    pub status: BTreeMap<String, u32>,
    /// Combined label, once generated.
    pub label_url: Option<String>,
    /// Scan form, once generated.
    pub scan_form: Option<ScanForm>,
}

/// A shipment as listed in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchShipment {
    /// Shipment id.
    pub id: Option<String>,
    /// Status inside the batch.
    pub batch_status: Option<String>,
    /// Processing message.
    pub batch_message: Option<String>,
}

pub(super) fn id_list<S: AsRef<str>>(ids: &[S]) -> Vec<Params> {
    ids.iter()
        .map(|id| Params::new().with("id", id.as_ref()))
        .collect()
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a batch.
    pub async fn get_batch(&self, id: &str) -> Result<Batch> {
        self.send(ApiRequest::get("batches").segment(id)).await
    }

    /// Create a batch, optionally with shipments and a reference.
    ///
    /// Shipments without an id are created along with the batch.
    pub async fn create_batch(
        &self,
        shipments: &[Shipment],
        reference: Option<&str>,
    ) -> Result<Batch> {
        let mut batch = Params::new().with("reference", reference);
        if !shipments.is_empty() {
            batch.insert("shipments", shipments);
        }
        self.send(ApiRequest::post("batches").body_params("batch", &batch))
            .await
    }

    /// Add existing shipments, by id.
    pub async fn add_shipments_to_batch<S: AsRef<str>>(
        &self,
        id: &str,
        shipment_ids: &[S],
    ) -> Result<Batch> {
        let request = ApiRequest::post("batches")
            .segment(id)
            .segment("add_shipments")
            .body_list("shipments", &id_list(shipment_ids));
        self.send(request).await
    }

    /// Remove shipments, by id.
    pub async fn remove_shipments_from_batch<S: AsRef<str>>(
        &self,
        id: &str,
        shipment_ids: &[S],
    ) -> Result<Batch> {
        let request = ApiRequest::post("batches")
            .segment(id)
            .segment("remove_shipments")
            .body_list("shipments", &id_list(shipment_ids));
        self.send(request).await
    }

    /// Buy labels for every shipment. The batch must be in the `created` state.
    pub async fn buy_batch(&self, id: &str) -> Result<Batch> {
        self.send(ApiRequest::post("batches").segment(id).segment("buy"))
            .await
    }

    /// Start generating one label file for the whole batch.
    ///
    /// `order_by` sorts the labels, e.g. `reference DESC`.
    pub async fn generate_batch_label(
        &self,
        id: &str,
        file_format: &str,
        order_by: Option<&str>,
    ) -> Result<Batch> {
        let body = Params::new()
            .with("file_format", file_format)
            .with("order_by", order_by);
        let request = ApiRequest::post("batches")
            .segment(id)
            .segment("label")
            .body_params("", &body);
        self.send(request).await
    }

    /// Start generating a scan form for the batch.
    pub async fn generate_batch_scan_form(&self, id: &str) -> Result<Batch> {
        self.send(ApiRequest::post("batches").segment(id).segment("scan_form"))
            .await
    }
}
