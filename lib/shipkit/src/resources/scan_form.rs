//! Scan forms: one manifest scanned by the carrier in place of each package.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::batch::id_list;
use super::{Address, ObjectMeta};
use crate::api::require_id;
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient, ToParams};

/// A manifest carriers scan once instead of each package.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanForm {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Generation status: `creating`, `created` or `failed`.
    pub status: Option<String>,
    /// Failure explanation.
    pub message: Option<String>,
    /// Origin address.
    pub address: Option<Address>,
    /// Tracking codes listed on the form.
    pub tracking_codes: Vec<String>,
    /// Download URL.
    pub form_url: Option<String>,
    /// File type of `form_url`.
    pub form_file_type: Option<String>,
    /// Batch the form was generated for.
    pub batch_id: Option<String>,
}

/// Filters for [`ShippingClient::list_scan_forms`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Params)]
pub struct ScanFormListOptions {
    /// Only forms created before this id.
    pub before_id: Option<String>,
    /// Only forms created after this id.
    pub after_id: Option<String>,
    /// Only forms created at or after this time.
    pub start_datetime: Option<DateTime<Utc>>,
    /// Only forms created before this time.
    pub end_datetime: Option<DateTime<Utc>>,
    /// Page size.
    pub page_size: Option<u32>,
}

/// One page of scan forms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanFormList {
    /// Scan forms, newest first.
    pub scan_forms: Vec<ScanForm>,
    /// Whether an older page exists.
    pub has_more: bool,
    /// Filters that produced this page.
    #[serde(skip)]
    pub options: Option<ScanFormListOptions>,
}

impl ScanFormList {
    /// Fetch the page after this one with the same filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when this page is empty or its last
    /// form has no id.
    pub async fn next_page<C: HttpClient>(&self, client: &ShippingClient<C>) -> Result<Self> {
        let last = self
            .scan_forms
            .last()
            .ok_or(Error::missing_field("scan_form_list", "scan_forms"))?;
        let before_id = require_id(last.meta.id.as_deref(), "scan_form")?;

        let mut options = self.options.clone().unwrap_or_default();
        options.before_id = Some(before_id.to_string());
        client.list_scan_forms(Some(&options)).await
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a scan form.
    pub async fn get_scan_form(&self, id: &str) -> Result<ScanForm> {
        self.send(ApiRequest::get("scan_forms").segment(id)).await
    }

    /// List scan forms, newest first.
    pub async fn list_scan_forms(
        &self,
        options: Option<&ScanFormListOptions>,
    ) -> Result<ScanFormList> {
        let mut request = ApiRequest::get("scan_forms");
        if let Some(options) = options {
            request = request.query_params(&options.to_params());
        }

        let mut list: ScanFormList = self.send(request).await?;
        list.options = options.cloned();
        Ok(list)
    }

    /// Create a scan form for purchased shipments, by id.
    pub async fn create_scan_form<S: AsRef<str>>(&self, shipment_ids: &[S]) -> Result<ScanForm> {
        let request = ApiRequest::post("scan_forms").body_list("shipments", &id_list(shipment_ids));
        self.send(request).await
    }
}
