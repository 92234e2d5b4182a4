//! Shipments: rating, label purchase and listing.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::meta::lenient_f64;
use super::{Address, CustomsInfo, ObjectMeta, Parcel, Rate, RateFilter, ScanForm, Tracker};
use crate::api::{ensure_not_created, require_id};
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient, ToParams};

/// A shipment between two addresses.
///
/// Fields below `carrier_accounts` are filled in by the API and never sent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct Shipment {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Destination.
    pub to_address: Option<Address>,
    /// Origin.
    pub from_address: Option<Address>,
    /// Where returns go, defaults to `from_address`.
    pub return_address: Option<Address>,
    /// Buyer, when different from the recipient.
    pub buyer_address: Option<Address>,
    /// Package.
    pub parcel: Option<Parcel>,
    /// Customs declaration, for international shipments.
    pub customs_info: Option<CustomsInfo>,
    /// Additional carrier options.
    pub options: Option<ShipmentOptions>,
    /// Whether this is a return shipment.
    pub is_return: Option<bool>,
    /// Insured amount.
    #[serde(deserialize_with = "lenient_f64")]
    pub insurance: Option<f64>,
    /// Carrier to buy with when created inside a batch.
    pub carrier: Option<String>,
    /// Service to buy with when created inside a batch.
    pub service: Option<String>,
    /// Restrict rating to these carrier account ids.
    #[serde(skip_deserializing)]
    pub carrier_accounts: Option<Vec<String>>,

    /// Quoted rates.
    #[params(skip)]
    pub rates: Option<Vec<Rate>>,
    /// Rate the label was bought with.
    #[params(skip)]
    pub selected_rate: Option<Rate>,
    /// Purchased label.
    #[params(skip)]
    pub postage_label: Option<PostageLabel>,
    /// Carrier warnings raised while rating.
    #[params(skip)]
    pub messages: Option<Vec<Message>>,
    /// Tracking code of the purchased label.
    #[params(skip)]
    pub tracking_code: Option<String>,
    /// USPS zone.
    #[params(skip)]
    pub usps_zone: Option<String>,
    /// Shipment status.
    #[params(skip)]
    pub status: Option<String>,
    /// Tracker attached on purchase.
    #[params(skip)]
    pub tracker: Option<Tracker>,
    /// Fees charged for the shipment.
    #[params(skip)]
    pub fees: Option<Vec<Fee>>,
    /// Refund state, once a refund was requested.
    #[params(skip)]
    pub refund_status: Option<String>,
    /// Batch containing the shipment.
    #[params(skip)]
    pub batch_id: Option<String>,
    /// Status inside the batch.
    #[params(skip)]
    pub batch_status: Option<String>,
    /// Batch processing message.
    #[params(skip)]
    pub batch_message: Option<String>,
    /// Generated forms.
    #[params(skip)]
    pub forms: Option<Vec<Form>>,
    /// Scan form listing the shipment.
    #[params(skip)]
    pub scan_form: Option<ScanForm>,
    /// Stamp image.
    #[params(skip)]
    pub stamp_url: Option<String>,
    /// Barcode image.
    #[params(skip)]
    pub barcode_url: Option<String>,
}

impl Shipment {
    /// Cheapest rate accepted by `filter`, `None` when no rate passes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when the shipment has not been rated.
    pub fn lowest_rate(&self, filter: &RateFilter) -> Result<Option<&Rate>> {
        let rates = self
            .rates
            .as_deref()
            .ok_or(Error::missing_field("shipment", "rates"))?;
        Ok(filter.lowest(rates))
    }
}

/// Carrier options for a shipment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ShipmentOptions {
    pub additional_handling: Option<bool>,
    pub address_validation_level: Option<String>,
    pub alcohol: Option<bool>,
    pub bill_receiver_account: Option<String>,
    pub bill_receiver_postal_code: Option<String>,
    pub bill_third_party_account: Option<String>,
    pub bill_third_party_country: Option<String>,
    pub bill_third_party_postal_code: Option<String>,
    pub by_drone: Option<bool>,
    pub carbon_neutral: Option<bool>,
    pub cod_amount: Option<String>,
    pub cod_method: Option<String>,
    pub currency: Option<String>,
    pub delivery_confirmation: Option<String>,
    pub dry_ice: Option<bool>,
    pub dry_ice_medical: Option<String>,
    pub dry_ice_weight: Option<String>,
    pub endorsement: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub freight_charge: Option<f64>,
    pub handling_instructions: Option<String>,
    pub hazmat: Option<String>,
    pub hold_for_pickup: Option<bool>,
    pub incoterm: Option<String>,
    pub invoice_number: Option<String>,
    /// Date the label is printed for, sent as UTC.
    pub label_date: Option<DateTime<Utc>>,
    /// `PNG`, `PDF`, `ZPL` or `EPL2`.
    pub label_format: Option<String>,
    pub label_size: Option<String>,
    pub machinable: Option<bool>,
    pub print_custom_1: Option<String>,
    pub print_custom_2: Option<String>,
    pub print_custom_3: Option<String>,
    pub saturday_delivery: Option<bool>,
    pub special_rates_eligibility: Option<String>,
    pub smartpost_hub: Option<String>,
    pub smartpost_manifest: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub carrier_insurance_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub declared_value: Option<f64>,
    pub delivered_duty_paid: Option<bool>,
    pub print_rate: Option<bool>,
    pub return_service: Option<String>,
}

/// A purchased postage label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostageLabel {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Days the label date was advanced.
    pub date_advance: Option<u32>,
    /// Integrated customs form type.
    pub integrated_form: Option<String>,
    /// Date printed on the label.
    pub label_date: Option<DateTime<Utc>>,
    /// Resolution in DPI.
    pub label_resolution: Option<u32>,
    /// Size, e.g. `4x6`.
    pub label_size: Option<String>,
    /// Label type.
    pub label_type: Option<String>,
    /// Image URL.
    pub label_url: Option<String>,
    /// MIME type of `label_url`.
    pub label_file_type: Option<String>,
    /// PDF rendering, once generated.
    pub label_pdf_url: Option<String>,
    /// EPL2 rendering, once generated.
    pub label_epl2_url: Option<String>,
    /// ZPL rendering, once generated.
    pub label_zpl_url: Option<String>,
}

/// A fee charged on a shipment or tracker.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fee {
    /// Fee kind, e.g. `PostageFee`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Charged amount.
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    /// Whether it was charged.
    pub charged: bool,
    /// Whether it was refunded.
    pub refunded: bool,
}

/// A form generated alongside a label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Form {
    /// Common object fields.
    #[serde(flatten)]
    pub meta: ObjectMeta,
    /// Download URL.
    pub form_url: Option<String>,
    /// Form kind, e.g. `commercial_invoice`.
    pub form_type: Option<String>,
    /// Whether the carrier received it electronically.
    pub submitted_electronically: Option<bool>,
}

/// A carrier message raised while rating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Carrier that raised it.
    pub carrier: Option<String>,
    /// Message kind, e.g. `rate_error`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Text.
    pub message: Option<String>,
}

/// Filters for [`ShippingClient::list_shipments`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Params)]
pub struct ShipmentListOptions {
    /// Only shipments created before this id.
    pub before_id: Option<String>,
    /// Only shipments created after this id.
    pub after_id: Option<String>,
    /// Only shipments created at or after this time.
    pub start_datetime: Option<DateTime<Utc>>,
    /// Only shipments created before this time.
    pub end_datetime: Option<DateTime<Utc>>,
    /// Page size.
    pub page_size: Option<u32>,
    /// Only purchased (or unpurchased) shipments.
    pub purchased: Option<bool>,
    /// Include child shipments of multi-piece shipments.
    pub include_children: Option<bool>,
}

/// One page of shipments.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShipmentList {
    /// Shipments, newest first.
    pub shipments: Vec<Shipment>,
    /// Whether an older page exists.
    pub has_more: bool,
    /// Filters that produced this page.
    #[serde(skip)]
    pub options: Option<ShipmentListOptions>,
}

impl ShipmentList {
    /// Fetch the page after this one with the same filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when this page is empty or its last
    /// shipment has no id.
    pub async fn next_page<C: HttpClient>(&self, client: &ShippingClient<C>) -> Result<Self> {
        let last = self
            .shipments
            .last()
            .ok_or(Error::missing_field("shipment_list", "shipments"))?;
        let before_id = require_id(last.meta.id.as_deref(), "shipment")?;

        let mut options = self.options.clone().unwrap_or_default();
        options.before_id = Some(before_id.to_string());
        client.list_shipments(Some(&options)).await
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// List shipments, newest first.
    pub async fn list_shipments(
        &self,
        options: Option<&ShipmentListOptions>,
    ) -> Result<ShipmentList> {
        let mut request = ApiRequest::get("shipments");
        if let Some(options) = options {
            request = request.query_params(&options.to_params());
        }

        let mut list: ShipmentList = self.send(request).await?;
        list.options = options.cloned();
        Ok(list)
    }

    /// Retrieve a shipment.
    pub async fn get_shipment(&self, id: &str) -> Result<Shipment> {
        self.send(ApiRequest::get("shipments").segment(id)).await
    }

    /// Create a shipment. The response carries its rates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceAlreadyCreated`] if the shipment has an id.
    pub async fn create_shipment(&self, shipment: &Shipment) -> Result<Shipment> {
        ensure_not_created(shipment.meta.id.as_deref(), "shipment")?;
        self.send(ApiRequest::post("shipments").body("shipment", shipment))
            .await
    }

    /// Re-rate a shipment, replacing its `rates`.
    pub async fn regenerate_rates(&self, shipment: &mut Shipment) -> Result<()> {
        let id = require_id(shipment.meta.id.as_deref(), "shipment")?;
        let rated: Shipment = self
            .send(ApiRequest::get("shipments").segment(id).segment("rates"))
            .await?;
        shipment.rates = rated.rates;
        Ok(())
    }

    /// Buy the label for `rate_id`, optionally insuring the shipment.
    pub async fn buy_shipment(
        &self,
        id: &str,
        rate_id: &str,
        insurance: Option<f64>,
    ) -> Result<Shipment> {
        let request = ApiRequest::post("shipments")
            .segment(id)
            .segment("buy")
            .body_params("rate", &Params::new().with("id", rate_id))
            .body_params("", &Params::new().with("insurance", insurance));
        self.send(request).await
    }

    /// Insure a purchased shipment for `amount`, in the shipment's currency.
    pub async fn buy_insurance(&self, id: &str, amount: f64) -> Result<Shipment> {
        let request = ApiRequest::post("shipments")
            .segment(id)
            .segment("insure")
            .body_params("", &Params::new().with("amount", amount));
        self.send(request).await
    }

    /// Convert the label to `file_format`: `pdf`, `zpl` or `epl2`.
    pub async fn generate_label(&self, id: &str, file_format: &str) -> Result<Shipment> {
        let request = ApiRequest::get("shipments")
            .segment(id)
            .segment("label")
            .query("file_format", file_format);
        self.send(request).await
    }

    /// Ask the carrier to refund the label.
    pub async fn refund_shipment(&self, id: &str) -> Result<Shipment> {
        self.send(ApiRequest::get("shipments").segment(id).segment("refund"))
            .await
    }
}
