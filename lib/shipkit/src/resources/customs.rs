//! Customs declarations for international shipments.

use serde::Deserialize;

use super::ObjectMeta;
use super::meta::lenient_f64;
use crate::api::ensure_not_created;
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// One line of a customs declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct CustomsItem {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// What the item is.
    pub description: Option<String>,
    /// Number of units.
    pub quantity: Option<u32>,
    /// Total value of the line.
    #[serde(deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
    /// Total weight of the line, in ounces.
    pub weight: Option<f64>,
    /// Harmonized tariff number.
    pub hs_tariff_number: Option<String>,
    /// Seller's item code.
    pub code: Option<String>,
    /// Country of manufacture.
    pub origin_country: Option<String>,
    /// Currency of `value`.
    pub currency: Option<String>,
}

/// A customs declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct CustomsInfo {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Export exemption code, e.g. `NOEEI 30.37(a)`.
    pub eel_pfc: Option<String>,
    /// `documents`, `gift`, `merchandise`, `returned_goods`, `sample` or `other`.
    pub contents_type: Option<String>,
    /// Explanation when `contents_type` is `other`.
    pub contents_explanation: Option<String>,
    /// Whether the signer certifies the declaration.
    pub customs_certify: Option<bool>,
    /// Name of the signer.
    pub customs_signer: Option<String>,
    /// `return` or `abandon`.
    pub non_delivery_option: Option<String>,
    /// `none`, `other`, `quarantine` or `sanitary_phytosanitary_inspection`.
    pub restriction_type: Option<String>,
    /// Explanation when `restriction_type` is not `none`.
    pub restriction_comments: Option<String>,
    /// Declared items.
    pub customs_items: Option<Vec<CustomsItem>>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a customs item.
    pub async fn get_customs_item(&self, id: &str) -> Result<CustomsItem> {
        self.send(ApiRequest::get("customs_items").segment(id)).await
    }

    /// Create a customs item.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceAlreadyCreated`] if the item has an id.
    pub async fn create_customs_item(&self, item: &CustomsItem) -> Result<CustomsItem> {
        ensure_not_created(item.meta.id.as_deref(), "customs_item")?;
        self.send(ApiRequest::post("customs_items").body("customs_item", item))
            .await
    }

    /// Retrieve a customs declaration.
    pub async fn get_customs_info(&self, id: &str) -> Result<CustomsInfo> {
        self.send(ApiRequest::get("customs_infos").segment(id)).await
    }

    /// Create a customs declaration with its items.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceAlreadyCreated`] if the declaration has an id.
    pub async fn create_customs_info(&self, info: &CustomsInfo) -> Result<CustomsInfo> {
        ensure_not_created(info.meta.id.as_deref(), "customs_info")?;
        self.send(ApiRequest::post("customs_infos").body("customs_info", info))
            .await
    }
}
