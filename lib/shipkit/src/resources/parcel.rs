//! Parcels.

use serde::Deserialize;

use super::ObjectMeta;
use crate::api::ensure_not_created;
use crate::{ApiRequest, HttpClient, Params, Result, ShippingClient};

/// Dimensions and weight of a package.
///
/// Lengths are in inches, weight in ounces.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct Parcel {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Length.
    pub length: Option<f64>,
    /// Width.
    pub width: Option<f64>,
    /// Height.
    pub height: Option<f64>,
    /// Weight.
    pub weight: Option<f64>,
    /// Carrier packaging name, replaces the dimensions.
    pub predefined_package: Option<String>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a parcel.
    pub async fn get_parcel(&self, id: &str) -> Result<Parcel> {
        self.send(ApiRequest::get("parcels").segment(id)).await
    }

    /// Create a parcel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ResourceAlreadyCreated`] if the parcel has an id.
    pub async fn create_parcel(&self, parcel: &Parcel) -> Result<Parcel> {
        ensure_not_created(parcel.meta.id.as_deref(), "parcel")?;
        self.send(ApiRequest::post("parcels").body("parcel", parcel))
            .await
    }
}
