//! Orders: several shipments rated and bought together.

use serde::Deserialize;

use super::{Address, CustomsInfo, Message, ObjectMeta, Rate, Shipment};
use crate::api::ensure_not_created;
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient};

/// Shipments between the same addresses, bought with one carrier and service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Params)]
#[serde(default)]
pub struct Order {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// Destination.
    pub to_address: Option<Address>,
    /// Origin.
    pub from_address: Option<Address>,
    /// Where returns go.
    pub return_address: Option<Address>,
    /// Buyer, when different from the recipient.
    pub buyer_address: Option<Address>,
    /// One shipment per package.
    pub shipments: Option<Vec<Shipment>>,
    /// Whether this is a return.
    pub is_return: Option<bool>,
    /// Customs declaration shared by the shipments.
    pub customs_info: Option<CustomsInfo>,
    /// Restrict rating to these carrier account ids.
    #[serde(skip_deserializing)]
    pub carrier_accounts: Option<Vec<String>>,
    /// Combined rates, one per carrier service.
    #[params(skip)]
    pub rates: Option<Vec<Rate>>,
    /// Carrier warnings raised while rating.
    #[params(skip)]
    pub messages: Option<Vec<Message>>,
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve an order.
    pub async fn get_order(&self, id: &str) -> Result<Order> {
        self.send(ApiRequest::get("orders").segment(id)).await
    }

    /// Create an order with its shipments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceAlreadyCreated`] if the order has an id.
    pub async fn create_order(&self, order: &Order) -> Result<Order> {
        ensure_not_created(order.meta.id.as_deref(), "order")?;
        self.send(ApiRequest::post("orders").body("order", order))
            .await
    }

    /// Buy every shipment of the order with `carrier` and `service`.
    pub async fn buy_order(&self, id: &str, carrier: &str, service: &str) -> Result<Order> {
        let body = Params::new()
            .with("carrier", carrier)
            .with("service", service);
        let request = ApiRequest::post("orders")
            .segment(id)
            .segment("buy")
            .body_params("", &body);
        self.send(request).await
    }

    /// Buy the order with the carrier and service of `rate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when the rate lacks a carrier or service.
    pub async fn buy_order_rate(&self, id: &str, rate: &Rate) -> Result<Order> {
        let carrier = rate
            .carrier
            .as_deref()
            .ok_or(Error::missing_field("rate", "carrier"))?;
        let service = rate
            .service
            .as_deref()
            .ok_or(Error::missing_field("rate", "service"))?;
        self.buy_order(id, carrier, service).await
    }
}
