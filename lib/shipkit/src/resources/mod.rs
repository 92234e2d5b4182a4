//! Typed API objects and their endpoints.
//!
//! Request objects derive [`Params`](crate::Params) and flatten into the form
//! body under their resource name; response objects deserialize with serde.
//! Every object flattens an [`ObjectMeta`]. The endpoints are inherent methods
//! on [`ShippingClient`](crate::ShippingClient).

mod address;
mod batch;
mod carrier_account;
mod customs;
mod event;
pub(crate) mod meta;
mod order;
mod parcel;
mod pickup;
mod rate;
mod report;
mod scan_form;
mod shipment;
mod tracker;
mod user;
mod webhook;

pub use self::address::{Address, Verification, VerificationDetails, Verifications, Verify};
pub use self::batch::{Batch, BatchShipment};
pub use self::carrier_account::{CarrierAccount, CarrierFields, CarrierType, CredentialField};
pub use self::customs::{CustomsInfo, CustomsItem};
pub use self::event::Event;
pub use self::meta::ObjectMeta;
pub use self::order::Order;
pub use self::parcel::Parcel;
pub use self::pickup::Pickup;
pub use self::rate::{Rate, RateFilter};
pub use self::report::{Report, ReportList, ReportListOptions};
pub use self::scan_form::{ScanForm, ScanFormList, ScanFormListOptions};
pub use self::shipment::{
    Fee, Form, Message, PostageLabel, Shipment, ShipmentList, ShipmentListOptions, ShipmentOptions,
};
pub use self::tracker::{
    CarrierDetail, Tracker, TrackerList, TrackerListOptions, TrackingDetail, TrackingLocation,
};
pub use self::user::{ApiKey, User};
pub use self::webhook::{Webhook, WebhookList};
