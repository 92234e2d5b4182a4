//! Reports: CSV exports of shipments, trackers and payment logs.
//!
//! Report parameters travel in the query string, including on creation, so
//! their dates use the query format (`2024-03-01` for whole days).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::ObjectMeta;
use crate::api::require_id;
use crate::{ApiRequest, Error, HttpClient, Params, Result, ShippingClient, ToParams};

/// A generated report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Params)]
#[serde(default)]
pub struct Report {
    /// Common object fields.
    #[serde(flatten)]
    #[params(flatten)]
    pub meta: ObjectMeta,
    /// `new`, `available` or `failed`.
    #[params(skip)]
    pub status: Option<String>,
    /// First day covered.
    pub start_date: Option<NaiveDate>,
    /// Last day covered.
    pub end_date: Option<NaiveDate>,
    /// Include objects created by child users.
    pub include_children: Option<bool>,
    /// Download link, valid for a short time after retrieval.
    #[params(skip)]
    pub url: Option<String>,
    /// Expiry of `url`.
    #[params(skip)]
    pub url_expires_at: Option<DateTime<Utc>>,
    /// Also email the report.
    pub send_email: Option<bool>,
}

/// Filters for [`ShippingClient::list_reports`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Params)]
pub struct ReportListOptions {
    /// Only reports created before this id.
    pub before_id: Option<String>,
    /// Only reports created after this id.
    pub after_id: Option<String>,
    /// Only reports created at or after this time.
    pub start_datetime: Option<DateTime<Utc>>,
    /// Only reports created before this time.
    pub end_datetime: Option<DateTime<Utc>>,
    /// Page size, at most 100.
    pub page_size: Option<u32>,
}

/// One page of reports of a single type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportList {
    /// Reports, newest first.
    pub reports: Vec<Report>,
    /// Whether an older page exists.
    pub has_more: bool,
    /// Report type of this page, e.g. `shipment`.
    #[serde(skip)]
    pub report_type: String,
    /// Filters that produced this page.
    #[serde(skip)]
    pub options: Option<ReportListOptions>,
}

impl ReportList {
    /// Fetch the page after this one with the same type and filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] when this page is empty or its last
    /// report has no id.
    pub async fn next_page<C: HttpClient>(&self, client: &ShippingClient<C>) -> Result<Self> {
        let last = self
            .reports
            .last()
            .ok_or(Error::missing_field("report_list", "reports"))?;
        let before_id = require_id(last.meta.id.as_deref(), "report")?;

        let mut options = self.options.clone().unwrap_or_default();
        options.before_id = Some(before_id.to_string());
        client.list_reports(&self.report_type, Some(&options)).await
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Retrieve a report of `report_type`, e.g. `shipment` or `tracker`.
    pub async fn get_report(&self, report_type: &str, id: &str) -> Result<Report> {
        self.send(ApiRequest::get("reports").segment(report_type).segment(id))
            .await
    }

    /// Request a new report of `report_type`.
    pub async fn create_report(&self, report_type: &str, report: Option<&Report>) -> Result<Report> {
        let mut request = ApiRequest::post("reports").segment(report_type);
        if let Some(report) = report {
            request = request.query_params(&report.to_params());
        }
        self.send(request).await
    }

    /// List reports of `report_type`, newest first.
    pub async fn list_reports(
        &self,
        report_type: &str,
        options: Option<&ReportListOptions>,
    ) -> Result<ReportList> {
        let mut request = ApiRequest::get("reports").segment(report_type);
        if let Some(options) = options {
            request = request.query_params(&options.to_params());
        }

        let mut list: ReportList = self.send(request).await?;
        list.report_type = report_type.to_string();
        list.options = options.cloned();
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use crate::to_query_pairs;

    use super::*;

    #[test]
    fn report_renders_whole_days_as_bare_dates() {
        let report = Report {
            start_date: NaiveDate::from_ymd_opt(2016, 2, 2),
            end_date: NaiveDate::from_ymd_opt(2016, 2, 3),
            include_children: Some(true),
            url: Some("https://example.com/report.csv".to_string()),
            ..Report::default()
        };

        assert_eq!(
            to_query_pairs(&report.to_params()),
            [
                ("start_date".to_string(), "2016-02-02".to_string()),
                ("end_date".to_string(), "2016-02-03".to_string()),
                ("include_children".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn report_deserializes_dates() {
        let raw = r#"{
            "id": "shprep_1",
            "object": "ShipmentReport",
            "status": "available",
            "start_date": "2016-02-02",
            "end_date": "2016-02-03",
            "include_children": false,
            "url": "https://example.com/report.csv",
            "url_expires_at": "2016-02-04T10:00:30Z"
        }"#;
        let report: Report = serde_json::from_str(raw).expect("deserialize");

        assert_eq!(report.status.as_deref(), Some("available"));
        assert_eq!(report.start_date, NaiveDate::from_ymd_opt(2016, 2, 2));
        assert!(report.url_expires_at.is_some());
    }
}
