//! Request dispatch against the shipping API.
//!
//! An [`ApiRequest`] describes one endpoint call: method, path segments
//! relative to the API base, optional root element, query pairs and form body
//! pairs. Caller-supplied ids are added with [`ApiRequest::segment`] and are
//! escaped as single path segments.
//! [`ShippingClient`] turns it into an HTTP request, executes it through any
//! [`HttpClient`], maps error statuses and unwraps the JSON payload.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    ClientConfig, ContentType, Error, FlatParam, HttpClient, HyperClient, Method, Params, Request,
    Response, Result, RootElement, ToParams, flatten_list, flatten_params, to_query_pairs,
};

/// A single call to an API endpoint.
///
/// # Example
///
/// ```
/// use shipkit::{ApiRequest, Method, Params};
///
/// let request = ApiRequest::post("shipments")
///     .segment("shp_123")
///     .segment("buy")
///     .root("shipment")
///     .body_params("rate", &Params::new().with("id", "rate_456"))
///     .body_pairs([("insurance".to_string(), "249.99".to_string())]);
///
/// assert_eq!(request.method(), Method::Post);
/// assert_eq!(request.path(), "shipments/shp_123/buy");
/// assert_eq!(request.encoded_body().as_deref(), Some("rate%5Bid%5D=rate_456&insurance=249.99"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    root: Option<RootElement>,
    query: Vec<FlatParam>,
    body: Vec<FlatParam>,
}

impl ApiRequest {
    /// Create a request for the fixed endpoint `path`, relative to the API base.
    ///
    /// `path` is split on `/`; use [`Self::segment`] for ids and other values.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            root: None,
            query: Vec::new(),
            body: Vec::new(),
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::Put, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append one path segment, escaped so it cannot leave its position.
    #[must_use]
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Unwrap the response payload from this key when present.
    #[must_use]
    pub fn root(mut self, root: impl Into<RootElement>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Append one query parameter. Nulls are skipped.
    #[must_use]
    pub fn query(self, name: impl Into<String>, value: impl crate::ToParamValue) -> Self {
        self.query_params(&Params::new().with(name, value))
    }

    /// Append the top-level entries of `params` as query parameters.
    #[must_use]
    pub fn query_params(mut self, params: &Params) -> Self {
        self.query.extend(to_query_pairs(params));
        self
    }

    /// Append raw query pairs, used as-is.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = FlatParam>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Flatten an object into the body under `prefix`.
    #[must_use]
    pub fn body<T: ToParams + ?Sized>(self, prefix: &str, object: &T) -> Self {
        self.body_params(prefix, &object.to_params())
    }

    /// Flatten a mapping into the body under `prefix`.
    #[must_use]
    pub fn body_params(mut self, prefix: &str, params: &Params) -> Self {
        self.body.extend(flatten_params(params, prefix));
        self
    }

    /// Flatten a list of mappings into the body as `prefix[i][...]`.
    #[must_use]
    pub fn body_list(mut self, prefix: &str, items: &[Params]) -> Self {
        self.body.extend(flatten_list(items, prefix));
        self
    }

    /// Append already flattened body pairs.
    #[must_use]
    pub fn body_pairs(mut self, pairs: impl IntoIterator<Item = FlatParam>) -> Self {
        self.body.extend(pairs);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the API base, unescaped.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Raw path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Root element to unwrap, if any.
    #[must_use]
    pub fn root_element(&self) -> Option<&RootElement> {
        self.root.as_ref()
    }

    /// Query pairs, in insertion order.
    #[must_use]
    pub fn query_entries(&self) -> &[FlatParam] {
        &self.query
    }

    /// Form body pairs, in insertion order.
    #[must_use]
    pub fn body_entries(&self) -> &[FlatParam] {
        &self.body
    }

    /// The encoded form body, `None` when the request has no body pairs.
    #[must_use]
    pub fn encoded_body(&self) -> Option<String> {
        (!self.body.is_empty()).then(|| crate::encode(&self.body))
    }
}

/// Client for the shipping API.
///
/// Cheap to clone: the configuration is shared and the default transport
/// pools its connections.
///
/// # Example
///
/// ```ignore
/// use shipkit::ShippingClient;
///
/// let client = ShippingClient::new("sk_test_123")?;
/// let parcel = client.get_parcel("prcl_123").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShippingClient<C = HyperClient> {
    config: Arc<ClientConfig>,
    http: C,
}

impl ShippingClient<HyperClient> {
    /// Client with the default configuration for `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(api_key)?))
    }

    /// Client with a hyper transport built from the configuration's transport settings.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        let http = HyperClient::with_config(config.transport().clone());
        Self::with_http_client(config, http)
    }
}

impl<C> ShippingClient<C> {
    /// Client over a custom transport, e.g. a [`HyperClient`] with middleware.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: C) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &C {
        &self.http
    }

    /// Build the HTTP request for `request`: absolute URL, query string,
    /// credentials and standard headers, encoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a path segment is empty, `.` or `..`.
    pub fn prepare(&self, request: &ApiRequest) -> Result<Request<Bytes>> {
        let url = self.config.endpoint(&request.segments)?;

        let builder = Request::builder(request.method, url)
            .header("Accept", ContentType::Json.as_str())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("User-Agent", self.config.user_agent())
            .query_pairs(request.query.iter().cloned());

        let builder = if request.body.is_empty() {
            builder
        } else {
            builder.form(&request.body)
        };

        Ok(builder.build())
    }
}

impl<C: HttpClient> ShippingClient<C> {
    /// Execute `request` and return the successful response.
    ///
    /// # Errors
    ///
    /// Returns transport errors as-is and [`Error::Api`] for non-2xx statuses.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response<Bytes>> {
        let http_request = self.prepare(request)?;
        debug!(method = %request.method, path = %request.path(), "dispatching API request");

        let response = self.http.execute(http_request).await?;
        response.error_for_status().inspect_err(|err| {
            warn!(
                method = %request.method,
                path = %request.path(),
                status = err.status(),
                code = err.api_code(),
                "API request failed"
            );
        })
    }

    /// Execute `request` and deserialize the payload, unwrapping its root element.
    ///
    /// # Errors
    ///
    /// Returns dispatch errors, see [`Self::execute`], and JSON errors.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(&request).await?;
        response.unwrap_json(request.root.as_ref().map(RootElement::as_str))
    }

    /// Execute `request`, discarding the payload.
    ///
    /// # Errors
    ///
    /// Returns dispatch errors, see [`Self::execute`].
    pub async fn send_empty(&self, request: ApiRequest) -> Result<()> {
        self.execute(&request).await.map(drop)
    }
}

/// Reject a create call for an object that already carries an id.
pub(crate) fn ensure_not_created(id: Option<&str>, resource: &'static str) -> Result<()> {
    match id {
        Some(_) => Err(Error::ResourceAlreadyCreated { resource }),
        None => Ok(()),
    }
}

/// Id of an object, or a [`Error::MissingField`].
pub(crate) fn require_id<'a>(id: Option<&'a str>, resource: &'static str) -> Result<&'a str> {
    id.ok_or(Error::missing_field(resource, "id"))
}
