//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use shipkit_core::{Method, Params, Request};
//! use bytes::Bytes;
//!
//! let address = Params::new().with("street1", "164 Townsend St");
//! let request = Request::<Bytes>::builder(Method::Post, "https://api.example.com/addresses".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .form_params("address", &address)
//!     .build();
//!
//! assert_eq!(request.body().unwrap().as_ref(), b"address%5Bstreet1%5D=164%20Townsend%20St");
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, FlatParam, Method, Params, ToParams, encode, flatten_params, to_query_pairs};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = FlatParam>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Appends the top-level entries of `params` as query parameters.
    ///
    /// Null entries are skipped, see [`to_query_pairs`].
    #[must_use]
    pub fn query_params(self, params: &Params) -> Self {
        self.query_pairs(to_query_pairs(params))
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a form-urlencoded body from already flattened pairs.
    #[must_use]
    pub fn form(self, pairs: &[FlatParam]) -> Self {
        self.header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .body(Bytes::from(encode(pairs)))
    }

    /// Set a form-urlencoded body by flattening `params` under `prefix`.
    #[must_use]
    pub fn form_params(self, prefix: &str, params: &Params) -> Self {
        self.form(&flatten_params(params, prefix))
    }

    /// Set a form-urlencoded body from an object rendered under `prefix`.
    #[must_use]
    pub fn form_object<T: ToParams + ?Sized>(self, prefix: &str, object: &T) -> Self {
        self.form_params(prefix, &object.to_params())
    }
}
