//! Tower middleware layers for the shipkit HTTP transport.
//!
//! Layers wrap the type-erased transport service and are added through
//! [`crate::HyperClientBuilder::layer`] or its helpers. The last layer added
//! is the first to process requests.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//! - [`RetryPolicy`] - Retry policy for [`RetryLayer`]
//! - [`ConcurrencyLimitLayer`] - Limits concurrent requests (from tower)
//!
//! # Example
//!
//! ```ignore
//! use shipkit::HyperClient;
//! use shipkit::middleware::ConcurrencyLimitLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(ConcurrencyLimitLayer::new(4))
//!     .with_retry(3)
//!     .with_logging()
//!     .build();
//! ```

mod logging;
mod retry;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

// Re-export tower types for convenience
pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
