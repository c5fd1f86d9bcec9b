//! # Grafana API
//!
//! A Rust client library for the [Grafana HTTP API](https://grafana.com/docs/grafana/latest/developers/http_api/),
//! covering legacy alerting, alert notification channels and annotations.
//!
//! ## Features
//!
//! - Typed inputs and outputs for every endpoint; unset optional fields are never sent
//! - HTTP Basic or API key (Bearer) authentication
//! - Server error bodies decoded into [`GrafanaError::Api`] and [`GrafanaError::Validation`]
//! - Optional request/response dumps through a pluggable [`Logger`]
//! - Bring your own [`reqwest_middleware::ClientWithMiddleware`] for retries or extra tracing
//!
//! Every call is a single round trip: the library never retries, caches or batches.
//!
//! ## Example
//!
//! ```rust,no_run
//! use grafana_api::{FindAnnotationsInput, GrafanaClient};
//! use url::Url;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GrafanaClient::new(
//!         Url::parse("http://localhost:3000")?,
//!         Duration::from_secs(10),
//!     )?
//!     .with_basic_auth("admin", "admin");
//!
//!     let annotations = client
//!         .find_annotations(FindAnnotationsInput::default().with_dashboard(1).with_tag("deploy"))
//!         .await?;
//!
//!     for annotation in annotations {
//!         println!("{:?}: {:?}", annotation.time(), annotation.text);
//!     }
//!     Ok(())
//! }
//! ```

mod alerting;
mod annotations;
mod client;
mod errors;
mod logger;
mod notifications;
mod query;
mod types;

pub use alerting::{DashboardAlertState, DashboardAlertStatesInput};
pub use annotations::{
    Annotation, CreateAnnotationInput, CreateGraphiteAnnotationInput, CreatedAnnotation,
    DeleteAnnotationInput, DeleteAnnotationRegionInput, DeleteAnnotationsInput,
    FindAnnotationsInput, UpdateAnnotationInput,
};
pub use client::GrafanaClient;
pub use errors::{messages, FieldError, GrafanaError, Result};
pub use logger::{Logger, TracingLogger};
pub use notifications::{
    AlertNotification, AlertNotificationSummary, AlertNotifier, CreateAlertNotificationInput,
    DeleteAlertNotificationInput, GetAlertNotificationInput, TestAlertNotificationInput,
    UpdateAlertNotificationInput,
};
pub use types::{notifier_type, AlertState, MessageOutput};
