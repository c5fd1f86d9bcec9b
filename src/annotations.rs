//! Annotations: timestamped event markers on dashboards and panels.
//!
//! Timestamps are epoch milliseconds on the wire. An annotation with `is_region` set and a
//! `time_end` spans an interval; the server stores it as a pair sharing one region id.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::client::GrafanaClient;
use crate::errors::Result;
use crate::types::{from_millis, null_as_default, MessageOutput};

/// Filter for [`GrafanaClient::find_annotations`]
///
/// Every field is optional; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAnnotationsInput {
    /// Epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<i64>,
    /// Matches organization annotations carrying all of these tags
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// `alert` or `annotation`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl FindAnnotationsInput {
    pub fn with_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from.timestamp_millis());
        self.to = Some(to.timestamp_millis());
        self
    }

    pub fn with_dashboard(mut self, dashboard_id: i64) -> Self {
        self.dashboard_id = Some(dashboard_id);
        self
    }

    pub fn with_panel(mut self, panel_id: i64) -> Self {
        self.panel_id = Some(panel_id);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: Option<i64>,
    pub alert_id: Option<i64>,
    pub alert_name: Option<String>,
    pub dashboard_id: Option<i64>,
    pub panel_id: Option<i64>,
    pub user_id: Option<i64>,
    pub new_state: Option<String>,
    pub prev_state: Option<String>,
    #[serde(rename = "time")]
    pub time_millis: Option<i64>,
    pub text: Option<String>,
    pub region_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub data: Option<Value>,
    /// End of a region, epoch milliseconds
    #[serde(rename = "timeEnd")]
    pub time_end_millis: Option<i64>,
}

impl Annotation {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        from_millis(self.time_millis)
    }

    pub fn time_end(&self) -> Option<DateTime<Utc>> {
        from_millis(self.time_end_millis)
    }
}

/// New annotation
///
/// # Example
///
/// ```rust
/// use grafana_api::CreateAnnotationInput;
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// let annotation = CreateAnnotationInput::new("Maintenance window")
///     .with_dashboard(1)
///     .with_panel(2)
///     .with_region(now, now + Duration::hours(1))
///     .with_tag("maintenance");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnotationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<i64>,
    /// Epoch milliseconds; the server uses the current time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// Free-form payload; `Some(Value::Null)` is sent as `null` and reads back as `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_region: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<i64>,
}

impl CreateAnnotationInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn with_dashboard(mut self, dashboard_id: i64) -> Self {
        self.dashboard_id = Some(dashboard_id);
        self
    }

    pub fn with_panel(mut self, panel_id: i64) -> Self {
        self.panel_id = Some(panel_id);
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time.timestamp_millis());
        self
    }

    /// Turn the annotation into a region spanning `start..end`
    pub fn with_region(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.time = Some(start.timestamp_millis());
        self.time_end = Some(end.timestamp_millis());
        self.is_region = Some(true);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Attach a payload; `Value::Null` leaves the payload unset
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = match data {
            Value::Null => None,
            data => Some(data),
        };
        self
    }
}

/// Annotation in the Graphite event format
///
/// `when` is in epoch seconds, unlike the rest of the annotation API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGraphiteAnnotationInput {
    pub when: Option<i64>,
    pub what: Option<String>,
    pub data: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

impl CreateGraphiteAnnotationInput {
    pub fn new(what: &str) -> Self {
        Self {
            what: Some(what.to_string()),
            ..Default::default()
        }
    }

    pub fn with_when(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when.timestamp());
        self
    }

    pub fn with_data(mut self, data: &str) -> Self {
        self.data = Some(data.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }
}

/// Identifiers of a newly created annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAnnotation {
    pub id: Option<i64>,
    /// Id of the closing annotation of a region
    pub end_id: Option<i64>,
    pub message: Option<String>,
}

/// Replacement annotation content; `id` selects the annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnotationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_region: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<i64>,
}

impl UpdateAnnotationInput {
    pub fn new(id: i64, text: &str) -> Self {
        Self {
            id: Some(id),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time.timestamp_millis());
        self
    }

    pub fn with_region(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.time = Some(start.timestamp_millis());
        self.time_end = Some(end.timestamp_millis());
        self.is_region = Some(true);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }
}

/// Filter for [`GrafanaClient::delete_annotations`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnnotationsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAnnotationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl DeleteAnnotationInput {
    pub fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnnotationRegionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<i64>,
}

impl DeleteAnnotationRegionInput {
    pub fn new(region_id: i64) -> Self {
        Self {
            region_id: Some(region_id),
        }
    }
}

impl GrafanaClient {
    /// Search annotations
    #[instrument(name = "GrafanaClient::find_annotations", skip_all)]
    pub async fn find_annotations(&self, input: FindAnnotationsInput) -> Result<Vec<Annotation>> {
        self.call(Method::GET, "annotations/", Some(&input)).await
    }

    #[instrument(name = "GrafanaClient::create_annotation", skip_all)]
    pub async fn create_annotation(
        &self,
        input: CreateAnnotationInput,
    ) -> Result<CreatedAnnotation> {
        self.call(Method::POST, "annotations/", Some(&input)).await
    }

    /// Create an annotation from a Graphite-style event
    #[instrument(name = "GrafanaClient::create_graphite_annotation", skip_all)]
    pub async fn create_graphite_annotation(
        &self,
        input: CreateGraphiteAnnotationInput,
    ) -> Result<CreatedAnnotation> {
        self.call(Method::POST, "annotations/graphite", Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::update_annotation", skip_all, fields(id = ?input.id))]
    pub async fn update_annotation(&self, mut input: UpdateAnnotationInput) -> Result<MessageOutput> {
        let id = input.id.take().unwrap_or_default();
        self.call(Method::PUT, &format!("annotations/{id}"), Some(&input))
            .await
    }

    /// Delete every annotation matching the filter
    ///
    /// Admin only.
    #[instrument(name = "GrafanaClient::delete_annotations", skip_all)]
    pub async fn delete_annotations(&self, input: DeleteAnnotationsInput) -> Result<MessageOutput> {
        self.call(Method::POST, "annotations/mass-delete", Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::delete_annotation", skip_all, fields(id = ?input.id))]
    pub async fn delete_annotation(&self, mut input: DeleteAnnotationInput) -> Result<MessageOutput> {
        let id = input.id.take().unwrap_or_default();
        self.call(Method::DELETE, &format!("annotations/{id}"), Some(&input))
            .await
    }

    /// Delete both ends of a region
    #[instrument(
        name = "GrafanaClient::delete_annotation_region",
        skip_all,
        fields(region_id = ?input.region_id)
    )]
    pub async fn delete_annotation_region(
        &self,
        mut input: DeleteAnnotationRegionInput,
    ) -> Result<MessageOutput> {
        let region_id = input.region_id.take().unwrap_or_default();
        self.call(
            Method::DELETE,
            &format!("annotations/region/{region_id}"),
            Some(&input),
        )
        .await
    }
}
