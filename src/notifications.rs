//! Alert notification channels.
//!
//! Grafana restricts these endpoints to viewers (read) and admins (write); the check happens
//! server-side and surfaces as [`GrafanaError::Api`](crate::GrafanaError::Api).

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::instrument;

use crate::client::GrafanaClient;
use crate::errors::Result;
use crate::types::{null_as_default, MessageOutput};

/// Notifier type supported by the server, with its settings template
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotifier {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub options_template: Option<String>,
}

/// Entry of the notification channel list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotificationSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_default: Option<bool>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// Full notification channel, as returned by create, get and update
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotification {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_default: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: HashMap<String, Value>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// Channel configuration to send a test notification through
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestAlertNotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub settings: HashMap<String, Value>,
}

impl TestAlertNotificationInput {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            settings: HashMap::new(),
        }
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

/// New notification channel
///
/// # Example
///
/// ```rust
/// use grafana_api::{notifier_type, CreateAlertNotificationInput};
///
/// let input = CreateAlertNotificationInput::new("ops-webhook", notifier_type::WEBHOOK)
///     .with_default(true)
///     .with_setting("url", "https://hooks.example.com/grafana");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertNotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub settings: HashMap<String, Value>,
}

impl CreateAlertNotificationInput {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    /// Send every alert to this channel unless the rule says otherwise
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAlertNotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl GetAlertNotificationInput {
    pub fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

/// Replacement channel configuration; `id` selects the channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertNotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub settings: HashMap<String, Value>,
}

impl UpdateAlertNotificationInput {
    pub fn new(id: i64, name: &str, kind: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAlertNotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl DeleteAlertNotificationInput {
    pub fn new(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

impl GrafanaClient {
    /// List the notifier types the server supports
    #[instrument(name = "GrafanaClient::alert_notifiers", skip_all)]
    pub async fn alert_notifiers(&self) -> Result<Vec<AlertNotifier>> {
        self.call::<(), _>(Method::GET, "alert-notifiers/", None).await
    }

    /// List configured notification channels
    #[instrument(name = "GrafanaClient::alert_notifications", skip_all)]
    pub async fn alert_notifications(&self) -> Result<Vec<AlertNotificationSummary>> {
        self.call::<(), _>(Method::GET, "alert-notifications/", None)
            .await
    }

    /// Send a test notification through an unsaved channel configuration
    #[instrument(name = "GrafanaClient::test_alert_notification", skip_all)]
    pub async fn test_alert_notification(
        &self,
        input: TestAlertNotificationInput,
    ) -> Result<MessageOutput> {
        self.call(Method::POST, "alert-notifications/test", Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::create_alert_notification", skip_all)]
    pub async fn create_alert_notification(
        &self,
        input: CreateAlertNotificationInput,
    ) -> Result<AlertNotification> {
        self.call(Method::POST, "alert-notifications/", Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::alert_notification", skip_all, fields(id = ?input.id))]
    pub async fn alert_notification(
        &self,
        mut input: GetAlertNotificationInput,
    ) -> Result<AlertNotification> {
        let id = input.id.take().unwrap_or_default();
        self.call(Method::GET, &format!("alert-notifications/{id}"), Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::update_alert_notification", skip_all, fields(id = ?input.id))]
    pub async fn update_alert_notification(
        &self,
        mut input: UpdateAlertNotificationInput,
    ) -> Result<AlertNotification> {
        let id = input.id.take().unwrap_or_default();
        self.call(Method::PUT, &format!("alert-notifications/{id}"), Some(&input))
            .await
    }

    #[instrument(name = "GrafanaClient::delete_alert_notification", skip_all, fields(id = ?input.id))]
    pub async fn delete_alert_notification(
        &self,
        mut input: DeleteAlertNotificationInput,
    ) -> Result<MessageOutput> {
        let id = input.id.take().unwrap_or_default();
        self.call(Method::DELETE, &format!("alert-notifications/{id}"), Some(&input))
            .await
    }
}
