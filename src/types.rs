use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Evaluation state of an alert rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Ok,
    Alerting,
    Pending,
    NoData,
    Paused,
    /// State reported by a newer server that this client does not know about
    #[serde(other)]
    Unknown,
}

impl Display for AlertState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertState::Ok => write!(f, "ok"),
            AlertState::Alerting => write!(f, "alerting"),
            AlertState::Pending => write!(f, "pending"),
            AlertState::NoData => write!(f, "no_data"),
            AlertState::Paused => write!(f, "paused"),
            AlertState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Identifiers of the notifier types Grafana ships with
pub mod notifier_type {
    pub const ALERTMANAGER: &str = "prometheus-alertmanager";
    pub const DINGDING: &str = "dingding";
    pub const EMAIL: &str = "email";
    pub const HIPCHAT: &str = "hipchat";
    pub const KAFKA: &str = "kafka";
    pub const LINE: &str = "line";
    pub const OPSGENIE: &str = "opsgenie";
    pub const PAGERDUTY: &str = "pagerduty";
    pub const PUSHOVER: &str = "pushover";
    pub const SENSU: &str = "sensu";
    pub const SLACK: &str = "slack";
    pub const MICROSOFT_TEAMS: &str = "teams";
    pub const TELEGRAM: &str = "telegram";
    pub const THREEMA: &str = "threema";
    pub const VICTOROPS: &str = "victorops";
    pub const WEBHOOK: &str = "webhook";
}

/// Acknowledgement returned by endpoints that only report a status message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageOutput {
    pub message: Option<String>,
}

/// Decode `null` the same as a missing key, for collections Grafana may send as `null`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Convert epoch milliseconds, as used by annotation timestamps
pub(crate) fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}
