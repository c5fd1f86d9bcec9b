//! Alert state queries.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::GrafanaClient;
use crate::errors::Result;
use crate::types::AlertState;

/// Filter for [`GrafanaClient::alert_states_for_dashboard`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlertStatesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_id: Option<i64>,
}

impl DashboardAlertStatesInput {
    pub fn new(dashboard_id: i64) -> Self {
        Self {
            dashboard_id: Some(dashboard_id),
        }
    }
}

/// Current state of one alert rule on a dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlertState {
    pub id: Option<i64>,
    pub dashboard_id: Option<i64>,
    pub panel_id: Option<i64>,
    pub state: Option<AlertState>,
    pub new_state_date: Option<DateTime<Utc>>,
}

impl GrafanaClient {
    /// List the state of every alert rule on a dashboard
    #[instrument(name = "GrafanaClient::alert_states_for_dashboard", skip_all)]
    pub async fn alert_states_for_dashboard(
        &self,
        input: DashboardAlertStatesInput,
    ) -> Result<Vec<DashboardAlertState>> {
        self.call(Method::GET, "alerts/states-for-dashboard", Some(&input))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_alert_states_for_dashboard() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/alerts/states-for-dashboard"))
            .and(query_param("dashboardId", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id":1,"dashboardId":42,"panelId":2,"state":"alerting","newStateDate":"2018-03-26T10:12:01+02:00"},
                    {"id":2,"dashboardId":42,"panelId":3,"state":"no_data"}
                ]"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GrafanaClient::new(
            Url::parse(&mock_server.uri()).unwrap(),
            Duration::from_secs(10),
        )
        .unwrap();

        let states = client
            .alert_states_for_dashboard(DashboardAlertStatesInput::new(42))
            .await
            .unwrap();

        assert_eq!(states.len(), 2);
        assert_eq!(states[0].state, Some(AlertState::Alerting));
        assert_eq!(
            states[0].new_state_date.unwrap().to_rfc3339(),
            "2018-03-26T08:12:01+00:00"
        );
        assert_eq!(states[1].state, Some(AlertState::NoData));
        assert_eq!(states[1].new_state_date, None);
    }

    #[tokio::test]
    async fn test_alert_states_without_dashboard_sends_no_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/alerts/states-for-dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        let client = GrafanaClient::new(
            Url::parse(&mock_server.uri()).unwrap(),
            Duration::from_secs(10),
        )
        .unwrap();

        let states = client
            .alert_states_for_dashboard(DashboardAlertStatesInput::default())
            .await
            .unwrap();
        assert!(states.is_empty());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }
}
