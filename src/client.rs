use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::errors::{ErrorBody, FieldError, GrafanaError, Result};
use crate::logger::{dump_request, dump_response, Logger};
use crate::query::to_query_pairs;

const CLIENT_USER_AGENT: &str = concat!("grafana-api-rs/", env!("CARGO_PKG_VERSION"));

/// Credential attached to every request
#[derive(Clone)]
enum Credential {
    Basic { username: String, password: String },
    Bearer(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Credential::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// Client for the Grafana HTTP API
///
/// Configure credentials and an optional logger once, then share the client freely: it is
/// `Clone`, every call is an independent round trip, and clones reuse the same transport.
///
/// # Example
///
/// ```rust,no_run
/// use grafana_api::{CreateAnnotationInput, GrafanaClient};
/// use url::Url;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GrafanaClient::new(
///         Url::parse("http://localhost:3000")?,
///         Duration::from_secs(10),
///     )?
///     .with_api_key("eyJrIjoi...");
///
///     let created = client
///         .create_annotation(CreateAnnotationInput::new("Deployed v1.2.0").with_tag("deploy"))
///         .await?;
///     println!("annotation id: {:?}", created.id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GrafanaClient {
    client: ClientWithMiddleware,
    api_url: Url,
    credential: Option<Credential>,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for GrafanaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrafanaClient")
            .field("api_url", &self.api_url.as_str())
            .field("credential", &self.credential)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl GrafanaClient {
    /// Create a new Grafana client
    ///
    /// # Arguments
    ///
    /// * `address` - Base URL of the Grafana instance (e.g., `http://localhost:3000`); the
    ///   `/api/` root is appended to it
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(address: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GrafanaError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Self::with_client(client, address)
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, tracing, etc.)
    pub fn with_client(client: ClientWithMiddleware, address: Url) -> Result<Self> {
        let api_url = api_root(&address)?;
        Ok(Self {
            client,
            api_url,
            credential: None,
            logger: None,
        })
    }

    /// Authenticate with HTTP Basic credentials
    ///
    /// Replaces any previously configured credential.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credential = Some(Credential::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Authenticate with an API key sent as a Bearer token
    ///
    /// Replaces any previously configured credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::Bearer(key.into()));
        self
    }

    /// Dump every request and response to `logger`
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Get the API root URL (always ends with `/api/`)
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Send `input` to `path` and decode the response into `O`
    ///
    /// POST and PUT carry `input` as a JSON body; every other verb carries it as query
    /// parameters.
    #[instrument(
        name = "GrafanaClient::call",
        skip_all,
        fields(method = %method, path = %path)
    )]
    pub(crate) async fn call<I, O>(&self, method: Method, path: &str, input: Option<&I>) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let request = self.build_request(method, path, input)?;
        let response = self.dispatch(request).await?;
        self.decode(response).await
    }

    pub(crate) fn build_request<I>(&self, method: Method, path: &str, input: Option<&I>) -> Result<Request>
    where
        I: Serialize + ?Sized,
    {
        let url = self
            .api_url
            .join(path.trim_start_matches('/'))
            .map_err(GrafanaError::InvalidUrl)?;

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(input) = input {
            if method == Method::POST || method == Method::PUT {
                let body = serde_json::to_vec(input).map_err(GrafanaError::Serialize)?;
                builder = builder.body(body);
            } else {
                let pairs = to_query_pairs(input)?;
                if !pairs.is_empty() {
                    builder = builder.query(&pairs);
                }
            }
        }

        builder = match &self.credential {
            Some(Credential::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            Some(Credential::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        builder.build().map_err(GrafanaError::BuildRequest)
    }

    async fn dispatch(&self, request: Request) -> Result<reqwest::Response> {
        if let Some(logger) = &self.logger {
            logger.log(&dump_request(&request));
        }

        debug!(url = %request.url(), "Sending request to Grafana");

        self.client
            .execute(request)
            .await
            .map_err(GrafanaError::Request)
    }

    async fn decode<O: DeserializeOwned>(&self, response: reqwest::Response) -> Result<O> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        let body = response.bytes().await.map_err(GrafanaError::ReadBody)?;

        if let Some(logger) = &self.logger {
            logger.log(&dump_response(status, version, &headers, &body));
        }

        debug!(status = status.as_u16(), "Grafana responded");

        if status.is_client_error() || status.is_server_error() {
            return Err(decode_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(GrafanaError::Deserialize)
    }
}

/// Classify an error response body into one of the two known error shapes
fn decode_error(status: StatusCode, body: &[u8]) -> GrafanaError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(errors) = serde_json::from_slice::<Vec<FieldError>>(body) {
            return GrafanaError::Validation { errors };
        }
    }

    match ErrorBody::parse(body) {
        Some(error) => error.into_error(status.as_u16()),
        None => GrafanaError::UnexpectedResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

fn api_root(address: &Url) -> Result<Url> {
    let root = format!("{}/api/", address.as_str().trim_end_matches('/'));
    Url::parse(&root).map_err(GrafanaError::InvalidUrl)
}
