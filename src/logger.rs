//! Wire-level diagnostics.
//!
//! A [`Logger`] configured on the client receives a full dump of every outbound request and
//! inbound response. Dumps are observational only: they never change what is sent or decoded.

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode, Version};

/// Sink for request/response dumps
///
/// Implemented for any `Fn(&str)` closure, so a quick capture can be plugged in directly:
///
/// ```rust
/// use grafana_api::GrafanaClient;
/// use std::time::Duration;
/// use url::Url;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GrafanaClient::new(Url::parse("http://localhost:3000")?, Duration::from_secs(10))?
///     .with_logger(|dump: &str| eprintln!("{dump}"));
/// # Ok(())
/// # }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, dump: &str);
}

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, dump: &str) {
        self(dump)
    }
}

/// Forwards dumps to `tracing` at debug level on the `grafana_api::wire` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, dump: &str) {
        tracing::debug!(target: "grafana_api::wire", "{dump}");
    }
}

pub(crate) fn dump_request(request: &Request) -> String {
    let body = request
        .body()
        .and_then(|b| b.as_bytes())
        .map(String::from_utf8_lossy)
        .unwrap_or_default();

    format!(
        "--- REQUEST ---\n{} {} {:?}\n{}\n{}\n--- /REQUEST ---",
        request.method(),
        request.url(),
        request.version(),
        dump_headers(request.headers()),
        body
    )
}

pub(crate) fn dump_response(
    status: StatusCode,
    version: Version,
    headers: &HeaderMap,
    body: &[u8],
) -> String {
    format!(
        "--- RESPONSE ---\n{:?} {}\n{}\n{}\n--- /RESPONSE ---",
        version,
        status,
        dump_headers(headers),
        String::from_utf8_lossy(body)
    )
}

fn dump_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        let value = if value.is_sensitive() {
            "<redacted>".into()
        } else {
            String::from_utf8_lossy(value.as_bytes())
        };
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
    use reqwest::Method;
    use url::Url;

    #[test]
    fn test_dump_request_includes_line_headers_and_body() {
        let mut request = Request::new(
            Method::POST,
            Url::parse("http://localhost:3000/api/annotations/").unwrap(),
        );
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(r#"{"text":"deploy"}"#.into());

        let dump = dump_request(&request);
        assert!(dump.starts_with("--- REQUEST ---\nPOST http://localhost:3000/api/annotations/"));
        assert!(dump.contains("content-type: application/json\n"));
        assert!(dump.contains(r#"{"text":"deploy"}"#));
        assert!(dump.ends_with("--- /REQUEST ---"));
    }

    #[test]
    fn test_dump_redacts_sensitive_headers() {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_static("Bearer secret-token");
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let dump = dump_response(StatusCode::OK, Version::HTTP_11, &headers, b"{}");
        assert!(dump.contains("authorization: <redacted>"));
        assert!(!dump.contains("secret-token"));
        assert!(dump.starts_with("--- RESPONSE ---\nHTTP/1.1 200 OK"));
    }

    #[test]
    fn test_closure_logger() {
        use std::sync::{Arc, Mutex};

        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let logger = move |dump: &str| sink.lock().unwrap().push(dump.to_string());

        logger.log("hello");
        assert_eq!(captured.lock().unwrap().as_slice(), ["hello".to_string()]);
    }
}
