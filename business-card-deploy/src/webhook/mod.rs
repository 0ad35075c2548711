//! Completion webhook.
//!
//! After a successful publish, `{"repo": "<owner>/<name>"}` is POSTed to the
//! configured endpoint. The request runs as a detached task: the deploy does
//! not wait for it, and its failure never undoes the publish. Callers that
//! want the result hold on to the [`Notification`] and [`settle`] it.
//!
//! There is no retry and no timeout.
//!
//! [`settle`]: Notification::settle

mod error;
mod payload;

pub use error::WebhookError;
pub use payload::WebhookPayload;

use reqwest::{Client, StatusCode};
use tokio::task::JoinHandle;
use tracing::{error, info};
use url::Url;

/// A webhook URL that passed the strict `https://<host><path>` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    host: String,
    path: String,
    url: Url,
}

impl WebhookEndpoint {
    /// Parses `raw` as `https://<host><path>`.
    ///
    /// The host is everything up to the first `/` after the scheme and must be
    /// non-empty; it may carry an explicit port. The path must start with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidUrl`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let rest = raw
            .strip_prefix("https://")
            .ok_or(WebhookError::InvalidUrl)?;
        let (host, path) = rest
            .find('/')
            .map(|i| rest.split_at(i))
            .ok_or(WebhookError::InvalidUrl)?;
        if host.is_empty() {
            return Err(WebhookError::InvalidUrl);
        }

        let url = Url::parse(&format!("https://{host}{path}"))
            .map_err(|_| WebhookError::InvalidUrl)?;

        Ok(Self {
            host: host.to_string(),
            path: path.to_string(),
            url,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host the request is actually sent to, as the URL parser sees it.
    pub fn target_host(&self) -> &str {
        self.url.host_str().unwrap_or(&self.host)
    }
}

/// POSTs `payload` to `endpoint`.
///
/// # Errors
///
/// Returns [`WebhookError::Transport`] if the request fails and
/// [`WebhookError::Status`] unless the endpoint answers 200.
pub async fn notify(
    client: &Client,
    endpoint: &WebhookEndpoint,
    payload: &WebhookPayload,
) -> Result<(), WebhookError> {
    let response = client
        .post(endpoint.url().clone())
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(WebhookError::Status(status.as_u16()));
    }
    Ok(())
}

/// A webhook request running in the background.
#[derive(Debug)]
pub struct PendingNotification {
    payload: WebhookPayload,
    handle: JoinHandle<Result<(), WebhookError>>,
}

impl PendingNotification {
    /// Starts the request on the current tokio runtime.
    fn spawn(endpoint: WebhookEndpoint, payload: WebhookPayload) -> Self {
        let body = payload.clone();
        let handle = tokio::spawn(async move {
            let result = notify(&Client::new(), &endpoint, &body).await;
            match &result {
                Ok(()) => info!(host = %endpoint.target_host(), "Webhook delivered"),
                Err(e) => error!(host = %endpoint.target_host(), error = %e, "Webhook failed"),
            }
            result
        });
        Self { payload, handle }
    }

    /// Body being sent.
    pub fn payload(&self) -> &WebhookPayload {
        &self.payload
    }

    /// Waits for the request to finish.
    pub async fn wait(self) -> Result<(), WebhookError> {
        self.handle
            .await
            .map_err(|e| WebhookError::Aborted(e.to_string()))?
    }
}

/// State of the completion notification for a run.
#[derive(Debug)]
pub enum Notification {
    /// No webhook URL was configured.
    NotConfigured,

    /// The configured URL was malformed; no request was made.
    Rejected(WebhookError),

    /// The request is in flight.
    Dispatched(PendingNotification),
}

impl Notification {
    /// Fires the webhook for `repo` if a URL is configured.
    ///
    /// Returns immediately; the request itself runs in the background.
    #[must_use]
    pub fn dispatch(url: Option<&str>, repo: &str) -> Self {
        let Some(url) = url else {
            info!("Skip calling onDone webhook.");
            return Self::NotConfigured;
        };

        match WebhookEndpoint::parse(url) {
            Ok(endpoint) => {
                info!(host = %endpoint.target_host(), "Calling onDone webhook");
                Self::Dispatched(PendingNotification::spawn(
                    endpoint,
                    WebhookPayload::new(repo),
                ))
            }
            Err(e) => {
                error!(error = %e, "Not calling onDone webhook");
                Self::Rejected(e)
            }
        }
    }

    /// Returns the body of a dispatched request.
    #[must_use]
    pub fn payload(&self) -> Option<&WebhookPayload> {
        match self {
            Self::Dispatched(pending) => Some(pending.payload()),
            _ => None,
        }
    }

    /// Waits for the outcome of the notification.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] that made the notification fail.
    pub async fn settle(self) -> Result<(), WebhookError> {
        match self {
            Self::NotConfigured => Ok(()),
            Self::Rejected(e) => Err(e),
            Self::Dispatched(pending) => pending.wait().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with `status` and returns the raw request.
    async fn serve_once(status: &'static str) -> (WebhookEndpoint, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(request).unwrap()
        });

        let host = addr.to_string();
        let endpoint = WebhookEndpoint {
            url: Url::parse(&format!("http://{host}/hook")).unwrap(),
            host,
            path: "/hook".to_string(),
        };
        (endpoint, server)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= length
    }

    #[tokio::test]
    async fn only_200_counts_as_delivered() {
        let payload = WebhookPayload::new("owner/repo");

        for (status, expected) in [
            ("500 Internal Server Error", Some(500)),
            ("201 Created", Some(201)),
            ("200 OK", None),
        ] {
            let (endpoint, server) = serve_once(status).await;

            let result = notify(&Client::new(), &endpoint, &payload).await;
            let request = server.await.unwrap();

            match expected {
                Some(code) => assert!(
                    matches!(result, Err(WebhookError::Status(c)) if c == code),
                    "{status}: {result:?}"
                ),
                None => assert!(result.is_ok(), "{status}: {result:?}"),
            }
            assert!(request.starts_with("POST /hook HTTP/1.1"));
            assert!(request
                .lines()
                .any(|l| l.eq_ignore_ascii_case("content-type: application/json")));
            assert!(request.ends_with("\r\n\r\n{\"repo\":\"owner/repo\"}"));
        }
    }

    #[test]
    fn parses_https_url() {
        let endpoint = WebhookEndpoint::parse("https://hooks.example.com/deploy/done?x=1").unwrap();

        assert_eq!(endpoint.host(), "hooks.example.com");
        assert_eq!(endpoint.path(), "/deploy/done?x=1");
        assert_eq!(endpoint.url().port_or_known_default(), Some(443));
    }

    #[test]
    fn keeps_explicit_port() {
        let endpoint = WebhookEndpoint::parse("https://localhost:8443/hook").unwrap();

        assert_eq!(endpoint.host(), "localhost:8443");
        assert_eq!(endpoint.url().port(), Some(8443));
    }

    #[test]
    fn logs_host_seen_by_url_parser() {
        let endpoint = WebhookEndpoint::parse("https://h?q/x").unwrap();

        assert_eq!(endpoint.host(), "h?q");
        assert_eq!(endpoint.target_host(), "h");
    }

    #[test]
    fn rejects_urls_outside_strict_form() {
        for raw in [
            "",
            "http://example.com/hook",
            "https://example.com",
            "https:///hook",
            "ftp://example.com/hook",
            "see https://example.com/hook",
            "https://exa mple.com/hook",
        ] {
            assert!(
                matches!(WebhookEndpoint::parse(raw), Err(WebhookError::InvalidUrl)),
                "{raw} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn unconfigured_webhook_settles_ok() {
        let notification = Notification::dispatch(None, "owner/repo");

        assert!(matches!(notification, Notification::NotConfigured));
        assert!(notification.payload().is_none());
        assert!(notification.settle().await.is_ok());
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_without_request() {
        let notification = Notification::dispatch(Some("http://example.com/hook"), "owner/repo");

        assert!(matches!(
            notification,
            Notification::Rejected(WebhookError::InvalidUrl)
        ));
        let error = notification.settle().await.unwrap_err();
        assert_eq!(error.to_string(), "Invalid webhook url.");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_transport_error() {
        // Nothing listens on the discard port.
        let notification = Notification::dispatch(Some("https://127.0.0.1:9/hook"), "owner/repo");

        assert!(matches!(notification, Notification::Dispatched(_)));
        assert_eq!(
            notification.payload(),
            Some(&WebhookPayload::new("owner/repo"))
        );
        let error = notification.settle().await.unwrap_err();
        assert!(matches!(error, WebhookError::Transport(_)));
    }
}
