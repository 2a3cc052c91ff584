use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sha1::{Digest, Sha1};

use super::{HttpRequest, HttpTransport, Method, SmsError};
use crate::domain::{Endpoint, ValidationError};

const AUTH_TIME_PATH: &str = "/auth/time";
const APPLICATION_KEY_PARAMETER: &str = "Application key";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Signed HTTP access to the API.
///
/// Every request carries the application key; when a consumer key is configured the
/// request is also signed with the application secret. The signature embeds a
/// timestamp aligned on the server clock, so the offset to `GET /auth/time` is
/// fetched on first use and cached for the lifetime of the connection.
pub struct Connection {
    application_key: String,
    application_secret: String,
    consumer_key: String,
    endpoint: Endpoint,
    http: Arc<dyn HttpTransport>,
    time_delta: Mutex<Option<i64>>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("application_key", &self.application_key)
            .field("consumer_key", &self.consumer_key)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Connection {
    pub(super) fn new(
        application_key: String,
        application_secret: String,
        consumer_key: String,
        endpoint: Endpoint,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            application_key,
            application_secret,
            consumer_key,
            endpoint,
            http,
            time_delta: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Perform a call and decode the JSON answer.
    ///
    /// An empty response body decodes to [`serde_json::Value::Null`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, SmsError> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| SmsError::Parse(Box::new(err)))?;
        let raw = self.call_raw(method, path, &[], body).await?;
        if raw.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&raw).map_err(|err| SmsError::Parse(Box::new(err)))
    }

    /// Offset in seconds between the server clock and the local clock.
    pub async fn time_delta(&self) -> Result<i64, SmsError> {
        let cached = *self.lock_time_delta();
        if let Some(delta) = cached {
            return Ok(delta);
        }

        let url = format!("{}{}", self.endpoint.as_str(), AUTH_TIME_PATH);
        let response = self
            .http
            .send(HttpRequest {
                method: Method::Get,
                url,
                headers: Vec::new(),
                body: None,
            })
            .await
            .map_err(SmsError::Transport)?;
        let body = check_status(response.status, response.body)?;
        let server_time = crate::transport::decode_server_time_json_response(&body)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        let delta = server_time - Utc::now().timestamp();
        tracing::debug!(delta, "synchronised with server clock");
        *self.lock_time_delta() = Some(delta);
        Ok(delta)
    }

    /// Send a request with a pre-encoded JSON body and return the raw response body.
    pub(crate) async fn call_raw(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<String, SmsError> {
        if self.application_key.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: APPLICATION_KEY_PARAMETER,
            }
            .into());
        }

        let url = self.build_url(path, query)?;
        let mut headers = vec![
            ("Content-Type", CONTENT_TYPE.to_owned()),
            ("X-Ovh-Application", self.application_key.clone()),
        ];

        if !self.consumer_key.is_empty() {
            let timestamp = Utc::now().timestamp() + self.time_delta().await?;
            let signature = signature(
                &self.application_secret,
                &self.consumer_key,
                method,
                &url,
                body.as_deref().unwrap_or_default(),
                timestamp,
            );
            headers.push(("X-Ovh-Consumer", self.consumer_key.clone()));
            headers.push(("X-Ovh-Timestamp", timestamp.to_string()));
            headers.push(("X-Ovh-Signature", signature));
        }

        tracing::debug!(%method, %url, "sending request");
        let response = self
            .http
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(SmsError::Transport)?;
        tracing::debug!(%method, path, status = response.status, "received response");

        check_status(response.status, response.body)
    }

    fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<String, SmsError> {
        let raw = format!("{}{}", self.endpoint.as_str(), path);
        if query.is_empty() {
            return Ok(raw);
        }
        let mut url = url::Url::parse(&raw).map_err(|err| SmsError::Parse(Box::new(err)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url.into())
    }

    fn lock_time_delta(&self) -> std::sync::MutexGuard<'_, Option<i64>> {
        // The cached value is a plain integer; a poisoned lock still holds a usable one.
        self.time_delta
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn check_status(status: u16, body: String) -> Result<String, SmsError> {
    if (200..=299).contains(&status) {
        return Ok(body);
    }

    tracing::warn!(status, "request failed");
    if let Some(message) = crate::transport::decode_api_error_message(&body) {
        return Err(SmsError::Api { status, message });
    }
    let body = if body.trim().is_empty() {
        None
    } else {
        Some(body)
    };
    Err(SmsError::HttpStatus { status, body })
}

/// `$1$` followed by the hex SHA-1 of the `+`-joined request fingerprint.
fn signature(
    application_secret: &str,
    consumer_key: &str,
    method: Method,
    url: &str,
    body: &str,
    timestamp: i64,
) -> String {
    let data = format!(
        "{application_secret}+{consumer_key}+{}+{url}+{body}+{timestamp}",
        method.as_str()
    );
    let mut hasher = Sha1::new();
    hasher.update(data.as_bytes());
    format!("$1${}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::super::fake::{FakeTransport, SERVER_TIME};
    use super::*;

    fn connection(transport: &FakeTransport, consumer_key: &str) -> Connection {
        Connection::new(
            "app_key".to_owned(),
            "secret".to_owned(),
            consumer_key.to_owned(),
            Endpoint::new("https://eu.api.ovh.com/1.0").unwrap(),
            transport.clone().into_transport(),
        )
    }

    #[test]
    fn signature_matches_known_vectors() {
        assert_eq!(
            signature(
                "secret",
                "consumer",
                Method::Get,
                "https://eu.api.ovh.com/1.0/sms",
                "",
                1_700_000_000
            ),
            "$1$8219b587f836ad526421cb361e3ff8cfda0d52ca"
        );
        assert_eq!(
            signature(
                "secret",
                "consumer",
                Method::Post,
                "https://eu.api.ovh.com/1.0/sms/sms-ab1-1/senders",
                r#"{"sender":"ACME"}"#,
                1_700_000_000
            ),
            "$1$4b4a1ab9208d0db2f975137fc46fc8ebfcaf507a"
        );
    }

    #[tokio::test]
    async fn signed_call_sends_ovh_headers() {
        let transport = FakeTransport::new().route(Method::Get, "/sms", 200, r#"["sms-ab1-1"]"#);
        let conn = connection(&transport, "consumer");

        let value = conn.call(Method::Get, "/sms", None).await.unwrap();
        assert_eq!(value, serde_json::json!(["sms-ab1-1"]));

        let requests = transport.api_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://eu.api.ovh.com/1.0/sms");
        assert_eq!(request.header("X-Ovh-Application"), Some("app_key"));
        assert_eq!(request.header("X-Ovh-Consumer"), Some("consumer"));

        let timestamp: i64 = request.header("X-Ovh-Timestamp").unwrap().parse().unwrap();
        assert!((timestamp - SERVER_TIME).abs() < 60);
        assert_eq!(
            request.header("X-Ovh-Signature"),
            Some(
                signature(
                    "secret",
                    "consumer",
                    Method::Get,
                    "https://eu.api.ovh.com/1.0/sms",
                    "",
                    timestamp
                )
                .as_str()
            )
        );
    }

    #[tokio::test]
    async fn time_delta_is_fetched_once() {
        let transport = FakeTransport::new().route(Method::Get, "/sms", 200, "[]");
        let conn = connection(&transport, "consumer");

        conn.call(Method::Get, "/sms", None).await.unwrap();
        conn.call(Method::Get, "/sms", None).await.unwrap();

        let time_calls = transport
            .requests()
            .iter()
            .filter(|request| request.url.ends_with("/auth/time"))
            .count();
        assert_eq!(time_calls, 1);
    }

    #[tokio::test]
    async fn call_without_consumer_key_is_unsigned() {
        let transport = FakeTransport::new().route(Method::Get, "/sms", 200, "[]");
        let conn = connection(&transport, "");

        conn.call(Method::Get, "/sms", None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("X-Ovh-Signature"), None);
        assert_eq!(requests[0].header("X-Ovh-Application"), Some("app_key"));
    }

    #[tokio::test]
    async fn empty_application_key_is_rejected_before_sending() {
        let transport = FakeTransport::new();
        let conn = Connection::new(
            String::new(),
            String::new(),
            String::new(),
            Endpoint::new("ovh-eu").unwrap(),
            transport.clone().into_transport(),
        );

        let err = conn.call(Method::Get, "/sms", None).await.unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::Empty {
                field: "Application key"
            })
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn query_params_are_url_encoded() {
        let transport = FakeTransport::new().route(Method::Get, "/incoming", 200, "[]");
        let conn = connection(&transport, "");

        let query = vec![("sender".to_owned(), "+33612345678".to_owned())];
        conn.call_raw(Method::Get, "/sms/sms-ab1-1/incoming", &query, None)
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://eu.api.ovh.com/1.0/sms/sms-ab1-1/incoming?sender=%2B33612345678"
        );
    }

    #[tokio::test]
    async fn error_bodies_map_to_api_or_http_errors() {
        let transport = FakeTransport::new()
            .route(
                Method::Get,
                "/forbidden",
                403,
                r#"{"message": "This call has not been granted"}"#,
            )
            .route(Method::Get, "/down", 503, "   ");
        let conn = connection(&transport, "consumer");

        match conn.call(Method::Get, "/forbidden", None).await.unwrap_err() {
            SmsError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "This call has not been granted");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            conn.call(Method::Get, "/down", None).await.unwrap_err(),
            SmsError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn empty_success_body_decodes_to_null() {
        let transport = FakeTransport::new().route(Method::Delete, "/sms/x/incoming/1", 200, "");
        let conn = connection(&transport, "consumer");

        let value = conn
            .call(Method::Delete, "/sms/x/incoming/1", None)
            .await
            .unwrap();
        assert_eq!(value, serde_json::Value::Null);
    }
}
