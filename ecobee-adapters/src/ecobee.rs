//! ecobee adapter using the thermostat REST API.
//!
//! This adapter fetches thermostats by querying `GET /1/thermostat`, passing
//! the selection as a JSON `body` query parameter and authenticating with a
//! bearer access token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ecobee_adapters::ecobee::EcobeeAdapter;
//! use ecobee_adapters::Selection;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = EcobeeAdapter::builder()
//!         .endpoint("https://api.ecobee.com")
//!         .access_token("my-access-token")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     for thermostat in adapter.fetch_thermostats(&Selection::registered()).await? {
//!         println!("{}: connected={}", thermostat.name, thermostat.is_connected());
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use ecobee_types::{Selection, Thermostat, ThermostatResponse};

use crate::AdapterError;

/// Adapter for fetching thermostats from the ecobee cloud API.
#[derive(Debug, Clone)]
pub struct EcobeeAdapter {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl EcobeeAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> EcobeeAdapterBuilder {
        EcobeeAdapterBuilder::default()
    }

    /// The API endpoint this adapter queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch every thermostat matching the selection, following pages.
    pub async fn fetch_thermostats(
        &self,
        selection: &Selection,
    ) -> Result<Vec<Thermostat>, AdapterError> {
        let mut thermostats = Vec::new();
        let mut page = 1;

        loop {
            let response = self.fetch_page(selection, page).await?;
            thermostats.extend(response.thermostat_list);

            let Some(p) = response.page else { break };
            // A page number of 0 means the server left it out.
            if p.page != 0 && p.page != page {
                return Err(AdapterError::Parse(format!(
                    "requested page {} but got page {} of {}",
                    page, p.page, p.total_pages
                )));
            }
            if page >= p.total_pages {
                break;
            }
            page += 1;
        }

        debug!(count = thermostats.len(), "fetched thermostats");
        Ok(thermostats)
    }

    async fn fetch_page(
        &self,
        selection: &Selection,
        page: u32,
    ) -> Result<ThermostatResponse, AdapterError> {
        let url = format!("{}/1/thermostat", self.endpoint);
        let body = request_body(selection, page)?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("format", "json"), ("body", body.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Invalid or expired access token".to_string()));
        }

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // API failures carry a status object in the body
            if let Ok(parsed) = serde_json::from_str::<ThermostatResponse>(&text) {
                check_status(&parsed)?;
            }
            return Err(AdapterError::Http(format!(
                "API returned status {}",
                status
            )));
        }

        let parsed: ThermostatResponse = serde_json::from_str(&text)?;
        check_status(&parsed)?;
        Ok(parsed)
    }
}

fn check_status(response: &ThermostatResponse) -> Result<(), AdapterError> {
    if response.status.is_ok() {
        Ok(())
    } else {
        Err(AdapterError::Api {
            code: response.status.code,
            message: response.status.message.clone(),
        })
    }
}

/// Builder for EcobeeAdapter.
#[derive(Debug, Default)]
pub struct EcobeeAdapterBuilder {
    endpoint: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
}

impl EcobeeAdapterBuilder {
    /// Set the API endpoint (default: "https://api.ecobee.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the OAuth access token sent as a bearer token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<EcobeeAdapter, AdapterError> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AdapterError::Auth("No access token configured".to_string()))?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Http(e.to_string()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "https://api.ecobee.com".to_string());

        Ok(EcobeeAdapter {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token,
        })
    }
}

#[derive(Debug, Serialize)]
struct ThermostatRequest<'a> {
    selection: &'a Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<PageRequest>,
}

#[derive(Debug, Serialize)]
struct PageRequest {
    page: u32,
}

// JSON passed in the `body` query parameter
fn request_body(selection: &Selection, page: u32) -> Result<String, AdapterError> {
    let request = ThermostatRequest {
        selection,
        page: (page > 1).then_some(PageRequest { page }),
    };
    Ok(serde_json::to_string(&request)?)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let adapter = EcobeeAdapter::builder()
            .access_token("token")
            .build()
            .unwrap();
        assert_eq!(adapter.endpoint, "https://api.ecobee.com");
        assert_eq!(adapter.access_token, "token");
    }

    #[test]
    fn test_builder_custom() {
        let adapter = EcobeeAdapter::builder()
            .endpoint("http://localhost:8080/")
            .access_token("abc")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert_eq!(adapter.endpoint(), "http://localhost:8080");
        assert_eq!(adapter.access_token, "abc");
    }

    #[test]
    fn test_builder_requires_token() {
        let err = EcobeeAdapter::builder().build().unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));

        let err = EcobeeAdapter::builder().access_token("").build().unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));
    }

    #[test]
    fn test_request_body_first_page() {
        let body = request_body(&Selection::registered(), 1).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["selection"]["selectionType"], "registered");
        assert_eq!(json["selection"]["includeSensors"], true);
        assert!(json.get("page").is_none());
    }

    #[test]
    fn test_check_status() {
        let ok = ThermostatResponse::default();
        assert!(check_status(&ok).is_ok());

        let mut failed = ThermostatResponse::default();
        failed.status.code = 16;
        failed.status.message = "Authorization has been revoked".to_string();
        match check_status(&failed) {
            Err(AdapterError::Api { code, .. }) => assert_eq!(code, 16),
            other => panic!("unexpected: {:?}", other),
        }
    }

    /// Serve one canned body per request, chosen by the request's index.
    async fn stub_api<F>(respond: F) -> (String, Arc<AtomicUsize>)
    where
        F: Fn(usize) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();

        tokio::spawn(async move {
            loop {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }

                let body = respond(counter.fetch_add(1, Ordering::SeqCst));
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        (endpoint, requests)
    }

    fn adapter(endpoint: &str) -> EcobeeAdapter {
        EcobeeAdapter::builder()
            .endpoint(endpoint)
            .access_token("token")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_follows_pages() {
        let (endpoint, requests) = stub_api(|i| {
            format!(
                r#"{{"page": {{"page": {}, "totalPages": 3}}, "thermostatList": [{{"identifier": "t{}"}}]}}"#,
                i + 1,
                i
            )
        })
        .await;

        let thermostats = adapter(&endpoint)
            .fetch_thermostats(&Selection::registered())
            .await
            .unwrap();

        let ids: Vec<&str> = thermostats.iter().map(|t| t.identifier.as_str()).collect();
        assert_eq!(ids, ["t0", "t1", "t2"]);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_stops_without_page_number() {
        let (endpoint, requests) = stub_api(|_| {
            r#"{"page": {"totalPages": 2}, "thermostatList": [{"identifier": "a"}]}"#.to_string()
        })
        .await;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            adapter(&endpoint).fetch_thermostats(&Selection::registered()),
        )
        .await
        .expect("paging did not terminate");

        assert_eq!(result.unwrap().len(), 2);
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_rejects_repeated_page() {
        let (endpoint, requests) = stub_api(|_| {
            r#"{"page": {"page": 1, "totalPages": 2}, "thermostatList": []}"#.to_string()
        })
        .await;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            adapter(&endpoint).fetch_thermostats(&Selection::registered()),
        )
        .await
        .expect("paging did not terminate");

        assert!(matches!(result, Err(AdapterError::Parse(_))));
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_request_body_later_page() {
        let body = request_body(&Selection::registered(), 3).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["page"]["page"], 3);
    }
}
