//! Reqwest-backed API transport.
//!
//! This adapter owns transport details only: URL joining, JSON request
//! bodies, and mapping connection failures. Status handling belongs to the
//! auth-error interceptor, so every status is returned as a response.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::domain::ClientError;
use crate::domain::ports::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};

/// Transport that sends requests relative to one backend base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport for `base_url` with a default reqwest client.
    ///
    /// ```rust,ignore
    /// let transport = ReqwestTransport::new(Url::parse("http://127.0.0.1:8082")?)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a transport around an existing client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| {
                ClientError::invalid_input(format!("invalid request path '{path}': {error}"))
            })
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&request.path)?;
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(path = %request.path, status, bytes = body.len(), "API response received");
        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::transport(format!("request timed out: {error}"))
    } else {
        ClientError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for URL resolution.

    use super::*;
    use rstest::rstest;

    fn transport(base: &str) -> ReqwestTransport {
        ReqwestTransport::with_client(Client::new(), Url::parse(base).expect("valid base"))
    }

    #[rstest]
    #[case("http://127.0.0.1:8082", "/signin", "http://127.0.0.1:8082/signin")]
    #[case("http://127.0.0.1:8082/", "/signin", "http://127.0.0.1:8082/signin")]
    #[case(
        "https://api.example.test/v1",
        "/api/maintenance-center/4",
        "https://api.example.test/v1/api/maintenance-center/4"
    )]
    fn joins_paths_under_the_base(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let url = transport(base).endpoint(path).expect("path joins");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn base_path_gains_a_trailing_slash() {
        assert_eq!(
            transport("https://api.example.test/v1").base_url().path(),
            "/v1/"
        );
    }

    #[tokio::test]
    async fn connection_refusal_maps_to_transport_errors() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let addr = listener.local_addr().expect("probe addr");
        drop(listener);
        let transport = transport(&format!("http://{addr}"));

        let err = transport
            .send(&ApiRequest::get("/api/maintenance-centers"))
            .await
            .expect_err("closed port must fail");
        assert!(matches!(err, ClientError::Transport { .. }));
    }
}
