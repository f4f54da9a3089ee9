use crate::domain::model::RemoteCallResult;
use crate::utils::error::{InterlinkError, Result};
use crate::utils::validation::{is_dot_segment, require_identifier, validate_url};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Process-wide HTTP handle.
///
/// Cloning is cheap and every clone shares one connection pool, so build a
/// single `Transport` at startup and hand it to each client constructor.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    timeout: Duration,
}

impl Transport {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self> {
        if timeout.is_zero() {
            return Err(InterlinkError::InvalidConfigValueError {
                field: "transport.timeout".to_string(),
                value: format!("{:?}", timeout),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| InterlinkError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Base URL of one peer plus the shared transport. Each typed client wraps one.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    service: &'static str,
    base_url: Url,
    transport: Transport,
}

impl ServiceClient {
    pub fn new(service: &'static str, base_url: &str, transport: &Transport) -> Result<Self> {
        let base_url = validate_url(&format!("services.{}", service), base_url)
            .map_err(|e| InterlinkError::request_build(service, e.to_string()))?;

        Ok(Self {
            service,
            base_url,
            transport: transport.clone(),
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` + `path`, with `id` appended as one percent-encoded segment.
    pub fn endpoint(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                InterlinkError::request_build(self.service, "base URL cannot carry a path")
            })?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                if is_dot_segment(id) {
                    return Err(InterlinkError::request_build(
                        self.service,
                        format!("'{}' is not a usable path segment", id),
                    ));
                }
                segments.push(id);
            }
        }
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        id: Option<&str>,
    ) -> Result<PeerRequest<'_>> {
        Ok(PeerRequest {
            client: self,
            method,
            url: self.endpoint(path, id)?,
            bearer: None,
            body: None,
        })
    }
}

enum RequestBody {
    Json(Vec<u8>),
    Multipart(Form),
}

/// One outbound call, sent exactly once.
pub(crate) struct PeerRequest<'a> {
    client: &'a ServiceClient,
    method: Method,
    url: Url,
    bearer: Option<String>,
    body: Option<RequestBody>,
}

impl PeerRequest<'_> {
    pub(crate) fn bearer(mut self, token: &str) -> Result<Self> {
        require_identifier(self.client.service, "token", token)?;
        self.bearer = Some(token.to_string());
        Ok(self)
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(payload).map_err(|e| {
            InterlinkError::request_build(
                self.client.service,
                format!("failed to serialize request body: {}", e),
            )
        })?;
        self.body = Some(RequestBody::Json(bytes));
        Ok(self)
    }

    pub(crate) fn multipart(mut self, form: Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub(crate) async fn send<T: DeserializeOwned>(self) -> Result<RemoteCallResult<T>> {
        let service = self.client.service;
        let url = self.url.to_string();
        let transport = &self.client.transport;

        let mut request = transport
            .client
            .request(self.method.clone(), self.url)
            .timeout(transport.timeout);

        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        match self.body {
            Some(RequestBody::Json(bytes)) => {
                request = request.header(CONTENT_TYPE, "application/json").body(bytes);
            }
            Some(RequestBody::Multipart(form)) => {
                request = request.multipart(form);
            }
            None => {}
        }

        tracing::debug!("{}: {} {}", service, self.method, url);

        let response = request.send().await.map_err(|source| {
            if source.is_builder() {
                InterlinkError::request_build(service, source.to_string())
            } else {
                InterlinkError::Transport {
                    url: url.clone(),
                    source,
                }
            }
        })?;

        let http_status = response.status().as_u16();
        tracing::debug!("{}: {} {} -> HTTP {}", service, self.method, url, http_status);

        let body = response
            .bytes()
            .await
            .map_err(|source| InterlinkError::Transport {
                url: url.clone(),
                source,
            })?;

        let decode_error = |source| InterlinkError::Decode {
            url: url.clone(),
            http_status,
            source,
        };

        let raw: RemoteCallResult = serde_json::from_slice(&body).map_err(decode_error)?;
        let mut typed = raw.into_typed::<T>().map_err(decode_error)?;
        typed.http_status = Some(http_status);

        Ok(typed)
    }
}
