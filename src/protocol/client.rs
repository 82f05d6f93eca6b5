/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::properties::DocumentType;
use crate::protocol::xml::Element;
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::{Display, IntoStaticStr};
use url::Url;

/// Service document of the authenticated user
pub const DEFAULT_SERVICE_URL: &str = "http://api-fotki.yandex.ru/api/me/";

/// HTTP methods used by the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Method {
    #[strum(serialize = "GET")]
    Get,
    #[strum(serialize = "POST")]
    Post,
    #[strum(serialize = "PUT")]
    Put,
    #[strum(serialize = "DELETE")]
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub content_type: Option<DocumentType>,
    pub body: Option<Bytes>,
}

/// Carries out requests for the protocol layer.
///
/// Implementations must return the response body for any 2xx status and
/// [`FotkiError::HttpStatus`] otherwise.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn request(&self, request: Request) -> Result<Bytes, FotkiError>;
}

/// OAuth token used to authorize requests
#[derive(Default, Clone, Deserialize)]
pub struct Creds {
    token: String,
}

impl Creds {
    pub fn from_token(token: &str) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds").field("token", &"xxx").finish()
    }
}

/// Client settings. Can be deserialized or read from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_url")]
    pub service_url: String,

    #[serde(default)]
    pub creds: Option<Creds>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            creds: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Reads `FOTKI_SERVICE_URL`, `FOTKI_OAUTH_TOKEN` and `FOTKI_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, FotkiError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("FOTKI_SERVICE_URL") {
            Url::parse(&url)?;
            config.service_url = url;
        }
        if let Ok(token) = std::env::var("FOTKI_OAUTH_TOKEN") {
            config.creds = Some(Creds::from_token(&token));
        }
        if let Ok(timeout) = std::env::var("FOTKI_TIMEOUT_SECS") {
            let secs = timeout
                .parse::<u64>()
                .map_err(|_| FotkiError::Config("FOTKI_TIMEOUT_SECS", timeout.clone()))?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }
}

/// [`Transport`] talking to the service over HTTP.
#[derive(Default, Clone)]
pub struct HttpClient {
    creds: Option<Creds>,
    https_client: reqwest::Client,
}

impl HttpClient {
    pub fn new(creds: Option<Creds>) -> Self {
        Self {
            creds,
            https_client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FotkiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            creds: config.creds.clone(),
            https_client: builder.build()?,
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("creds", &self.creds)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, request: Request) -> Result<Bytes, FotkiError> {
        let url = request.url.to_string();
        let mut req = self
            .https_client
            .request(request.method.into(), request.url);
        if let Some(creds) = &self.creds {
            req = req.header(reqwest::header::AUTHORIZATION, format!("OAuth {}", creds.token));
        }
        if let Some(content_type) = request.content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type.content_type());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FotkiError::HttpStatus(status.as_u16(), url));
        }
        Ok(resp.bytes().await?)
    }
}

/// Handle used by every resource to talk to the service.
///
/// Cloning is cheap; all clones share one transport.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client using HTTP with the given credentials
    pub fn new(creds: Creds) -> Self {
        Self::with_transport(Arc::new(HttpClient::new(Some(creds))))
    }

    pub fn from_config(config: &Config) -> Result<Self, FotkiError> {
        Ok(Self::with_transport(Arc::new(HttpClient::from_config(
            config,
        )?)))
    }

    /// Creates a client on top of any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetches the raw document at `url`
    pub async fn get_document(&self, url: &str) -> Result<Bytes, FotkiError> {
        debug!("GET {}", url);
        self.transport
            .request(Request {
                method: Method::Get,
                url: Url::parse(url)?,
                content_type: None,
                body: None,
            })
            .await
    }

    /// Fetches and parses the document at `url`, returning its root element
    pub async fn get_element(&self, url: &str) -> Result<Element, FotkiError> {
        let document = self.get_document(url).await?;
        Element::parse(&document)
    }

    /// Sends a document to `url` and returns the response body
    pub async fn send_document(
        &self,
        method: Method,
        document_type: DocumentType,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes, FotkiError> {
        debug!("{} {} ({})", method, url, document_type.content_type());
        self.transport
            .request(Request {
                method,
                url: Url::parse(url)?,
                content_type: Some(document_type),
                body,
            })
            .await
    }
}
