use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Proxy};
use std::time::Duration;

/// Header carrying the client-generated correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Form upload; the default JSON content type is not sent.
    Multipart(MultipartPayload),
}

impl RequestBody {
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Rebuildable multipart payload.
///
/// `reqwest::multipart::Form` is consumed on send, so the parts are kept here
/// and a fresh form is built for every attempt.
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

#[derive(Debug, Clone)]
struct FilePart {
    field: String,
    file_name: String,
    mime: Option<String>,
    bytes: Bytes,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
        mime: Option<&str>,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.map(str::to_string),
            bytes: bytes.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }

    fn to_form(&self) -> std::result::Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &self.files {
            let mut part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
                .file_name(file.file_name.clone());
            if let Some(mime) = &file.mime {
                part = part
                    .mime_str(mime)
                    .map_err(|e| TransportError::Body(format!("invalid mime {}: {}", mime, e)))?;
            }
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

/// One attempt's worth of request data.
#[derive(Debug, Clone, Copy)]
pub struct Outgoing<'a> {
    pub method: &'a Method,
    /// Path relative to the base URL, or an absolute `http(s)://` URL.
    pub endpoint: &'a str,
    pub query: &'a [(String, String)],
    pub body: &'a RequestBody,
    pub access_token: Option<&'a str>,
    pub request_id: &'a str,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    auth_scheme: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(config.pool_idle_timeout_secs)))
            .user_agent(concat!("physio-client/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_scheme: config.auth_scheme.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Send a single attempt. Any HTTP status counts as success here; only a
    /// missing response is an error.
    pub async fn send(
        &self,
        out: Outgoing<'_>,
    ) -> std::result::Result<reqwest::Response, TransportError> {
        let url = self.url_for(out.endpoint);
        let mut req = self
            .client
            .request(out.method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, out.request_id);

        if !out.query.is_empty() {
            req = req.query(out.query);
        }

        if let Some(token) = out.access_token {
            req = req.header(AUTHORIZATION, format!("{} {}", self.auth_scheme, token));
        }

        req = match out.body {
            RequestBody::Empty => req.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => req.json(value),
            RequestBody::Multipart(payload) => req.multipart(payload.to_form()?),
        };

        Ok(req.send().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request body error: {0}")]
    Body(String),
}

impl TransportError {
    /// True when the request may have left but no response came back.
    pub fn is_network(&self) -> bool {
        match self {
            TransportError::Http(e) => !e.is_builder(),
            TransportError::Body(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ClientConfig {
            base_url: base.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_for() {
        let t = transport("http://localhost:12000/api/");
        assert_eq!(t.base_url(), "http://localhost:12000/api");
        assert_eq!(t.url_for("/users/me/"), "http://localhost:12000/api/users/me/");
        assert_eq!(t.url_for("books/"), "http://localhost:12000/api/books/");
        assert_eq!(
            t.url_for("http://localhost:12000/api-token-auth/"),
            "http://localhost:12000/api-token-auth/"
        );
    }

    #[test]
    fn test_multipart_payload_builds_repeatedly() {
        let payload = MultipartPayload::new()
            .text("conversation", "3")
            .file("file", "scan.pdf", Bytes::from_static(b"%PDF"), Some("application/pdf"));
        assert!(!payload.is_empty());
        assert!(payload.to_form().is_ok());
        assert!(payload.to_form().is_ok());
        assert!(RequestBody::Multipart(payload).is_multipart());
    }

    #[test]
    fn test_invalid_mime_is_body_error() {
        let payload = MultipartPayload::new().file("file", "x", Bytes::new(), Some("not a mime"));
        let err = payload.to_form().unwrap_err();
        assert!(!err.is_network());
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let res = HttpTransport::new(&ClientConfig {
            proxy_url: Some("::not a proxy::".into()),
            ..ClientConfig::default()
        });
        assert!(res.is_err());
    }
}
