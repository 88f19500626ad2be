use thiserror::Error;

/// The only method the server answers.
pub const SUPPORTED_METHOD: &str = "GET";
/// The only protocol version the server answers.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// Why a fully framed request was rejected before file lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Host not provided in request header")]
    MissingHost,
    #[error("URL must start with a forward slash: {0:?}")]
    InvalidUrl(String),
    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),
    #[error("unsupported HTTP version: {0:?}")]
    UnsupportedVersion(String),
}

/// A request as framed from the wire.
///
/// `method`, `url` and `version` are the raw fields of the request line.
/// Only the `Host` and `Connection` headers are retained; everything else is
/// accepted and dropped by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Request method, e.g. "GET"
    pub method: String,
    /// Requested URL, e.g. "/index.html"
    pub url: String,
    /// Protocol version, e.g. "HTTP/1.1"
    pub version: String,
    /// Raw value of the Host header, empty if absent
    pub host: String,
    /// Trimmed value of the Connection header, empty if absent
    pub connection: String,
}

impl RequestHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the client asked for `Connection: close`.
    ///
    /// The comparison is case-sensitive: `Close` keeps the connection open.
    pub fn is_connection_close(&self) -> bool {
        self.connection == "close"
    }

    /// Checks the request is something the server will try to serve.
    ///
    /// Rules are applied in order: non-empty Host, URL beginning with `/`,
    /// method `GET`, version `HTTP/1.1`.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.host.is_empty() {
            return Err(RequestError::MissingHost);
        }
        if !self.url.starts_with('/') {
            return Err(RequestError::InvalidUrl(self.url.clone()));
        }
        if self.method != SUPPORTED_METHOD {
            return Err(RequestError::UnsupportedMethod(self.method.clone()));
        }
        if self.version != SUPPORTED_VERSION {
            return Err(RequestError::UnsupportedVersion(self.version.clone()));
        }
        Ok(())
    }
}
