/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "staticd";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): File found and served
/// - `BadRequest` (400): Malformed or unsupported request
/// - `NotFound` (404): Nothing servable at the requested URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Header block of an outgoing response.
///
/// The writer emits the fields in declaration order; `last_modified` and
/// `connection` are skipped when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: StatusCode,
    pub server: String,
    pub content_type: String,
    pub content_length: usize,
    pub last_modified: Option<String>,
    pub connection: Option<String>,
}

/// A complete response, body fully buffered.
#[derive(Debug)]
pub struct Response {
    pub header: ResponseHeader,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/html")
///     .body(b"<h1>hi</h1>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    last_modified: Option<String>,
    connection: Option<String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/html".to_string(),
            last_modified: None,
            connection: None,
            body: Vec::new(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn last_modified(mut self, value: impl Into<String>) -> Self {
        self.last_modified = Some(value.into());
        self
    }

    /// Sets the `Connection` header; `None` leaves it out.
    pub fn connection(mut self, value: Option<&str>) -> Self {
        self.connection = value.map(str::to_string);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` always comes from the body length.
    pub fn build(self) -> Response {
        Response {
            header: ResponseHeader {
                status: self.status,
                server: SERVER_NAME.to_string(),
                content_type: self.content_type,
                content_length: self.body.len(),
                last_modified: self.last_modified,
                connection: self.connection,
            },
            body: self.body,
        }
    }
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.header.status
    }

    /// 400 response. `close` adds `Connection: close`.
    pub fn bad_request(close: bool) -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .connection(close.then_some("close"))
            .body(b"<h1>Bad Request</h1>".to_vec())
            .build()
    }

    /// 404 response naming the URL that was asked for.
    pub fn not_found(url: &str, close: bool) -> Self {
        let body = format!(
            "<h1>File Not Found</h1>\n<p>The requested file \"{}\" does not exist</p>\n",
            url
        );
        ResponseBuilder::new(StatusCode::NotFound)
            .connection(close.then_some("close"))
            .body(body.into_bytes())
            .build()
    }
}
