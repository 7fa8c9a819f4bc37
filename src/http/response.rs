use crate::http::headers::HeaderSet;
use crate::http::request::Version;

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): File or route result
/// - `Forbidden` (403): Path escapes the root or lies in a restricted folder
/// - `NotFound` (404): No such file
/// - `MethodNotAllowed` (405): Method outside the allow-list
/// - `InternalError` (500): Malformed request or failing route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Error
    InternalError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalError => 500,
        }
    }

    /// Returns the reason phrase sent on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::InternalError.reason_phrase(), "Internal Error");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalError => "Internal Error",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// `Content-Length` is not kept in sync with `body` here; whoever finalizes
/// the response before it goes out is responsible for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: Version,
    pub status: StatusCode,
    pub headers: HeaderSet,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hello".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    version: Version,
    status: StatusCode,
    headers: HeaderSet,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new HTTP/1.0 response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::HTTP_10,
            status,
            headers: HeaderSet::new(),
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// Adds a Content-Length header matching the body if none was given.
    pub fn build(mut self) -> Response {
        if !self.headers.contains("Content-Length") {
            self.headers.set("Content-Length", self.body.len().to_string());
        }

        Response {
            version: self.version,
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Creates the generic 500 response sent before closing a connection.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalError)
            .header("Connection", "close")
            .build()
    }

    /// Creates a 500 response carrying a short plain-text explanation.
    pub fn internal_error_with_message(message: &str) -> Self {
        ResponseBuilder::new(StatusCode::InternalError)
            .header("Connection", "close")
            .header("Content-Type", "text/plain")
            .body(message.as_bytes())
            .build()
    }

    pub fn reason_phrase(&self) -> &'static str {
        self.status.reason_phrase()
    }

    /// Serializes the response to wire bytes: status line, header block,
    /// then the body as-is.
    pub fn serialize(&self) -> Vec<u8> {
        let status_line = format!(
            "HTTP/{} {} {}\r\n",
            self.version,
            self.status.as_u16(),
            self.reason_phrase()
        );
        let headers = self.headers.serialize();

        let mut buf = Vec::with_capacity(status_line.len() + headers.len() + self.body.len());
        buf.extend_from_slice(status_line.as_bytes());
        buf.extend_from_slice(headers.as_bytes());
        buf.extend_from_slice(&self.body);
        buf
    }
}
