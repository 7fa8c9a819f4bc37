use std::collections::HashMap;
use std::fmt;

use crate::http::headers::HeaderSet;
use crate::http::parser::ParseError;

/// Query parameters of a request target, by name.
pub type QueryParams = HashMap<String, String>;

/// HTTP request methods.
///
/// The request-line grammar admits any token of three to seven uppercase
/// letters, so methods the server has never heard of are carried as
/// `Extension` and rejected later by the method allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token
    Extension(String),
}

impl Method {
    /// Maps a method token to a `Method`. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("BREW"), Method::Extension("BREW".into()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol version as a `major.minor` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };

    /// Parses a protocol token of the form `HTTP/<major>.<minor>`.
    pub fn parse(token: &str) -> Option<Self> {
        let numbers = token.strip_prefix("HTTP/")?;
        let (major, minor) = numbers.split_once('.')?;

        Some(Version {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A parsed HTTP request.
///
/// Method, target and version are always populated together: the only ways
/// to obtain a `Request` are [`Request::parse`], which fails as a whole on
/// malformed input, and [`RequestBuilder`].
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The request target, path plus optional query (e.g. `/say_hello?name=Michael`)
    pub target: String,
    pub version: Version,
    pub headers: HeaderSet,
    params: QueryParams,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<Version>,
    headers: HeaderSet,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: HeaderSet::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let target = self.target.ok_or("target missing")?;
        let params = extract_query_parameters(&target);

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target,
            version: self.version.unwrap_or(Version::HTTP_10),
            headers: self.headers,
            params,
        })
    }
}

impl Request {
    /// Builds a request from a request line and its raw header block.
    ///
    /// Fails without producing anything if either part is malformed.
    pub fn parse(request_line: &str, header_block: &str) -> Result<Self, ParseError> {
        let headers = HeaderSet::parse(header_block)?;
        let (method, target, version) = parse_request_line(request_line)?;
        let params = extract_query_parameters(&target);

        Ok(Request {
            method,
            target,
            version,
            headers,
            params,
        })
    }

    /// Retrieves a header value by exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.params
    }

    /// The target truncated at the first `?`.
    pub fn path_without_query(&self) -> &str {
        match self.target.find('?') {
            Some(index) => &self.target[..index],
            None => &self.target,
        }
    }
}

/// Splits a request line into method, target and version.
///
/// The line must consist of exactly three components separated by single
/// spaces, the last of which is `HTTP/<major>.<minor>`.
pub fn parse_request_line(line: &str) -> Result<(Method, String, Version), ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();

    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    };

    if method.is_empty() || target.is_empty() {
        return Err(ParseError::MalformedRequestLine(line.to_string()));
    }

    let version =
        Version::parse(version).ok_or_else(|| ParseError::MalformedRequestLine(line.to_string()))?;

    Ok((Method::from_token(method), target.to_string(), version))
}

/// Extracts the query parameters of a request target.
///
/// Segments are separated by `&`; empty segments are dropped. A segment
/// without `=` maps to an empty value, otherwise the value is everything
/// after the first `=`. Later duplicates win.
///
/// # Example
///
/// ```
/// # use lantern::http::request::extract_query_parameters;
/// let params = extract_query_parameters("/p?a=1&b=&c");
/// assert_eq!(params["a"], "1");
/// assert_eq!(params["b"], "");
/// assert_eq!(params["c"], "");
/// ```
pub fn extract_query_parameters(target: &str) -> QueryParams {
    let Some((_, query)) = target.split_once('?') else {
        return QueryParams::new();
    };

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (segment.to_string(), String::new()),
        })
        .collect()
}
