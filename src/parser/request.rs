//! HTTP request parsing and representation.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::request_line::{HttpVersion, Method, RequestLine};

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method
    pub method: Method,
    /// The request path, without the query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers, keyed by lowercase name
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Query parameters parsed from the request target
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - The request path, without the query string
    /// * `version` - The HTTP version
    /// * `headers` - The HTTP headers. Names are lowercased.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        version: HttpVersion,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            version,
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body: Vec::new(),
            query_params: HashMap::new(),
        }
    }

    /// Set the query parameters from a raw query string such as `a=1&b`.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query_params = parse_query(query);
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value, ignoring the case of `name`.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// Check if the request declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Parse the request body as JSON.
    ///
    /// Fails with [`Error::MissingHeader`] unless the Content-Type is
    /// `application/json`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        Ok(serde_json::from_slice(&self.body)?)
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Split a raw request into its head and body at the first blank line,
/// whether it is written `\r\n\r\n` or `\n\n`.
fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    let earliest = [&b"\r\n\r\n"[..], &b"\n\n"[..]]
        .into_iter()
        .filter_map(|separator| {
            input
                .windows(separator.len())
                .position(|w| w == separator)
                .map(|pos| (pos, separator.len()))
        })
        .min_by_key(|&(pos, _)| pos);

    match earliest {
        Some((pos, len)) => (&input[..pos], &input[pos + len..]),
        None => (input, &input[input.len()..]),
    }
}

/// Parse an HTTP request from a byte slice.
///
/// # Arguments
///
/// * `input` - The raw bytes read from the connection
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let (head, body) = split_head(input);
    let head = std::str::from_utf8(head).map_err(|_| Error::InvalidEncoding)?;

    let mut lines = head.lines();
    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };
    let RequestLine {
        method,
        path,
        query,
        version,
    } = request_line.parse()?;

    // A repeated name keeps the last value
    let mut headers = HashMap::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            return Err(Error::InvalidHeaderFormat(line.to_string()));
        };
        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    let request = HttpRequest::new(method, path, version, headers)
        .with_query(query.as_deref().unwrap_or_default())
        .with_body(body);

    if request.version == HttpVersion::Http11 && !request.has_header("Host") {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    Ok(request)
}
