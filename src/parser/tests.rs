//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde::{Deserialize, Serialize};

    use crate::parser::{parse_request, Error, HttpRequest, HttpVersion, Method, RequestLine};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.get_header("host"), Some("example.com"));
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /index.html HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        let request = b"GET /index.html HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_invalid_method() {
        let request = b"INVALID /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "INVALID"));
    }

    #[test]
    fn test_methods_are_case_sensitive() {
        let request = b"get /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidMethod(ref m)) if m == "get"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /index.html HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /index.html HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat(ref l)) if l == "InvalidHeader"));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
        assert!(matches!(parse_request(b"\r\n\r\n"), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));

        let result = parse_request(b"GET  HTTP/1.1\r\nHost: example.com\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));

        let result = parse_request(b"GET / HTTP/1.1 extra\r\nHost: example.com\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_absolute_form_target_rejected() {
        let request = b"GET http://example.com/ HTTP/1.1\r\nHost: example.com\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidPath)));
    }

    #[test]
    fn test_all_methods() {
        for method in Method::ALL {
            let request = format!("{method} /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n");
            let result = parse_request(request.as_bytes()).unwrap();
            assert_eq!(result.method, method);
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_request_line() {
        let line: RequestLine = "DELETE /users/42?force=1 HTTP/2".parse().unwrap();
        assert_eq!(line.method, Method::DELETE);
        assert_eq!(line.path, "/users/42");
        assert_eq!(line.query.as_deref(), Some("force=1"));
        assert_eq!(line.version, HttpVersion::Http20);
        assert_eq!(line.version.to_string(), "HTTP/2");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com  \r\nX-Test:  value:with:colons  \r\nX-Empty:\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("Host"), Some("example.com"));
        assert_eq!(result.get_header("X-Test"), Some("value:with:colons"));
        assert_eq!(result.get_header("X-Empty"), Some(""));
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("Host"), Some("example.com"));
        assert_eq!(result.get_header("User-Agent"), Some("test"));
    }

    #[test]
    fn test_query_is_split_from_path() {
        let request = b"GET /search?q=test%20query&filter=name:john&flag&empty= HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/search");
        assert_eq!(result.get_query_param("q"), Some("test%20query"));
        assert_eq!(result.get_query_param("filter"), Some("name:john"));
        assert_eq!(result.get_query_param("flag"), Some(""));
        assert_eq!(result.get_query_param("empty"), Some(""));
        assert_eq!(result.get_query_param("missing"), None);
    }

    #[test]
    fn test_double_slash_path_is_kept() {
        let request = b"GET //world HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "//world");
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\r\n\r\n";
        assert!(matches!(parse_request(request), Err(Error::InvalidEncoding)));
    }

    #[test]
    fn test_body_after_blank_line() {
        let request = b"POST /api/users?role=admin HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Type: application/json\r\n\
            \r\n\
            {\"name\":\"John Doe\",\"email\":\"john@example.com\"}";

        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.path, "/api/users");
        assert_eq!(result.get_query_param("role"), Some("admin"));
        assert_eq!(result.body, br#"{"name":"John Doe","email":"john@example.com"}"#.to_vec());
    }

    #[test]
    fn test_binary_body_is_not_decoded() {
        let mut request = b"POST /upload HTTP/1.0\r\n\r\n".to_vec();
        request.extend_from_slice(&[0xFF, 0x00, 0xFE]);
        let result = parse_request(&request).unwrap();
        assert_eq!(result.body, vec![0xFF, 0x00, 0xFE]);
    }

    #[test]
    fn test_bare_newline_head_with_crlf_in_body() {
        let request = b"POST /a HTTP/1.1\nHost: x\n\nline1\r\n\r\nline2";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("Host"), Some("x"));
        assert_eq!(result.body, b"line1\r\n\r\nline2");
    }

    #[test]
    fn test_repeated_header_names_are_case_insensitive() {
        let request = b"GET / HTTP/1.1\r\nHost: x\r\nX-Test: a\r\nx-test: b\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 2);
        assert_eq!(result.get_header("X-TEST"), Some("b"));
        assert_eq!(result.headers.get("x-test").map(String::as_str), Some("b"));

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let request = HttpRequest::new(Method::GET, "/", HttpVersion::Http10, headers);
        assert!(request.headers.contains_key("content-type"));
        assert!(request.is_json());
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestUser {
        name: String,
        email: String,
    }

    #[test]
    fn test_json_parsing() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let body = r#"{"name":"John Doe","email":"john@example.com"}"#;
        let request = HttpRequest::new(Method::POST, "/api/users", HttpVersion::Http11, headers.clone())
            .with_body(body);
        let user: TestUser = request.json().unwrap();
        assert_eq!(user.name, "John Doe");

        let mut headers_no_json = headers.clone();
        headers_no_json.insert("Content-Type".to_string(), "text/plain".to_string());
        let request = HttpRequest::new(Method::POST, "/api/users", HttpVersion::Http11, headers_no_json)
            .with_body(body);
        let result: Result<TestUser, _> = request.json();
        assert!(matches!(result, Err(Error::MissingHeader(_))));

        let request = HttpRequest::new(Method::POST, "/api/users", HttpVersion::Http11, headers)
            .with_body(r#"{"name":"John Doe","email":}"#);
        let result: Result<TestUser, _> = request.json();
        assert!(matches!(result, Err(Error::JsonError(_))));
    }
}
