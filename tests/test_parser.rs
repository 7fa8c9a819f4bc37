use lantern::http::parser::{ParseError, parse_request, split_frame};
use lantern::http::request::{Method, Version};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, Version::HTTP_11);
    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.0\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
}

#[test]
fn test_parse_request_with_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.target, "/search?q=rust");
    assert_eq!(parsed.path_without_query(), "/search");
    assert_eq!(parsed.query_params()["q"], "rust");
}

#[test]
fn test_parse_request_without_headers() {
    let parsed = parse_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_split_frame() {
    let (line, headers) = split_frame("GET / HTTP/1.0\r\nHost: a\r\n\r\n").unwrap();
    assert_eq!(line, "GET / HTTP/1.0");
    assert_eq!(headers, "Host: a\r\n\r\n");

    let (line, headers) = split_frame("GET / HTTP/1.0\r\n").unwrap();
    assert_eq!(line, "GET / HTTP/1.0");
    assert_eq!(headers, "");

    let (_, headers) = split_frame("GET / HTTP/1.0\r\n\r\n").unwrap();
    assert_eq!(headers, "\r\n");
}

#[test]
fn test_split_frame_ignores_trailing_body() {
    let (_, headers) = split_frame("GET / HTTP/1.0\r\nHost: a\r\n\r\nbody").unwrap();
    assert_eq!(headers, "Host: a\r\n\r\n");
}

#[test]
fn test_split_frame_no_line_terminator() {
    let result = split_frame("GET / HTTP/1.0");
    assert!(matches!(result, Err(ParseError::MalformedFrame(_))));
}

#[test]
fn test_split_frame_headers_never_terminate() {
    let result = split_frame("GET / HTTP/1.0\r\nHost: example.com\r\n");
    assert!(matches!(result, Err(ParseError::MalformedFrame(_))));
}

#[test]
fn test_parse_lowercase_method_rejected() {
    let result = parse_request(b"get / HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::Invalid)));
}

#[test]
fn test_parse_malformed_header() {
    let result = parse_request(b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n");
    assert!(matches!(result, Err(ParseError::Invalid)));
}

#[test]
fn test_parse_invalid_utf8() {
    let result = parse_request(b"GET /\xff HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::InvalidEncoding)));
}

#[test]
fn test_parse_header_case_preservation() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert!(parsed.headers.contains("Content-Type"));
    assert!(!parsed.headers.contains("content-type"));
}
