use lantern::http::parser::ParseError;
use lantern::http::request::{
    Method, Request, RequestBuilder, Version, extract_query_parameters, parse_request_line,
};

#[test]
fn test_request_line_components() {
    let (method, target, version) = parse_request_line("GET /index.html HTTP/1.1").unwrap();

    assert_eq!(method, Method::GET);
    assert_eq!(target, "/index.html");
    assert_eq!(version, Version::HTTP_11);
}

#[test]
fn test_request_line_wrong_component_count() {
    for line in ["GET /", "GET / HTTP/1.0 extra", "", "GET  / HTTP/1.0"] {
        let result = parse_request_line(line);
        assert!(
            matches!(result, Err(ParseError::MalformedRequestLine(_))),
            "{line:?} should be rejected"
        );
    }
}

#[test]
fn test_request_line_bad_version() {
    for line in ["GET / HTTP1.0", "GET / HTTP/one.zero", "GET / FTP/1.0", "GET / HTTP/1"] {
        assert!(parse_request_line(line).is_err(), "{line:?} should be rejected");
    }
}

#[test]
fn test_request_line_keeps_unknown_method() {
    let (method, _, _) = parse_request_line("BREW /pot HTTP/1.0").unwrap();
    assert_eq!(method, Method::Extension("BREW".to_string()));
    assert_eq!(method.as_str(), "BREW");
}

#[test]
fn test_query_parameters() {
    let params = extract_query_parameters("/p?a=1&b=&c");

    assert_eq!(params.len(), 3);
    assert_eq!(params["a"], "1");
    assert_eq!(params["b"], "");
    assert_eq!(params["c"], "");
}

#[test]
fn test_query_parameters_absent() {
    assert!(extract_query_parameters("/p").is_empty());
    assert!(extract_query_parameters("/p?").is_empty());
}

#[test]
fn test_query_parameters_edge_cases() {
    let params = extract_query_parameters("/say_hello?name=Michael&&&foo=bar&x=1=2&name=Anna");

    // later duplicates win, empty segments vanish, value keeps extra '='
    assert_eq!(params.len(), 3);
    assert_eq!(params["name"], "Anna");
    assert_eq!(params["foo"], "bar");
    assert_eq!(params["x"], "1=2");
}

#[test]
fn test_request_parse_atomic() {
    let req = Request::parse("GET /say_hello?name=Michael HTTP/1.0", "Host: a\r\n\r\n").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.target, "/say_hello?name=Michael");
    assert_eq!(req.path_without_query(), "/say_hello");
    assert_eq!(req.version, Version::HTTP_10);
    assert_eq!(req.header("Host"), Some("a"));
    assert_eq!(req.query_params()["name"], "Michael");

    assert!(Request::parse("GET /", "Host: a\r\n\r\n").is_err());
    assert!(Request::parse("GET / HTTP/1.0", "Host:a\r\n\r\n").is_err());
}

#[test]
fn test_path_without_query() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/index.html")
        .build()
        .unwrap();
    assert_eq!(req.path_without_query(), "/index.html");

    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/a?b?c")
        .build()
        .unwrap();
    assert_eq!(req.path_without_query(), "/a");
    assert_eq!(req.query_params()["b?c"], "");
}

#[test]
fn test_builder_requires_method_and_target() {
    assert!(RequestBuilder::new().target("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());

    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/")
        .header("Connection", "keep-alive")
        .build()
        .unwrap();
    assert_eq!(req.version, Version::HTTP_10);
    assert_eq!(req.header("Connection"), Some("keep-alive"));
}

#[test]
fn test_version_display() {
    assert_eq!(Version::HTTP_10.to_string(), "1.0");
    assert_eq!(Version::parse("HTTP/1.1"), Some(Version::HTTP_11));
    assert_eq!(Version::parse("HTTP/2.0"), Some(Version { major: 2, minor: 0 }));
}

#[test]
fn test_request_method_from_token() {
    assert_eq!(Method::from_token("GET"), Method::GET);
    assert_eq!(Method::from_token("POST"), Method::POST);
    assert_eq!(Method::from_token("get"), Method::Extension("get".to_string())); // Case-sensitive
    assert_ne!(Method::GET, Method::POST);
}
