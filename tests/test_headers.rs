use lantern::http::headers::HeaderSet;
use lantern::http::parser::ParseError;
use proptest::prelude::*;

#[test]
fn test_parse_header_block() {
    let headers = HeaderSet::parse("Host: example.com\r\nAccept: */*\r\n\r\n").unwrap();

    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("Host"), Some("example.com"));
    assert_eq!(headers.get("Accept"), Some("*/*"));
}

#[test]
fn test_parse_empty_block() {
    assert!(HeaderSet::parse("").unwrap().is_empty());
    assert!(HeaderSet::parse("\r\n").unwrap().is_empty());
}

#[test]
fn test_parse_value_keeps_later_colons() {
    let headers = HeaderSet::parse("Host: localhost:8080\r\n\r\n").unwrap();
    assert_eq!(headers.get("Host"), Some("localhost:8080"));
}

#[test]
fn test_parse_missing_colon() {
    let result = HeaderSet::parse("BrokenHeader\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
}

#[test]
fn test_parse_empty_name() {
    let result = HeaderSet::parse(": value\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
}

#[test]
fn test_parse_missing_space_after_colon() {
    let result = HeaderSet::parse("Host:example.com\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
}

#[test]
fn test_duplicate_names_last_wins() {
    let headers = HeaderSet::parse("X-A: one\r\nX-A: two\r\n\r\n").unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("X-A"), Some("two"));
}

#[test]
fn test_names_are_case_sensitive() {
    let headers = HeaderSet::parse("Content-Type: text/html\r\n\r\n").unwrap();
    assert_eq!(headers.get("Content-Type"), Some("text/html"));
    assert_eq!(headers.get("content-type"), None);
}

#[test]
fn test_set_replaces_in_place() {
    let mut headers = HeaderSet::new();
    headers.set("A", "1");
    headers.set("B", "2");
    headers.set("A", "3");

    let pairs: Vec<_> = headers.iter().collect();
    assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "invalid header name")]
fn test_set_rejects_empty_name() {
    HeaderSet::new().set("", "value");
}

#[test]
fn test_remove() {
    let mut headers: HeaderSet = [("A", "1"), ("B", "2")].into_iter().collect();
    assert_eq!(headers.remove("A"), Some("1".to_string()));
    assert_eq!(headers.remove("A"), None);
    assert!(!headers.contains("A"));
    assert!(headers.contains("B"));
}

#[test]
fn test_serialize_ends_with_blank_line() {
    let mut headers = HeaderSet::new();
    headers.set("Connection", "keep-alive");

    assert_eq!(headers.serialize(), "Connection: keep-alive\r\n\r\n");
    assert_eq!(HeaderSet::new().serialize(), "\r\n");
}

#[test]
fn test_round_trip() {
    let samples = [
        ("Host", "example.com"),
        ("X-Empty-Ish", " leading space"),
        ("Date", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ("Weird_Name.1", "a=b; c=d"),
    ];

    for (name, value) in samples {
        let mut headers = HeaderSet::new();
        headers.set(name, value);

        let reparsed = HeaderSet::parse(&headers.serialize()).unwrap();
        assert_eq!(reparsed, headers, "round trip of {name}: {value}");
    }
}

/// Printable ASCII without the colon.
fn name_strategy() -> impl Strategy<Value = String> {
    "[!-9;-~]{1,24}"
}

/// Anything without a line break, leading spaces included.
fn value_strategy() -> impl Strategy<Value = String> {
    r"[^\r\n]{0,48}"
}

proptest! {
    #[test]
    fn prop_single_pair_round_trips(name in name_strategy(), value in value_strategy()) {
        let mut headers = HeaderSet::new();
        headers.set(name.clone(), value.clone());

        let reparsed = HeaderSet::parse(&headers.serialize()).unwrap();
        prop_assert_eq!(reparsed.len(), 1);
        prop_assert_eq!(reparsed.get(&name), Some(value.as_str()));
    }

    #[test]
    fn prop_header_set_round_trips(
        pairs in prop::collection::vec((name_strategy(), value_strategy()), 0..8),
    ) {
        let headers: HeaderSet = pairs.into_iter().collect();

        let reparsed = HeaderSet::parse(&headers.serialize()).unwrap();
        prop_assert_eq!(reparsed, headers);
    }

    #[test]
    fn prop_serialize_is_deterministic(
        pairs in prop::collection::vec((name_strategy(), value_strategy()), 0..8),
    ) {
        let headers: HeaderSet = pairs.into_iter().collect();
        prop_assert_eq!(headers.serialize(), headers.serialize());
    }
}
