//! Syntactic checks run on a request before it is parsed.
//!
//! Both checks only look at shape. They do not require particular headers
//! or inspect header values.

use once_cell::sync::Lazy;
use regex::Regex;

/// `METHOD /path[?name=value&...] HTTP/1.0|HTTP/1.1`
static REQUEST_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{3,7} /[/a-zA-Z0-9._\-]*(\?[a-zA-Z0-9._\-=&]*)? HTTP/1\.[01]$")
        .expect("request line regex should be valid")
});

/// One `Field-Name: value\r\n` line at the start of the input.
static HEADER_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\-]+: [^\r\n]+\r\n").expect("header line regex should be valid")
});

/// Checks a request line (without its line terminator) against the
/// request-line grammar.
///
/// # Example
///
/// ```
/// # use lantern::http::validation::validate_request_line;
/// assert!(validate_request_line("GET /index.html HTTP/1.1"));
/// assert!(!validate_request_line("get /x HTTP/1.1"));
/// assert!(!validate_request_line("GET /x HTTP/2.0"));
/// ```
pub fn validate_request_line(line: &str) -> bool {
    REQUEST_LINE_REGEX.is_match(line)
}

/// Checks a header block line by line.
///
/// The block is valid when every line matches `Field-Name: value\r\n` and
/// the last of them is immediately followed by the blank terminator line. A
/// block holding only the terminator (a request with no headers) is valid.
pub fn validate_headers(block: &str) -> bool {
    if block.is_empty() || block.starts_with("\r\n") {
        return true;
    }

    let mut rest = block;
    loop {
        let Some(found) = HEADER_LINE_REGEX.find(rest) else {
            return false;
        };

        rest = &rest[found.end()..];

        if rest.starts_with("\r\n") {
            return true;
        }
        if rest.is_empty() {
            // ran out of input before the blank line
            return false;
        }
    }
}
