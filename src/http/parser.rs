use thiserror::Error;

use crate::http::request::Request;
use crate::http::validation::{validate_headers, validate_request_line};

const CRLF: &str = "\r\n";
const HEADERS_END: &str = "\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed frame: {0}")]
    MalformedFrame(&'static str),

    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("malformed header: {0:?}")]
    MalformedHeader(String),

    #[error("request is not valid UTF-8")]
    InvalidEncoding,

    #[error("request failed validation")]
    Invalid,
}

/// Splits a raw request into its request line and its header block.
///
/// The header block keeps its terminating blank line. Anything after the
/// blank line is ignored since request bodies are never consumed.
pub fn split_frame(raw: &str) -> Result<(&str, &str), ParseError> {
    let line_end = raw
        .find(CRLF)
        .ok_or(ParseError::MalformedFrame("no line terminator"))?;

    let request_line = &raw[..line_end];
    let rest = &raw[line_end + CRLF.len()..];

    if rest.is_empty() {
        return Ok((request_line, ""));
    }

    if rest.starts_with(CRLF) {
        return Ok((request_line, &rest[..CRLF.len()]));
    }

    let end = rest
        .find(HEADERS_END)
        .ok_or(ParseError::MalformedFrame("headers never terminate"))?;

    Ok((request_line, &rest[..end + HEADERS_END.len()]))
}

/// Turns one raw request into a `Request`: frame split, grammar checks,
/// then structured parsing.
pub fn parse_request(raw: &[u8]) -> Result<Request, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidEncoding)?;

    let (request_line, header_block) = split_frame(text)?;

    if !validate_request_line(request_line) || !validate_headers(header_block) {
        return Err(ParseError::Invalid);
    }

    Request::parse(request_line, header_block)
}

/// Position of the blank line ending the request head, if it has arrived.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == HEADERS_END.as_bytes())
}
