//! Lantern - a minimal HTTP/1.0 file and function server
//!
//! Parses and validates requests, serves files from a document root while
//! keeping restricted folders private, and exposes a few named server-side
//! functions through the first path segment.

pub mod config;
pub mod http;
pub mod server;
pub mod site;
