//! HTTP protocol implementation.
//!
//! This module implements the message model and wire handling of a small
//! HTTP/1.0 server that keeps connections open between requests.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`headers`**: Ordered header set with parsing and serialization
//! - **`request`**: Request line parsing, query parameters, request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`validation`**: Grammar checks run before any structured parsing
//! - **`parser`**: Splits raw requests into request line and header block
//! - **`connection`**: The per-connection request-response state machine
//! - **`writer`**: Writes serialized responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request head
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate, parse, dispatch
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lantern::config::Config;
//! use lantern::http::connection::{Connection, ConnectionSettings};
//! use lantern::site::Dispatcher;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::load()?;
//!     let dispatcher = Arc::new(Dispatcher::from_config(&cfg.site)?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let dispatcher = dispatcher.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, dispatcher, ConnectionSettings::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod validation;
pub mod writer;
