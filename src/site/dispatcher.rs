//! Decides what to answer for each request.
//!
//! ```text
//!   raw bytes ──► split / validate / parse ──(fail)──► 500, close
//!                         │
//!                         ▼
//!              registered route? ──yes──► handler (response, keep-alive)
//!                         │ no
//!                         ▼
//!              method allowed? ──no──► 405, close
//!                         │
//!                         ▼
//!              inside root, not restricted? ──no──► 403, keep-alive
//!                         │
//!                         ▼
//!              file exists? ──no──► 404, keep-alive
//!                         │
//!                         ▼
//!                  200 + file bytes, keep-alive
//! ```
//!
//! Every response then gets `Allow`, `Connection`, `Date` and a
//! `Content-Length` matching its body.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::http::mime::content_type_for;
use crate::http::parser::parse_request;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::site::clock::{Clock, SystemClock};
use crate::site::policy::{Access, AccessPolicy};
use crate::site::routes::RouteRegistry;

const BUILTIN_NOT_FOUND: &str = "<body><h1>Not Found</h1></body>";
const BUILTIN_FORBIDDEN: &str = "<body><h1>Forbidden</h1></body>";

pub struct Dispatcher {
    policy: AccessPolicy,
    routes: RouteRegistry,
    supported_methods: Vec<Method>,
    not_found_page: String,
    restricted_page: String,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    pub fn new(policy: AccessPolicy, routes: RouteRegistry, supported_methods: Vec<Method>) -> Self {
        Self {
            policy,
            routes,
            supported_methods,
            not_found_page: "not_found.html".to_string(),
            restricted_page: "restricted.html".to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Builds a dispatcher for the configured site with the built-in routes.
    pub fn from_config(site: &SiteConfig) -> std::io::Result<Self> {
        let policy = AccessPolicy::new(
            &site.root,
            site.restricted_folders.as_slice(),
            site.index.clone(),
        )?;
        let methods = site
            .supported_methods
            .iter()
            .map(|m| Method::from_token(m))
            .collect();

        Ok(Self::new(policy, RouteRegistry::with_builtin_routes(), methods)
            .with_pages(site.not_found_page.clone(), site.restricted_page.clone()))
    }

    pub fn with_pages(mut self, not_found: impl Into<String>, restricted: impl Into<String>) -> Self {
        self.not_found_page = not_found.into();
        self.restricted_page = restricted.into();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Handles one raw request. Returns the response to send and whether
    /// the connection should stay open.
    pub async fn handle_raw(&self, raw: &[u8]) -> (Response, bool) {
        match parse_request(raw) {
            Ok(request) => self.dispatch(&request).await,
            Err(e) => {
                warn!(error = %e, "Rejecting malformed request");
                self.error_response()
            }
        }
    }

    /// Routes a parsed request to a handler or the file pipeline.
    pub async fn dispatch(&self, request: &Request) -> (Response, bool) {
        let path = request.path_without_query();

        let (response, keep_alive) = match self.routes.lookup(path) {
            Some(handler) => {
                debug!(method = %request.method, path = %path, "Calling route");
                handler.handle(request.query_params())
            }
            None => self.serve_static(request, path).await,
        };

        debug!(
            method = %request.method,
            path = %path,
            status = response.status.as_u16(),
            keep_alive,
            "Request handled"
        );

        (self.finalize(response, keep_alive), keep_alive)
    }

    /// Generic 500 sent when a request cannot be understood. Always closes.
    pub fn error_response(&self) -> (Response, bool) {
        (self.finalize(Response::internal_error(), false), false)
    }

    /// Attaches the headers every response carries.
    pub fn finalize(&self, mut response: Response, keep_alive: bool) -> Response {
        let headers = &mut response.headers;
        headers.set("Allow", self.allow_header());
        headers.set("Connection", if keep_alive { "keep-alive" } else { "close" });
        headers.set("Date", self.clock.now());
        headers.set("Content-Length", response.body.len().to_string());
        response
    }

    async fn serve_static(&self, request: &Request, path: &str) -> (Response, bool) {
        if !self.supported_methods.contains(&request.method) {
            return (ResponseBuilder::new(StatusCode::MethodNotAllowed).build(), false);
        }

        let location = match self.policy.resolve(path) {
            Access::Allowed(location) => location,
            Access::Forbidden => return (self.forbidden().await, true),
        };

        let canonical = match tokio::fs::canonicalize(&location).await {
            Ok(canonical) => canonical,
            Err(_) => return (self.not_found().await, true),
        };

        if !self.policy.permits(&canonical) {
            return (self.forbidden().await, true);
        }

        let is_file = tokio::fs::metadata(&canonical)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return (self.not_found().await, true);
        }

        match tokio::fs::read(&canonical).await {
            Ok(body) => {
                let response = ResponseBuilder::new(StatusCode::Ok)
                    .header("Content-Type", content_type_for(&canonical))
                    .body(body)
                    .build();
                (response, true)
            }
            Err(e) => {
                warn!(path = %canonical.display(), error = %e, "Failed to read file");
                (Response::internal_error(), false)
            }
        }
    }

    async fn forbidden(&self) -> Response {
        let body = self.page_or(&self.restricted_page, BUILTIN_FORBIDDEN).await;
        html_response(StatusCode::Forbidden, body)
    }

    async fn not_found(&self) -> Response {
        let body = self.page_or(&self.not_found_page, BUILTIN_NOT_FOUND).await;
        html_response(StatusCode::NotFound, body)
    }

    async fn page_or(&self, name: &str, fallback: &str) -> Vec<u8> {
        tokio::fs::read(self.policy.page(name))
            .await
            .unwrap_or_else(|_| fallback.as_bytes().to_vec())
    }

    fn allow_header(&self) -> String {
        self.supported_methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn html_response(status: StatusCode, body: Vec<u8>) -> Response {
    ResponseBuilder::new(status)
        .header("Content-Type", "text/html")
        .body(body)
        .build()
}
