//! Named server-side functions reachable through the first path segment.
//!
//! `/say_hello?name=Michael` calls the `say_hello` route with
//! `{name: "Michael"}`. Parameters a route does not use are ignored; a route
//! missing a parameter it needs answers 500 and asks for the connection to
//! be closed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::QueryParams;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// A dynamic route. Returns the response and whether the connection should
/// stay open afterwards.
pub trait RouteHandler: Send + Sync {
    fn handle(&self, params: &QueryParams) -> (Response, bool);
}

impl<F> RouteHandler for F
where
    F: Fn(&QueryParams) -> (Response, bool) + Send + Sync,
{
    fn handle(&self, params: &QueryParams) -> (Response, bool) {
        self(params)
    }
}

/// Immutable table of routes, shared by every connection.
#[derive(Clone, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, Arc<dyn RouteHandler>>,
}

pub struct RouteRegistryBuilder {
    routes: HashMap<String, Arc<dyn RouteHandler>>,
}

impl RouteRegistryBuilder {
    pub fn route(mut self, name: impl Into<String>, handler: impl RouteHandler + 'static) -> Self {
        self.routes.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn build(self) -> RouteRegistry {
        RouteRegistry {
            routes: self.routes,
        }
    }
}

impl RouteRegistry {
    pub fn builder() -> RouteRegistryBuilder {
        RouteRegistryBuilder {
            routes: HashMap::new(),
        }
    }

    /// The routes the server ships with.
    pub fn with_builtin_routes() -> Self {
        Self::builder().route("say_hello", SayHello).build()
    }

    /// Finds the route addressed by a request path (query already stripped).
    pub fn lookup(&self, path: &str) -> Option<&dyn RouteHandler> {
        self.routes.get(route_name(path)).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// First segment of a request path, without the leading `/`.
///
/// # Example
///
/// ```
/// # use lantern::site::routes::route_name;
/// assert_eq!(route_name("/say_hello"), "say_hello");
/// assert_eq!(route_name("/say_hello/extra"), "say_hello");
/// assert_eq!(route_name("/"), "");
/// ```
pub fn route_name(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.split('/').next().unwrap_or("")
}

/// `say_hello?name=<name>` answers `Hello <name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SayHello;

impl RouteHandler for SayHello {
    fn handle(&self, params: &QueryParams) -> (Response, bool) {
        const NAME: &str = "name";

        let Some(name) = params.get(NAME) else {
            let message = format!("Parameter \"{NAME}\" missing");
            return (Response::internal_error_with_message(&message), false);
        };

        let response = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .body(format!("Hello {name}"))
            .build();

        (response, true)
    }
}
