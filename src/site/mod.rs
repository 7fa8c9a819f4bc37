//! What the server serves: dynamic routes, files under the document root,
//! and the policy deciding which files may leave the machine.

pub mod clock;
pub mod dispatcher;
pub mod policy;
pub mod routes;

pub use dispatcher::Dispatcher;
pub use policy::{Access, AccessPolicy};
pub use routes::{RouteHandler, RouteRegistry};
