//! Route table module
//!
//! Explicit mapping from method and exact path to a handler kind. Lookup
//! distinguishes an unknown path from a known path hit with the wrong
//! method, so the dispatcher can answer 404 and 405 respectively.

use hyper::Method;

/// Handlers the router can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Render the index template for the root path
    Index,
}

/// A single registered route
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub handler: RouteKind,
}

/// Outcome of a route lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Matched(RouteKind),
    MethodNotAllowed,
    NotFound,
}

/// Explicit route table, matched in registration order
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    #[must_use]
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for `method` + exact `path`
    #[must_use]
    pub fn route(mut self, method: Method, path: &str, handler: RouteKind) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            handler,
        });
        self
    }

    /// Look up the handler for a request line
    ///
    /// HEAD requests match routes registered for GET; the dispatcher elides
    /// the body.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> RouteOutcome {
        let effective = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };

        let mut path_known = false;
        for route in &self.routes {
            if route.path != path {
                continue;
            }
            path_known = true;
            if route.method == *effective {
                return RouteOutcome::Matched(route.handler);
            }
        }

        if path_known {
            RouteOutcome::MethodNotAllowed
        } else {
            RouteOutcome::NotFound
        }
    }
}
