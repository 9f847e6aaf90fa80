//! Immutable route tables.
//!
//! A [`RouteTable`] is a list of [`RouteDescriptor`]s sharing a default
//! [`AccessPolicy`]. Each descriptor fixes its method, path, validation rules
//! and access requirement when the table is built; [`RouteTable::into_router`]
//! turns the table into an axum router with the gates layered per route.
//!
//! Per-route middleware order:
//!
//! ```text
//! protect -> authorize(roles) -> validate(rules) -> handler
//! ```
//!
//! A rejected gate therefore never evaluates rules, and a rejected rule never
//! reaches the handler.

use axum::{
    Router,
    handler::Handler,
    http::Method,
    middleware::from_fn_with_state,
    routing::{self, MethodRouter},
};
use std::fmt;
use std::sync::Arc;

use crate::api::handlers::method_not_allowed_handler;
use crate::api::middleware::{auth, validate};
use crate::api::validation::RuleSet;
use crate::domain::entities::Role;
use crate::state::AppState;

/// Access requirement of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No credential required.
    Open,
    /// A valid bearer token for an existing user.
    Authenticated,
    /// Authenticated, and holding one of the listed roles.
    Roles(Vec<Role>),
}

/// One method + path entry of a route table.
pub struct RouteDescriptor {
    method: Method,
    path: &'static str,
    rules: Arc<RuleSet>,
    access: Option<AccessPolicy>,
    handler: MethodRouter<AppState>,
}

impl RouteDescriptor {
    fn new(method: Method, path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            method,
            path,
            rules: Arc::new(RuleSet::new()),
            access: None,
            handler,
        }
    }

    pub fn get<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::GET, path, routing::get(handler))
    }

    pub fn post<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::POST, path, routing::post(handler))
    }

    pub fn put<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::PUT, path, routing::put(handler))
    }

    pub fn delete<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::DELETE, path, routing::delete(handler))
    }

    /// Sets the rules evaluated against the request body.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Overrides the table's access policy for this route.
    pub fn access(mut self, policy: AccessPolicy) -> Self {
        self.access = Some(policy);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("rules", &self.rules.fields())
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

/// Ordered routes sharing a default access policy.
#[derive(Debug)]
pub struct RouteTable {
    policy: AccessPolicy,
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy,
            routes: Vec::new(),
        }
    }

    pub fn route(mut self, descriptor: RouteDescriptor) -> Self {
        self.routes.push(descriptor);
        self
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    /// Looks up a descriptor by method and path template.
    pub fn find(&self, method: &Method, path: &str) -> Option<&RouteDescriptor> {
        self.routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
    }

    /// Access policy that applies to `descriptor`.
    pub fn access_for<'a>(&'a self, descriptor: &'a RouteDescriptor) -> &'a AccessPolicy {
        descriptor.access.as_ref().unwrap_or(&self.policy)
    }

    /// Builds the axum router.
    ///
    /// Descriptors sharing a path are merged into one method router; each
    /// method keeps its own gates and rules. Any other method on a known path
    /// answers 405 with the JSON error envelope.
    pub fn into_router(self, state: &AppState) -> Router<AppState> {
        let RouteTable { policy, routes } = self;
        let mut router = Router::new();

        for descriptor in routes {
            let access = descriptor.access.unwrap_or_else(|| policy.clone());
            let mut handler = descriptor.handler;

            if !descriptor.rules.is_empty() {
                handler =
                    handler.route_layer(from_fn_with_state(descriptor.rules, validate::layer));
            }

            match access {
                AccessPolicy::Open => {}
                AccessPolicy::Authenticated => {
                    handler = handler.route_layer(from_fn_with_state(state.clone(), auth::protect));
                }
                AccessPolicy::Roles(roles) => {
                    let roles: Arc<[Role]> = roles.into();
                    handler = handler
                        .route_layer(from_fn_with_state(roles, auth::authorize))
                        .route_layer(from_fn_with_state(state.clone(), auth::protect));
                }
            }

            router = router.route(descriptor.path, handler);
        }

        router.method_not_allowed_fallback(method_not_allowed_handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validation::Rule;

    async fn noop() {}

    fn table() -> RouteTable {
        RouteTable::new(AccessPolicy::Authenticated)
            .route(
                RouteDescriptor::post("/login", noop)
                    .rules(RuleSet::new().rule(Rule::Exists("password"), "Password is required"))
                    .access(AccessPolicy::Open),
            )
            .route(RouteDescriptor::get("/me", noop))
    }

    #[test]
    fn test_descriptor_override_wins_over_table_policy() {
        let table = table();

        let login = table.find(&Method::POST, "/login").unwrap();
        let me = table.find(&Method::GET, "/me").unwrap();

        assert_eq!(table.access_for(login), &AccessPolicy::Open);
        assert_eq!(table.access_for(me), &AccessPolicy::Authenticated);
    }

    #[test]
    fn test_rules_are_fixed_per_descriptor() {
        let table = table();

        let login = table.find(&Method::POST, "/login").unwrap();
        let me = table.find(&Method::GET, "/me").unwrap();

        assert_eq!(login.rule_set().fields(), vec!["password"]);
        assert!(me.rule_set().is_empty());
    }

    #[test]
    fn test_find_matches_method() {
        let table = table();

        assert!(table.find(&Method::GET, "/login").is_none());
        assert_eq!(table.routes().count(), 2);
    }
}
