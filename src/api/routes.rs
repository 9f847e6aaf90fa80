//! Route tables for the versioned API.
//!
//! Every table is built once at startup; see [`crate::api::routing`] for how
//! gates and rules are layered.

use crate::api::dto::account::CreateAccountRequest;
use crate::api::dto::auth::{
    LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest,
};
use crate::api::dto::category::{AccountIdsRequest, CreateCategoryRequest};
use crate::api::handlers::{accounts, auth, categories, users};
use crate::api::routing::{AccessPolicy, RouteDescriptor, RouteTable};
use crate::domain::entities::Role;

/// Authentication and profile routes, mounted at `/api/v1/auth`.
///
/// # Endpoints
///
/// - `POST /register`        - Open; name, email, password rules
/// - `POST /login`           - Open; email, password rules
/// - `GET  /me`              - Authenticated
/// - `PUT  /updatedetails`   - Authenticated; name, optional email rules
/// - `PUT  /updatepassword`  - Authenticated; currentPassword, newPassword rules
/// - `PUT  /preferences`     - Authenticated
pub fn auth_routes() -> RouteTable {
    RouteTable::new(AccessPolicy::Authenticated)
        .route(
            RouteDescriptor::post("/register", auth::register)
                .rules(RegisterRequest::rules())
                .access(AccessPolicy::Open),
        )
        .route(
            RouteDescriptor::post("/login", auth::login)
                .rules(LoginRequest::rules())
                .access(AccessPolicy::Open),
        )
        .route(RouteDescriptor::get("/me", auth::me))
        .route(
            RouteDescriptor::put("/updatedetails", auth::update_details)
                .rules(UpdateDetailsRequest::rules()),
        )
        .route(
            RouteDescriptor::put("/updatepassword", auth::update_password)
                .rules(UpdatePasswordRequest::rules()),
        )
        .route(RouteDescriptor::put("/preferences", auth::update_preferences))
}

/// Category routes, mounted at `/api/v1/categories`.
///
/// The service wires this table with [`AccessPolicy::Authenticated`].
///
/// # Endpoints
///
/// - `GET    /`               - List categories
/// - `POST   /`               - Create; name rule
/// - `GET    /{id}`           - Fetch one
/// - `PUT    /{id}`           - Partial update
/// - `DELETE /{id}`           - Delete
/// - `GET    /{id}/accounts`  - Member accounts
/// - `POST   /{id}/accounts`  - Attach; accountIds rule
/// - `DELETE /{id}/accounts`  - Detach; accountIds rule
pub fn category_routes(policy: AccessPolicy) -> RouteTable {
    RouteTable::new(policy)
        .route(RouteDescriptor::get("/", categories::list_categories))
        .route(
            RouteDescriptor::post("/", categories::create_category)
                .rules(CreateCategoryRequest::rules()),
        )
        .route(RouteDescriptor::get("/{id}", categories::get_category))
        .route(RouteDescriptor::put("/{id}", categories::update_category))
        .route(RouteDescriptor::delete("/{id}", categories::delete_category))
        .route(RouteDescriptor::get(
            "/{id}/accounts",
            categories::list_category_accounts,
        ))
        .route(
            RouteDescriptor::post("/{id}/accounts", categories::attach_accounts)
                .rules(AccountIdsRequest::rules()),
        )
        .route(
            RouteDescriptor::delete("/{id}/accounts", categories::detach_accounts)
                .rules(AccountIdsRequest::rules()),
        )
}

/// Account routes, mounted at `/api/v1/accounts`.
pub fn account_routes(policy: AccessPolicy) -> RouteTable {
    RouteTable::new(policy)
        .route(RouteDescriptor::get("/", accounts::list_accounts))
        .route(
            RouteDescriptor::post("/", accounts::create_account)
                .rules(CreateAccountRequest::rules()),
        )
        .route(RouteDescriptor::get("/{id}", accounts::get_account))
        .route(RouteDescriptor::delete("/{id}", accounts::delete_account))
}

/// Administrative user listing, mounted at `/api/v1/users`; admins only.
pub fn user_routes() -> RouteTable {
    RouteTable::new(AccessPolicy::Roles(vec![Role::Admin]))
        .route(RouteDescriptor::get("/", users::list_users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_mutating_auth_routes_declare_rules() {
        let table = auth_routes();

        for (method, path) in [
            (Method::POST, "/register"),
            (Method::POST, "/login"),
            (Method::PUT, "/updatedetails"),
            (Method::PUT, "/updatepassword"),
        ] {
            let route = table.find(&method, path).unwrap();
            assert!(!route.rule_set().is_empty(), "{method} {path}");
        }

        let preferences = table.find(&Method::PUT, "/preferences").unwrap();
        assert!(preferences.rule_set().is_empty());
    }

    #[test]
    fn test_only_register_and_login_are_open() {
        let table = auth_routes();

        let open: Vec<_> = table
            .routes()
            .filter(|r| table.access_for(r) == &AccessPolicy::Open)
            .map(|r| r.path())
            .collect();

        assert_eq!(open, vec!["/register", "/login"]);
    }

    #[test]
    fn test_category_table_uses_given_policy_everywhere() {
        let table = category_routes(AccessPolicy::Authenticated);

        assert_eq!(table.routes().count(), 8);
        assert!(
            table
                .routes()
                .all(|r| table.access_for(r) == &AccessPolicy::Authenticated)
        );
    }

    #[test]
    fn test_category_membership_routes_require_account_ids() {
        let table = category_routes(AccessPolicy::Authenticated);

        for method in [Method::POST, Method::DELETE] {
            let route = table.find(&method, "/{id}/accounts").unwrap();
            assert_eq!(route.rule_set().fields(), vec!["accountIds"]);
        }
        assert!(
            table
                .find(&Method::PUT, "/{id}")
                .unwrap()
                .rule_set()
                .is_empty()
        );
    }

    #[test]
    fn test_user_routes_require_admin() {
        let table = user_routes();

        assert_eq!(table.policy(), &AccessPolicy::Roles(vec![Role::Admin]));
    }
}
