//! DTOs for the authentication and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::validation::{Rule, RuleSet};
use crate::application::services::AuthSession;
use crate::domain::entities::{Role, User};

/// Request body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new()
            .rule(Rule::NonEmpty("name"), "Name is required")
            .rule(Rule::IsEmail("email"), "Please include a valid email")
            .rule(
                Rule::MinLength("password", 6),
                "Please enter a password with 6 or more characters",
            )
    }
}

/// Request body for `POST /api/v1/auth/login`.
///
/// Only the presence of `password` is checked before the handler; a wrong
/// password is reported by the handler as bad credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new()
            .rule(Rule::IsEmail("email"), "Please include a valid email")
            .rule(Rule::Exists("password"), "Password is required")
    }
}

/// Request body for `PUT /api/v1/auth/updatedetails`.
#[derive(Debug, Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: String,
    pub email: Option<String>,
}

impl UpdateDetailsRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new()
            .rule(Rule::NonEmpty("name"), "Name is required")
            .rule(
                Rule::Optional(Box::new(Rule::IsEmail("email"))),
                "Please include a valid email",
            )
    }
}

/// Request body for `PUT /api/v1/auth/updatepassword`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl UpdatePasswordRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new()
            .rule(Rule::Exists("currentPassword"), "Current password is required")
            .rule(
                Rule::MinLength("newPassword", 6),
                "New password must be 6 or more characters",
            )
    }
}

/// Public view of a user. The password hash is never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub preferences: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            preferences: user.preferences,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response for register, login and password change.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_rules_report_email_and_password() {
        let violations = RegisterRequest::rules()
            .evaluate(&json!({ "name": "A", "email": "bad", "password": "123" }))
            .unwrap_err();

        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_register_rules_on_empty_body() {
        let violations = RegisterRequest::rules().evaluate(&json!({})).unwrap_err();

        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_login_only_checks_password_presence() {
        assert!(
            LoginRequest::rules()
                .evaluate(&json!({ "email": "ada@example.com", "password": "" }))
                .is_ok()
        );
    }

    #[test]
    fn test_update_details_email_is_optional() {
        let rules = UpdateDetailsRequest::rules();

        assert!(rules.evaluate(&json!({ "name": "Ada" })).is_ok());
        assert!(rules.evaluate(&json!({ "name": "Ada", "email": "nope" })).is_err());
    }

    #[test]
    fn test_update_password_cites_new_password() {
        let violations = UpdatePasswordRequest::rules()
            .evaluate(&json!({ "currentPassword": "x" }))
            .unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "newPassword");
    }

    #[test]
    fn test_user_response_is_camel_case_without_hash() {
        let now = Utc::now();
        let user = User {
            id: 1,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "secret-hash".into(),
            role: Role::User,
            preferences: Map::new(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("passwordHash").is_none());
        assert!(!value.to_string().contains("secret-hash"));
    }
}
