//! Authentication and profile service.

use serde_json::{Value, json};
use std::sync::Arc;

use crate::application::services::password::{hash_password, verify_password};
use crate::application::services::token_service::TokenService;
use crate::domain::entities::{NewUser, Role, User, UserDetails, merge_preferences};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// A freshly issued access token together with its user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Service for registration, login, bearer authentication and profile updates.
///
/// Passwords are hashed with Argon2 before they reach the repository; tokens
/// are HS256 JWTs issued by [`TokenService`].
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    /// Registers a user and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthSession, AppError> {
        let email = normalize_email(&email);

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(password).await?;

        let user = self
            .repository
            .create(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");

        self.session_for(user)
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, email: String, password: String) -> Result<AuthSession, AppError> {
        let email = normalize_email(&email);

        let Some(user) = self.repository.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = user.id, "login rejected: wrong password");
            return Err(invalid_credentials());
        }

        self.session_for(user)
    }

    /// Resolves a bearer token to the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or its user
    /// no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id()?;

        self.repository.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({"reason": "User no longer exists"}))
        })
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// Updates name and optionally email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email belongs to another user.
    pub async fn update_details(
        &self,
        id: i64,
        name: String,
        email: Option<String>,
    ) -> Result<User, AppError> {
        let email = email.map(|e| normalize_email(&e));

        if let Some(ref email) = email
            && let Some(other) = self.repository.find_by_email(email).await?
            && other.id != id
        {
            return Err(AppError::conflict(
                "Email already in use",
                json!({ "email": email }),
            ));
        }

        let details = UserDetails {
            name: name.trim().to_string(),
            email,
        };

        self.repository.update_details(id, details).await
    }

    /// Replaces the password after checking the current one, and issues a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if `current_password` is wrong.
    pub async fn update_password(
        &self,
        id: i64,
        current_password: String,
        new_password: String,
    ) -> Result<AuthSession, AppError> {
        let user = self.get_user(id).await?;

        if !verify_password(current_password, user.password_hash.clone()).await? {
            return Err(AppError::unauthorized(
                "Password is incorrect",
                json!({ "field": "currentPassword" }),
            ));
        }

        let password_hash = hash_password(new_password).await?;
        self.repository.update_password(id, &password_hash).await?;

        tracing::info!(user_id = id, "password updated");

        self.session_for(User {
            password_hash,
            ..user
        })
    }

    /// Shallow-merges `patch` into the stored preferences.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if `patch` is not a JSON object.
    pub async fn update_preferences(&self, id: i64, patch: Value) -> Result<User, AppError> {
        let Value::Object(patch) = patch else {
            return Err(AppError::bad_request(
                "Preferences must be a JSON object",
                json!({}),
            ));
        };

        let user = self.get_user(id).await?;
        let merged = merge_preferences(&user.preferences, patch);

        self.repository.update_preferences(id, merged).await
    }

    /// Changes the role of the user registered under `email`.
    pub async fn set_role(&self, email: &str, role: Role) -> Result<User, AppError> {
        let email = normalize_email(email);
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        self.repository.set_role(user.id, role).await
    }

    /// Checks storage connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AppError> {
        let token = self.tokens.issue(user.id, user.role)?;
        Ok(AuthSession { token, user })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;
    use serde_json::Map;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new("test-jwt-secret-with-enough-length!!", 3600))
    }

    fn sample_user(id: i64, email: &str, password_hash: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::User,
            preferences: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_success_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.email == "ada@example.com"
                    && new_user.password_hash.starts_with("$argon2")
                    && new_user.role == Role::User
            })
            .times(1)
            .returning(|new_user| Ok(sample_user(7, &new_user.email, &new_user.password_hash)));

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let session = service
            .register(
                " Ada ".to_string(),
                "Ada@Example.com ".to_string(),
                "secret1".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(session.user.id, 7);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(sample_user(1, email, "hash"))));
        mock_repo.expect_create().times(0);

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let result = service
            .register("Ada".into(), "ada@example.com".into(), "secret1".into())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_success() {
        let hash = hash_password("secret1".to_string()).await.unwrap();
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |email| Ok(Some(sample_user(3, email, &hash))));

        let tokens = tokens();
        let service = AuthService::new(Arc::new(mock_repo), tokens.clone());

        let session = service
            .login("ada@example.com".into(), "secret1".into())
            .await
            .unwrap();

        assert_eq!(tokens.verify(&session.token).unwrap().user_id().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = hash_password("secret1".to_string()).await.unwrap();
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .returning(move |email| Ok(Some(sample_user(3, email, &hash))));

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let err = service
            .login("ada@example.com".into(), "wrong-password".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let err = service
            .login("nobody@example.com".into(), "secret1".into())
            .await
            .unwrap_err();

        assert_eq!(err.to_error_info().message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 9)
            .returning(|_| Ok(None));

        let tokens = tokens();
        let token = tokens.issue(9, Role::User).unwrap();
        let service = AuthService::new(Arc::new(mock_repo), tokens);

        let err = service.authenticate(&token).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token_skips_repository() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        assert!(service.authenticate("garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_update_details_email_taken() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(sample_user(2, email, "hash"))));
        mock_repo.expect_update_details().times(0);

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let err = service
            .update_details(1, "Ada".into(), Some("taken@example.com".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_details_without_email_skips_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().times(0);
        mock_repo
            .expect_update_details()
            .withf(|id, details| *id == 1 && details.name == "Grace" && details.email.is_none())
            .times(1)
            .returning(|id, details| {
                let mut user = sample_user(id, "ada@example.com", "hash");
                user.name = details.name;
                Ok(user)
            });

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let user = service
            .update_details(1, "Grace".into(), None)
            .await
            .unwrap();

        assert_eq!(user.name, "Grace");
    }

    #[tokio::test]
    async fn test_update_password_wrong_current() {
        let hash = hash_password("secret1".to_string()).await.unwrap();
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_user(id, "ada@example.com", &hash))));
        mock_repo.expect_update_password().times(0);

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let err = service
            .update_password(1, "nope".into(), "new-secret".into())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_update_preferences_rejects_non_object() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let err = service
            .update_preferences(1, json!(["dark"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_update_preferences_merges() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|id| {
            let mut user = sample_user(id, "ada@example.com", "hash");
            user.preferences.insert("theme".into(), json!("dark"));
            Ok(Some(user))
        });
        mock_repo
            .expect_update_preferences()
            .withf(|_, prefs| prefs["theme"] == "dark" && prefs["currency"] == "EUR")
            .times(1)
            .returning(|id, prefs| {
                let mut user = sample_user(id, "ada@example.com", "hash");
                user.preferences = prefs;
                Ok(user)
            });

        let service = AuthService::new(Arc::new(mock_repo), tokens());

        let user = service
            .update_preferences(1, json!({ "currency": "EUR" }))
            .await
            .unwrap();

        assert_eq!(user.preferences.len(), 2);
    }
}
