//! Business logic services for the application layer.

pub mod account_service;
pub mod auth_service;
pub mod category_service;
pub mod password;
pub mod token_service;

pub use account_service::AccountService;
pub use auth_service::{AuthService, AuthSession};
pub use category_service::CategoryService;
pub use token_service::{Claims, TokenService};
