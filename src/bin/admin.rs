//! CLI administration tool for accounts-api.
//!
//! Manages users and roles directly against the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --name "Ada" --email ada@example.com --admin
//!
//! # Grant or revoke admin
//! cargo run --bin admin -- user promote ada@example.com
//! cargo run --bin admin -- user demote ada@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `JWT_SECRET` (required, same value as the server)

use accounts_api::api::dto::auth::RegisterRequest;
use accounts_api::application::services::{AuthService, TokenService};
use accounts_api::config::{self, Config, mask_connection_string};
use accounts_api::domain::entities::Role;
use accounts_api::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing accounts-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Create a user
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Grant the admin role
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Grant the admin role
    Promote { email: String },

    /// Revoke the admin role
    Demote { email: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type Users = AuthService<PgUserRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL or DB_HOST must be set for the admin tool")?;

    let pool = PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to {}",
            mask_connection_string(&database_url)
        )
    })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool, config: &Config) -> Result<()> {
    let users: Users = AuthService::new(
        Arc::new(PgUserRepository::new(Arc::new(pool.clone()))),
        Arc::new(TokenService::new(&config.jwt_secret, config.jwt_ttl_seconds)),
    );

    match action {
        UserAction::List => list_users(&users).await?,
        UserAction::Create {
            name,
            email,
            admin,
            yes,
        } => create_user(&users, name, email, admin, yes).await?,
        UserAction::Promote { email } => set_role(&users, &email, Role::Admin).await?,
        UserAction::Demote { email } => set_role(&users, &email, Role::User).await?,
    }

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
///   ID  Name                 Email                          Role    Created
///   1   Ada                  ada@example.com                admin   2026-03-01 10:30
/// ```
async fn list_users(users: &Users) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let all = users
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<30} {:<7} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "-".repeat(80).bright_black());

    for user in &all {
        let role = match user.role {
            Role::Admin => user.role.as_str().magenta(),
            Role::User => user.role.as_str().normal(),
        };

        println!(
            "  {:<4} {:<20} {:<30} {:<7} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());

    Ok(())
}

async fn create_user(
    users: &Users,
    name: Option<String>,
    email: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password (6+ characters)")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|p: &String| {
            if p.chars().count() >= 6 {
                Ok(())
            } else {
                Err("Password must be 6 or more characters")
            }
        })
        .interact()?;

    check_new_user(&name, &email, &password)?;

    let role = if admin { Role::Admin } else { Role::User };

    println!();
    println!("  Name:  {}", name.cyan());
    println!("  Email: {}", email.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let session = users
        .register(name, email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    let user = if admin {
        users
            .set_role(&session.user.email, Role::Admin)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to grant admin role: {}", e))?
    } else {
        session.user
    };

    println!(
        "{} {} (id {})",
        "User created:".green().bold(),
        user.email,
        user.id
    );

    Ok(())
}

/// Applies the registration rules of `POST /api/v1/auth/register`.
fn check_new_user(name: &str, email: &str, password: &str) -> Result<()> {
    let body = json!({ "name": name, "email": email, "password": password });

    RegisterRequest::rules().evaluate(&body).map_err(|violations| {
        let reasons: Vec<String> = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        anyhow::anyhow!("Invalid user: {}", reasons.join("; "))
    })
}

async fn set_role(users: &Users, email: &str, role: Role) -> Result<()> {
    let user = users
        .set_role(email, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {}", e))?;

    println!(
        "{} {} is now {}",
        "Done:".green().bold(),
        user.email,
        user.role.as_str().bright_white().bold()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_new_user_accepts_valid_input() {
        assert!(check_new_user("Ada", "ada@example.com", "secret1").is_ok());
    }

    #[test]
    fn test_check_new_user_rejects_blank_name_and_bad_email() {
        let err = check_new_user(" ", "bad", "secret1").unwrap_err().to_string();

        assert!(err.contains("name"));
        assert!(err.contains("email"));
        assert!(!err.contains("password"));
    }

    #[test]
    fn test_check_new_user_rejects_short_password() {
        let err = check_new_user("Ada", "ada@example.com", "12345")
            .unwrap_err()
            .to_string();

        assert!(err.contains("password"));
    }
}
