//! CLI administration tool for reflinks.
//!
//! Provides commands for managing users and session tokens, viewing
//! statistics, and performing database operations without requiring HTTP
//! API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! cargo run --bin admin -- user create --email a@b.com --username alice
//!
//! # Issue a session token
//! cargo run --bin admin -- session create --username alice
//!
//! # Revoke a session token
//! cargo run --bin admin -- session revoke <raw-token>
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for session commands): HMAC key

use reflinks::application::services::AuthService;
use reflinks::domain::entities::NewUser;
use reflinks::domain::repositories::{SessionRepository, UserRepository};
use reflinks::infrastructure::persistence::{PgSessionRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing reflinks.
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

    /// Manage session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user on the free plan
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Session management subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Issue a new session token for a user
    Create {
        /// Username of the account
        #[arg(short, long)]
        username: String,

        /// Session name (e.g., "CLI", "CI deploy")
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List sessions for a user
    List {
        #[arg(short, long)]
        username: String,
    },

    /// Revoke a session by raw token
    Revoke { token: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            email,
            username,
            yes,
        } => create_user(repo, email, username, yes).await?,
    }

    Ok(())
}

/// Creates a new user with interactive prompts.
async fn create_user(
    repo: Arc<PgUserRepository>,
    email: Option<String>,
    username: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    println!();
    println!("  Email:    {}", email.cyan());
    println!("  Username: {}", username.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = repo
        .create(NewUser { email, username })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created!".green().bold());
    println!("  ID: {}", user.id.to_string().bright_yellow());

    Ok(())
}

/// Dispatches session management commands.
async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let pool = Arc::new(pool.clone());
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool));
    let auth = AuthService::new(sessions.clone(), signing_secret);

    match action {
        SessionAction::Create { username, name } => {
            let user = users
                .find_by_username(&username)
                .await
                .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?
                .with_context(|| format!("No user named '{username}'"))?;

            let token = auth
                .issue(user.id, name.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to issue session: {}", e))?;

            println!("{}", "✅ Session created!".green().bold());
            println!();
            println!(
                "{}",
                "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
                    .red()
                    .bold()
            );
            println!();
            println!(
                "  {}: Bearer {}",
                "Authorization".bright_cyan(),
                token.bright_yellow()
            );
        }
        SessionAction::List { username } => {
            let user = users
                .find_by_username(&username)
                .await
                .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?
                .with_context(|| format!("No user named '{username}'"))?;

            let list = sessions
                .list_by_user(user.id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

            if list.is_empty() {
                println!("{}", "  No sessions found".yellow());
                return Ok(());
            }

            println!(
                "  {:<24} {:<22} {:<10}",
                "Name".bright_white().bold(),
                "Created".bright_white().bold(),
                "Status".bright_white().bold()
            );
            println!("  {}", "─".repeat(58).bright_black());

            for session in &list {
                let status = if session.revoked {
                    "REVOKED".red()
                } else {
                    "ACTIVE".green()
                };
                println!(
                    "  {:<24} {:<22} {}",
                    session.name.as_deref().unwrap_or("-"),
                    session.created_at.format("%Y-%m-%d %H:%M"),
                    status
                );
            }
        }
        SessionAction::Revoke { token } => {
            auth.revoke(&token)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

            println!("{}", "✅ Session revoked".green().bold());
        }
    }

    Ok(())
}

/// Shows link/click/domain counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;
    let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
        .fetch_one(pool)
        .await?;
    let conversions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE converted")
        .fetch_one(pool)
        .await?;
    let domains: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM custom_domains")
        .fetch_one(pool)
        .await?;

    println!("  Users:       {}", users.to_string().bright_yellow());
    println!("  Links:       {}", links.to_string().bright_yellow());
    println!("  Clicks:      {}", clicks.to_string().bright_yellow());
    println!("  Conversions: {}", conversions.to_string().bright_yellow());
    println!("  Domains:     {}", domains.to_string().bright_yellow());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
