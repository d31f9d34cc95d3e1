// Jugueteria CLI
//
// Decision: Use clap derive for argument parsing, one subcommand tree per
// page group of the storefront/back office.
// Decision: The session is wired exactly once here - file store into
// session manager into client and router - and handed down by reference.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jugueteria_client::ApiClient;
use jugueteria_core::{FileTokenStore, Router, SessionManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::AppContext;
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "jugueteria")]
#[command(about = "Jugueteria storefront and back office")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(
        long,
        env = "JUGUETERIA_API_URL",
        default_value = "http://localhost:8080/api/v1"
    )]
    pub api_url: String,

    /// Directory holding the persisted credential (defaults to ~/.jugueteria)
    #[arg(long, env = "JUGUETERIA_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the session and clear the stored credential
    Logout,

    /// Create a customer account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Request a password-recovery email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password using a mailed reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },

    /// Show the current session
    Whoami,

    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: commands::products::ProductsCommand,
    },

    /// List product categories
    Categories,

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: commands::cart::CartCommand,
    },

    /// Review the cart and pay
    Checkout {
        #[command(subcommand)]
        command: commands::checkout::CheckoutCommand,
    },

    /// Your order history
    Orders {
        #[command(subcommand)]
        command: commands::orders::OrdersCommand,
    },

    /// View or update your profile
    Profile {
        #[command(subcommand)]
        command: commands::profile::ProfileCommand,
    },

    /// Write product reviews
    Reviews {
        #[command(subcommand)]
        command: commands::reviews::ReviewsCommand,
    },

    /// Administration panel
    Admin {
        #[command(subcommand)]
        command: commands::admin::AdminCommand,
    },

    /// Worker panel
    Worker {
        #[command(subcommand)]
        command: commands::worker::WorkerCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jugueteria=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.api_url.clone(), cli.config_dir.clone())?;

    let store = FileTokenStore::new(&config.config_dir);
    let (session, mut redirects) = SessionManager::new(Box::new(store));
    let session = Arc::new(session);

    let ctx = AppContext {
        client: ApiClient::new(&config.api_url, session.clone()),
        router: Router::new(session),
        output: OutputFormat::from_str(&cli.output),
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => commands::auth::register(&ctx, first_name, last_name, email, password).await,
        Commands::ForgotPassword { email } => commands::auth::forgot_password(&ctx, email).await,
        Commands::ResetPassword { token, password } => {
            commands::auth::reset_password(&ctx, token, password).await
        }
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Products { command } => commands::products::run(command, &ctx).await,
        Commands::Categories => commands::products::categories(&ctx).await,
        Commands::Cart { command } => commands::cart::run(command, &ctx).await,
        Commands::Checkout { command } => commands::checkout::run(command, &ctx).await,
        Commands::Orders { command } => commands::orders::run(command, &ctx).await,
        Commands::Profile { command } => commands::profile::run(command, &ctx).await,
        Commands::Reviews { command } => commands::reviews::run(command, &ctx).await,
        Commands::Admin { command } => commands::admin::run(command, &ctx).await,
        Commands::Worker { command } => commands::worker::run(command, &ctx).await,
    };

    // Surface any forced navigation the session signalled: a stale stored
    // credential evicted at startup, a rejected token, or the logout itself
    while let Ok(target) = redirects.try_recv() {
        if !cli.quiet {
            eprintln!("session ended, continue at {}", target.path());
        }
    }

    result
}
