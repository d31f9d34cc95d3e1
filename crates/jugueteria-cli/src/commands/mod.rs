// Command modules, one per page group of the storefront/back office

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reviews;
pub mod worker;

use anyhow::{bail, Result};
use jugueteria_client::ApiClient;
use jugueteria_core::{Navigation, Router};

use crate::output::OutputFormat;

/// Everything a command needs: the API client (which carries the session),
/// the router, and output preferences.
pub struct AppContext {
    pub client: ApiClient,
    pub router: Router,
    pub output: OutputFormat,
    pub quiet: bool,
}

/// Walk the route table before rendering a page-backed command, keeping the
/// guard-before-navigation order of the storefront. A denied navigation
/// reports where the user was redirected and aborts the command.
pub fn enter(ctx: &AppContext, path: &str) -> Result<()> {
    match ctx.router.navigate(path) {
        Navigation::Allowed { .. } => Ok(()),
        Navigation::Redirected { to } => {
            bail!("access to {path} denied, redirected to {to}")
        }
    }
}

/// Form-level email check: bad input never reaches the network.
pub fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        bail!("'{email}' is not a valid email address");
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        bail!("'{email}' is not a valid email address");
    }
    Ok(())
}

/// Form-level password check, mirroring the registration form's minimum.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        bail!("password must be at least 6 characters");
    }
    Ok(())
}
