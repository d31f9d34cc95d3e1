// Authentication commands: login, logout, registration, password recovery

use anyhow::{bail, Result};
use jugueteria_client::{LoginRequest, RegisterRequest, ResetPasswordRequest};

use super::{enter, validate_email, validate_password, AppContext};
use crate::output::print_field;

pub async fn login(ctx: &AppContext, email: String, password: String) -> Result<()> {
    validate_email(&email)?;
    // Unlike registration, login only requires a password to be present:
    // accounts may predate the current length rule
    if password.is_empty() {
        bail!("password must not be empty");
    }
    enter(ctx, "/login")?;

    let profile = ctx.client.login(&LoginRequest { email, password }).await?;

    if ctx.output.is_text() {
        if ctx.quiet {
            println!("{}", profile.email);
        } else {
            println!("Logged in as {}", profile.email);
            print_field("Name", &profile.name);
            print_field("Roles", &profile.roles.join(", "));
        }
    } else {
        ctx.output.print_value(&profile);
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.client.session().logout();
    if !ctx.quiet {
        println!("Logged out");
    }
    Ok(())
}

pub async fn register(
    ctx: &AppContext,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<()> {
    validate_email(&email)?;
    validate_password(&password)?;
    enter(ctx, "/register")?;

    ctx.client
        .register(&RegisterRequest {
            first_name,
            last_name,
            email: email.clone(),
            password,
        })
        .await?;

    if !ctx.quiet {
        println!("Account created for {email}; you can now log in");
    }
    Ok(())
}

pub async fn forgot_password(ctx: &AppContext, email: String) -> Result<()> {
    validate_email(&email)?;
    enter(ctx, "/password-recovery")?;

    ctx.client.request_password_recovery(&email).await?;

    if !ctx.quiet {
        println!("If {email} exists, a recovery email is on its way");
    }
    Ok(())
}

pub async fn reset_password(ctx: &AppContext, token: String, password: String) -> Result<()> {
    validate_password(&password)?;
    // The reset page is reached from the mailed link, token in the query
    enter(ctx, &format!("/reset-password?token={token}"))?;

    ctx.client
        .reset_password(&ResetPasswordRequest {
            token,
            new_password: password,
        })
        .await?;

    if !ctx.quiet {
        println!("Password updated; log in with the new one");
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.client.session().current_value() {
        Some(profile) => {
            if ctx.output.is_text() {
                print_field("Email", &profile.email);
                print_field("Name", &profile.name);
                print_field("Roles", &profile.roles.join(", "));
            } else {
                ctx.output.print_value(&profile);
            }
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
