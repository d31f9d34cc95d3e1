// Own profile commands (authenticated)

use anyhow::Result;
use clap::Subcommand;
use jugueteria_client::ProfileUpdateRequest;

use super::{enter, validate_password, AppContext};
use crate::output::print_field;

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the profile of the current session
    Show,

    /// Update name or password
    Update {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// New password; omit to keep the current one
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn run(command: ProfileCommand, ctx: &AppContext) -> Result<()> {
    enter(ctx, "/profile")?;

    match command {
        ProfileCommand::Show => {
            // The profile page renders the session projection
            if let Some(profile) = ctx.client.session().current_value() {
                if ctx.output.is_text() {
                    print_field("Email", &profile.email);
                    print_field("Name", &profile.name);
                    print_field("Roles", &profile.roles.join(", "));
                } else {
                    ctx.output.print_value(&profile);
                }
            }
        }
        ProfileCommand::Update {
            first_name,
            last_name,
            password,
        } => {
            if let Some(ref password) = password {
                validate_password(password)?;
            }
            let user = ctx
                .client
                .update_profile(&ProfileUpdateRequest {
                    first_name,
                    last_name,
                    password,
                })
                .await?;
            if ctx.output.is_text() {
                if !ctx.quiet {
                    println!("Profile updated");
                }
                print_field("Name", &format!("{} {}", user.first_name, user.last_name));
                print_field("Email", &user.email);
            } else {
                ctx.output.print_value(&user);
            }
        }
    }
    Ok(())
}
