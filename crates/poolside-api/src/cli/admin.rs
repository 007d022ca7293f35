//! `poolside create-admin`: bootstrap staff accounts from the command line.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Password;

use poolside_types::auth::Role;
use poolside_types::user::CreateUserRequest;

use crate::state::AppState;

/// Create an account with the given role, prompting for the password if needed.
pub async fn create_admin(
    state: &AppState,
    email: String,
    name: String,
    phone: Option<String>,
    role: Role,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt(format!("Password for {}", style(&email).bold()))
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let user = state
        .user_service
        .create_user(CreateUserRequest {
            email: Some(email),
            name: Some(name),
            password: Some(password),
            phone,
            role: Some(role),
        })
        .await
        .context("could not create account")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        println!(
            "  {} Created {} account {} (id {})",
            style("✓").green().bold(),
            style(user.role).bold(),
            style(&user.email).cyan(),
            user.id
        );
    }

    Ok(())
}
