//! Session commands: login, logout, register, whoami.

use crate::cli::{LoginArgs, RegisterArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use quaerendo_sdk::ApiClient;
use std::path::Path;

/// Execute the login command.
pub async fn execute_login(args: LoginArgs, client: &ApiClient, formatter: &Formatter) -> Result<()> {
    if args.password.is_empty() {
        return Err(CliError::InvalidInput("Password must not be empty".to_string()));
    }

    client.login(&args.username, &args.password).await?;
    println!("{}", formatter.success(&format!("Logged in as {}", args.username)));
    Ok(())
}

/// Execute the register command.
pub async fn execute_register(
    args: RegisterArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    if !args.email.contains('@') {
        return Err(CliError::InvalidInput(format!("'{}' is not an email address", args.email)));
    }

    client
        .register(&args.username, &args.email, &args.password)
        .await?;
    println!("{}", formatter.success(&format!("Registered {}", args.username)));
    Ok(())
}

/// Execute the logout command.
pub fn execute_logout(client: &ApiClient, formatter: &Formatter) -> Result<()> {
    client.logout()?;
    println!("{}", formatter.success("Logged out"));
    Ok(())
}

/// Execute the whoami command.
pub fn execute_whoami(client: &ApiClient, storage: &Path, formatter: &Formatter) -> Result<()> {
    match client.session().token() {
        Some(token) if !token.is_empty() => {
            println!("{}", formatter.success(&format!("Authenticated ({})", mask_token(&token))));
        }
        _ => println!("{}", formatter.info("Not logged in")),
    }
    println!("  API:     {}", client.base_url());
    println!("  Storage: {}", storage.display());
    Ok(())
}

/// Show only the first few characters of a token.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if visible.len() == token.len() {
        "*".repeat(token.chars().count())
    } else {
        format!("{}…", visible)
    }
}
