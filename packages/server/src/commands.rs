//! Offline CLI commands: issue, verify, inspect, hash-password

use anyhow::{Context, Result};
use authlab_token::{TokenConfig, TokenService};

/// Prints a token for `subject`.
pub fn issue(config: &TokenConfig, subject: &str) -> Result<()> {
    let service = TokenService::from_config(config).context("invalid token configuration")?;
    let token = service.issue_now(subject)?;
    println!("{token}");
    Ok(())
}

/// Verifies `token` and prints its claims as JSON.
pub fn verify(config: &TokenConfig, token: &str) -> Result<()> {
    let service = TokenService::from_config(config).context("invalid token configuration")?;
    let claims = service.verify_now(token).context("token rejected")?;
    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}

/// Prints the decoded segments of `token` without checking anything.
pub fn inspect(token: &str) -> Result<()> {
    let (header, claims) = TokenService::decode_unverified(token)?;
    let signature = token.rsplit('.').next().unwrap_or_default();
    println!("Header:    {}", serde_json::to_string(&header)?);
    println!("Claims:    {}", serde_json::to_string(&claims)?);
    println!("Signature: {signature}");
    println!("(not verified)");
    Ok(())
}

/// Prints an Argon2id hash of `password`.
pub fn hash_password(password: &str) -> Result<()> {
    let hash = authlab_auth::password::hash_password(password)?;
    println!("{hash}");
    Ok(())
}
