//! Credential loading from the process environment

use anyhow::{anyhow, Result};

/// Environment variable holding the platform username
pub const USERNAME_ENV: &str = "DEGIRO_USER";
/// Environment variable holding the platform password
pub const PASSWORD_ENV: &str = "DEGIRO_PASS";

/// Login credentials for the trading platform
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from the environment; absence of either variable is fatal
    pub fn from_env() -> Result<Self> {
        let username = std::env::var(USERNAME_ENV)
            .map_err(|_| anyhow!("{} not set in environment", USERNAME_ENV))?;
        let password = std::env::var(PASSWORD_ENV)
            .map_err(|_| anyhow!("{} not set in environment", PASSWORD_ENV))?;
        Ok(Self { username, password })
    }
}
