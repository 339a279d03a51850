use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::api::client::DegiroClient;
use crate::auth;
use crate::config::Credentials;
use crate::data_paths::DataPaths;
use crate::session::SessionStore;

#[derive(Args)]
pub struct LoginArgs {}

pub struct LoginCommand {
    #[allow(dead_code)]
    args: LoginArgs,
}

impl LoginCommand {
    pub fn new(args: LoginArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, base_url: &str, data_paths: DataPaths) -> Result<()> {
        let credentials = Credentials::from_env()?;
        let client = DegiroClient::new(base_url)?;
        let store = SessionStore::new(&data_paths);

        auth::force_login(&client, &store, &credentials).await?;

        println!(
            "{} Session established and saved to {}",
            "✅".bright_green(),
            data_paths.session_file().display()
        );
        Ok(())
    }
}
