use anyhow::Result;
use clap::Args;

use crate::api::client::DegiroClient;
use crate::auth;
use crate::config::Credentials;
use crate::data_paths::DataPaths;
use crate::portfolio::display;
use crate::session::SessionStore;

#[derive(Args)]
pub struct AccountArgs {}

pub struct AccountCommand {
    #[allow(dead_code)]
    args: AccountArgs,
}

impl AccountCommand {
    pub fn new(args: AccountArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, base_url: &str, data_paths: DataPaths) -> Result<()> {
        let credentials = Credentials::from_env()?;
        let client = DegiroClient::new(base_url)?;
        let store = SessionStore::new(&data_paths);

        let config = auth::establish_config(&client, &store, &credentials).await?;
        let account = client.fetch_account(&config).await?;

        display::print_account(&account);
        Ok(())
    }
}
