use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::client::DegiroClient;
use crate::auth;
use crate::config::Credentials;
use crate::data_paths::DataPaths;
use crate::portfolio::{display, service};
use crate::session::SessionStore;

#[derive(Args)]
pub struct PortfolioArgs {
    /// Print the valued portfolio as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub struct PortfolioCommand {
    args: PortfolioArgs,
}

impl PortfolioCommand {
    pub fn new(args: PortfolioArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, base_url: &str, data_paths: DataPaths) -> Result<()> {
        let credentials = Credentials::from_env()?;
        let client = DegiroClient::new(base_url)?;
        let store = SessionStore::new(&data_paths);

        let config = auth::establish_config(&client, &store, &credentials).await?;
        let account = client.fetch_account(&config).await?;
        info!("Fetching portfolio for account {}", account.int_account);

        let portfolio = service::fetch_valued_portfolio(&client, &config, &account).await?;

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&portfolio)?);
        } else {
            display::print_portfolio(&account, &portfolio);
        }

        Ok(())
    }
}
