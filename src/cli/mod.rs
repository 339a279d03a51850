//! CLI module for degirobot
//!
//! Command-line interface for the DEGIRO portfolio client. Uses clap for
//! argument parsing and a structured command pattern: one module per
//! subcommand, each owning its args and execution.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::api::client::DEFAULT_BASE_URL;
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{self, LoggingConfig};

use commands::account::{AccountArgs, AccountCommand};
use commands::login::{LoginArgs, LoginCommand};
use commands::portfolio::{PortfolioArgs, PortfolioCommand};

#[derive(Parser)]
#[command(name = "degirobot")]
#[command(version)]
#[command(about = "Rust CLI portfolio client for the DEGIRO trading platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Trader host base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch open positions and print the portfolio valuation
    Portfolio(PortfolioArgs),

    /// Show account metadata for the authenticated user
    Account(AccountArgs),

    /// Force a fresh login and persist the session token
    Login(LoginArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);

        // Ensure all directories exist
        data_paths.ensure_directories()?;

        logging::init_logging(LoggingConfig::new(data_paths.clone()), self.verbose)?;

        match self.command {
            Commands::Portfolio(args) => {
                PortfolioCommand::new(args)
                    .execute(&self.base_url, data_paths)
                    .await
            }
            Commands::Account(args) => {
                AccountCommand::new(args)
                    .execute(&self.base_url, data_paths)
                    .await
            }
            Commands::Login(args) => {
                LoginCommand::new(args)
                    .execute(&self.base_url, data_paths)
                    .await
            }
        }
    }
}
