mod backup;
mod cli;
mod config;
mod error;
mod logging;
mod model;
mod providers;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, warn};

use backup::pipeline::Pipeline;
use cli::Cli;
use config::{BackupConfig, LogLevel};
use providers::trello::TrelloProvider;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config
    let config = match config::load_config(cli.config.as_deref())
        .and_then(|file| BackupConfig::resolve(&cli, file))
    {
        Ok(config) => config,
        Err(err) => {
            logging::init(LogLevel::Info);
            error!("{err:#}");
            return ExitCode::from(1);
        }
    };

    logging::init(config.log_level);
    if !config.ignored_names.is_empty() {
        warn!(
            "Organization ids given; ignoring organization names {:?}",
            config.ignored_names
        );
    }

    let provider = TrelloProvider::new(config.api_url.clone(), config.credentials.clone());
    let mut pipeline = Pipeline::new(&config, &provider);

    let result = pipeline.run().await;
    debug!("Run ended in state {:?}", pipeline.state());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            error!("{:#}", anyhow::Error::from(err));
            ExitCode::from(code)
        }
    }
}
