use std::process::ExitCode;

use alkemy_data::logs::{init_logging, LogLevel};
use alkemy_data::DatabaseConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let backup = std::env::args().skip(1).any(|arg| arg == "--backup");

    let level = if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    init_logging(level);

    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match alkemy_data::run(&config, backup).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
