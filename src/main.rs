use std::process::ExitCode;

use log::{error, info};
use portal_world::{EngineBuilder, ExperienceConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ExperienceConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting {}", config.window.title);

    let result = EngineBuilder::new()
        .with_config(config)
        .build()
        .and_then(|engine| engine.run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
