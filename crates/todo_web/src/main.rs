//! `todo-web` binary: reads the environment, opens the store and serves.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};
use todo_core::init_logging;
use todo_web::{create_router, AppConfig, AppState, OpenAiCompletionClient, Server, TodoStore};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todo-web: configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("todo-web: logging error: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_run module=web status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
    if config.completion.api_key.is_none() {
        info!("event=completion_config module=web status=disabled reason=missing_api_key");
    }

    let store = TodoStore::open(&config.db_path)?;
    let completion = Arc::new(OpenAiCompletionClient::new(&config.completion));
    let state = AppState::new(store, completion).with_list_timeout(config.list_timeout);

    Server::new(config.server.clone())
        .run(create_router(state))
        .await?;
    Ok(())
}
