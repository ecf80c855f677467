//! FieldTask CLI entry point

use std::process::ExitCode;

use clap::Parser;

use field_task::cli::{
    app::{
        load_merged_config, resolve_base_url, run_media, run_record, run_show, run_status,
        run_tasks, RecordOptions, EXIT_ERROR, EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use field_task::domain::config::AppConfig;
use field_task::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let Cli {
        tenant,
        api_host,
        api_scheme,
        base_url,
        command,
    } = Cli::parse();
    let presenter = Presenter::new();

    // Config subcommand does not need a tenant
    let command = match command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        tenant_domain: tenant,
        api_host,
        api_scheme,
        chunk_size: None,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let base_url = match resolve_base_url(&config, base_url) {
        Ok(url) => url,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match command {
        Commands::Tasks => run_tasks(&base_url).await,
        Commands::Show { id } => run_show(&base_url, id).await,
        Commands::Status { id, status } => run_status(&base_url, id, status).await,
        Commands::Media { id } => run_media(&base_url, id).await,
        Commands::Record {
            id,
            input,
            mime,
            chunk_size,
        } => {
            let options = RecordOptions {
                task_id: id,
                input,
                mime_type: mime.map(Into::into),
                chunk_size,
            };
            run_record(&base_url, &config, options).await
        }
        Commands::Config { .. } => unreachable!(), // handled above
    }
}
