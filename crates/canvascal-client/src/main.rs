//! canvascal CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use canvascal_client::cli::{Cli, Command, ConfigAction};
use canvascal_client::commands;
use canvascal_client::config::ClientConfig;
use canvascal_client::error::{ClientError, ClientResult};
use canvascal_core::{OutputFormat, TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already alerted by the exporter
        Err(ClientError::Export) => ExitCode::FAILURE,
        Err(e @ ClientError::Fetch(_)) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    match cli.command {
        Command::List { json } => {
            let views = commands::load_views(&config).await?;
            let format = if json || config.display.json {
                OutputFormat::Json
            } else {
                OutputFormat::Tty
            };
            commands::list::run(&views, format)
        }
        Command::New => {
            let views = commands::load_views(&config).await?;
            commands::new::run(&views)
        }
        Command::Google { id, open, copy } => {
            let views = commands::load_views(&config).await?;
            commands::google::run(&views, &id, open, copy)
        }
        Command::Export { ids, output } => {
            let views = commands::load_views(&config).await?;
            commands::export::run(&views, &ids, output.as_deref(), &config.export)
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
