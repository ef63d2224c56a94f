use std::path::PathBuf;
use std::sync::Arc;

use bestseat_catalog::Catalog;
use bestseat_client::PredictionClient;
use bestseat_config::Config;
use bestseat_types::{AppEvent, SelectionField};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod context;
pub mod controller;
pub mod events;
pub mod logging;
pub mod oneshot;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "bestseat", version, about = "Find the best seat for a ball game")]
struct Cli {
    /// Config file (defaults to ./config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Prediction backend origin
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory for prediction images
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one selection and print the image path
    Predict {
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
        #[arg(long)]
        venue: String,
    },
    /// Print a catalog
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Teams,
    Venues,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.backend_url {
            config.network.backend_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.network.timeout_seconds = timeout;
        }
        if let Some(dir) = &self.output_dir {
            config.ui.output_dir = dir.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.json_logs);

    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    match cli.command {
        None => {
            run(config).await?;
            // The blocking stdin reader would otherwise hold up runtime shutdown
            std::process::exit(0);
        }
        Some(Command::Predict { team1, team2, venue }) => {
            let catalog = load_catalog(&config)?;
            let client = prediction_client(&config)?;

            let cancel = CancellationToken::new();
            let ctrl_c_cancel = cancel.clone();
            tokio::spawn(async move {
                if signal::ctrl_c().await.is_ok() {
                    ctrl_c_cancel.cancel();
                }
            });

            let path = oneshot::predict_once(
                &config,
                &catalog,
                &client,
                [
                    (SelectionField::Team1, team1.as_str()),
                    (SelectionField::Team2, team2.as_str()),
                    (SelectionField::Venue, venue.as_str()),
                ],
                &cancel,
            )
            .await?;

            println!("{}", path.display());
        }
        Some(Command::List { kind }) => {
            let catalog = load_catalog(&config)?;
            match kind {
                ListKind::Teams => {
                    for team in catalog.teams() {
                        println!("{}\t{}", team.abbr, team.name);
                    }
                }
                ListKind::Venues => {
                    for stadium in catalog.stadiums() {
                        println!("{stadium}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    Ok(Catalog::load(
        config.catalog.teams_file.as_deref(),
        config.catalog.stadiums_file.as_deref(),
    )?)
}

fn prediction_client(config: &Config) -> anyhow::Result<PredictionClient> {
    Ok(PredictionClient::new(
        config.network.backend_url.clone(),
        config.network.timeout(),
    )?)
}

/// Interactive console session
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = prediction_client(&config)?;
    let check_on_startup = config.network.check_on_startup;
    tracing::info!("Prediction endpoint: {}", client.endpoint());

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state.clone(), Arc::new(client.clone()));

    if check_on_startup {
        let ui_tx = controller.ui_sender();
        tokio::spawn(async move {
            let event = match client.check_connection().await {
                Ok(status) => {
                    tracing::info!("Prediction backend answered with {}", status);
                    AppEvent::BackendReady
                }
                Err(e) => {
                    tracing::warn!("Prediction backend unreachable: {}", e);
                    AppEvent::StatusUpdate(format!("Prediction service unreachable: {e}"))
                }
            };
            let _ = ui_tx.send(event).await;
        });
    }

    let mut tasks = controller.spawn_tasks();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
                tasks.shutdown().await;
                break;
            }
            next = tasks.join_next() => match next {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("task exited: {e:#}");
                    controller.shutdown();
                    tasks.shutdown().await;
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    controller.shutdown();
                    tasks.shutdown().await;
                    break;
                }
            }
        }
    }

    if let Some(in_flight) = state.in_flight.lock().await.take() {
        in_flight.cancel.cancel();
    }
    state.images.lock().await.release();

    Ok(())
}
