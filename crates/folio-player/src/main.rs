//! Folio presentation player entry point.

use std::error::Error;
use std::sync::Arc;

use folio_core::time::SystemClock;
use folio_player::assets::{AssetAudioPlayer, AssetSceneLoader};
use folio_player::config::PlayerConfig;
use folio_player::console::forward_lines;
use folio_player::driver::{PlayerInput, PresentationDriver, TracingSink};
use folio_sequence::domain::aggregates::SequenceController;
use folio_sequence::domain::commands::UserCommand;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Folio presentation player");

    // Read configuration from environment.
    let config = PlayerConfig::from_env()?;
    tracing::info!(
        frame_interval_ms = config.frame_interval.as_millis(),
        autostart = config.autostart,
        asset_root = %config.asset_root.display(),
        "configuration loaded"
    );

    let controller =
        SequenceController::new(Uuid::now_v7(), config.pacing.clone(), Arc::new(SystemClock))?;

    let (tx, rx) = mpsc::channel(16);
    if config.autostart {
        tx.send(PlayerInput::Command(UserCommand::start())).await?;
    }
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(err) = forward_lines(stdin, tx).await {
            tracing::error!(%err, "console input failed");
        }
    });

    let driver = PresentationDriver::new(
        controller,
        Arc::new(AssetAudioPlayer::new(config.asset_root.clone())),
        Arc::new(AssetSceneLoader::new(config.asset_root.clone())),
        TracingSink::default(),
        config.frame_interval,
    );

    let report = driver
        .run(rx, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;

    tracing::info!(
        exit = ?report.exit,
        phase = %report.view.phase,
        events = report.events_journaled,
        frames = report.frames,
        "presentation ended"
    );

    Ok(())
}
