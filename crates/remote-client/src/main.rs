mod app;
mod arbiter;
mod catalog;
mod channel;
mod dispatch;
mod driver;
mod nav;
mod render;
mod results;
mod surface;

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use remote_proto::protocol::Command;

use crate::app::{App, AppMessage};
use crate::channel::ControlChannel;
use crate::surface::TraceSurface;

/// Interval of the ticker driving the slider settle windows.  Must be
/// comfortably shorter than the configured settle time.
const SETTLE_TICK: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = remote_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("tonearm.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("tonearm log: {}", log_path.display());

    tracing::info!("tonearm starting…");

    let config = remote_proto::config::Config::load().unwrap_or_default();

    // ── Channels ─────────────────────────────────────────────────────────────
    // msg: everything → App;  cmd: App → ControlChannel;
    // event: ControlChannel reader → forwarder;  visibility: driver → channel.
    let (msg_tx, msg_rx) = mpsc::channel::<AppMessage>(256);
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(64);
    let (event_tx, mut event_rx) = mpsc::channel(256);
    let (visibility_tx, visibility_rx) = watch::channel(false);

    // ── Control channel ──────────────────────────────────────────────────────
    let channel = ControlChannel::new(config.server_address(), event_tx);
    tokio::spawn(channel.run(cmd_rx, visibility_rx));

    // ── Server event forwarder ───────────────────────────────────────────────
    let server_msg_tx = msg_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if server_msg_tx.send(AppMessage::Server(event)).await.is_err() {
                break;
            }
        }
    });

    // ── Settle ticker ────────────────────────────────────────────────────────
    let tick_msg_tx = msg_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SETTLE_TICK);
        loop {
            interval.tick().await;
            if tick_msg_tx.send(AppMessage::SettleTick).await.is_err() {
                break;
            }
        }
    });

    // ── Input driver ─────────────────────────────────────────────────────────
    let driver_msg_tx = msg_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = driver::run(driver_msg_tx, visibility_tx).await {
            tracing::error!("input driver exited with error: {}", e);
        }
    });

    // ── Run the app loop ─────────────────────────────────────────────────────
    let app = App::new(TraceSurface, &config, cmd_tx, msg_tx)?;
    app.run(msg_rx).await?;

    Ok(())
}
