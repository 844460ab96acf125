use clap::Parser;
use journal_server::assets::Assets;
use journal_server::config::Config;
use journal_server::demo::{run_host, DemoHost};
use journal_server::network::{router, NetworkServer};
use journal_server::publisher::{run_publisher, Publisher};
use journal_server::state::Journal;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main-method of the application.
/// Parses command-line arguments, then spawns the host, publisher and HTTP tasks.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = Config::parse();

    // Shared journal behind one lock
    let state = Journal::shared();

    let host = Arc::new(DemoHost::new(config.players, config.seed));
    let publisher = Arc::new(Publisher::new(host.clone(), Arc::clone(&state)));

    // Host update notifications
    let (tick_sender, tick_receiver) = mpsc::channel::<u64>(64);

    let assets = Assets::load(&config.assets);
    let app = router(Arc::clone(&publisher), assets);
    let server = NetworkServer::bind(&config.bind_addr(), app).await?;
    info!(
        "Sus Journal running. Open {} in a browser to view the UI.",
        config.ui_url()
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("HTTP server failed: {}", e);
        }
    });

    let publisher_handle = tokio::spawn(run_publisher(publisher, tick_receiver));
    let host_handle = tokio::spawn(run_host(host, config.tick_rate, tick_sender));

    tokio::select! {
        result = server_handle => {
            if let Err(e) = result {
                error!("Network task panicked: {}", e);
            }
        }
        result = publisher_handle => {
            if let Err(e) = result {
                error!("Publisher task panicked: {}", e);
            }
        }
        result = host_handle => {
            if let Err(e) = result {
                error!("Host task panicked: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
