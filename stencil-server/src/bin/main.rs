use std::{env, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stencil_server::{
    load, shutdown_signal, App, AppConfig, AppRouter, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = env::args().collect::<Vec<_>>();
    let config =
        if args.len() == 3 && (args[1] == "-c" || args[1] == "--config") {
            load(&args[2])?
        } else {
            AppConfig::parse()
        };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    debug!("{:#?}", &config);
    info!("stencil server {}", env!("CARGO_PKG_VERSION"));
    run_server(config).await
}

async fn run_server(config: AppConfig) -> Result<()> {
    let app = Arc::new(
        App::new(config.clone())
            .context("could not initialize the response factory")?,
    );

    let router = AppRouter::build(AppState(app));
    let host = format!("{}:{}", config.endpoint, config.port);
    let listener = TcpListener::bind(&host)
        .await
        .context("could not bind to endpoint")?;

    info!("page server, listening on {}", host);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error while starting page server")?;

    Ok(())
}
