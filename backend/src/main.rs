//! Service entry-point: loads settings, installs logging, and runs the server.

use actix_web::web;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_registry::inbound::http::health::HealthState;
use user_registry::server::{ServerConfig, create_server, drain_on_shutdown};
use user_registry::settings::RegistrySettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = RegistrySettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    init_tracing(&settings);

    let config = ServerConfig::from_settings(&settings)?;
    let (host, port) = config.bind_addr();
    info!(host, port, debug = settings.debug, "starting user registry");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown(
        health_state,
        server.handle(),
        shutdown_signal(),
        settings.shutdown_grace(),
    ));
    server.await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level; debug mode switches from JSON
/// to human-readable output.
fn init_tracing(settings: &RegistrySettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));
    let builder = fmt().with_env_filter(filter);
    let result = if settings.debug {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}
