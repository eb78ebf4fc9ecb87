//! Backend entry-point: loads settings, initialises logging, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{self, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use movies_backend::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, create_server};

fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let outcome = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = outcome {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre::eyre!("failed to load settings: {err}"))?;
    init_tracing(settings.log_json);

    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr))
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;

    info!(%bind_addr, "movies backend listening");
    server.await.wrap_err("server terminated abnormally")
}
