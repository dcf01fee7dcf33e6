#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Settings;
use crate::lifecycle::Clock;
use crate::lifecycle::Reminders;
use crate::lifecycle::SystemClock;
use crate::lifecycle::TracingNotifier;
use crate::storage::ReminderStore;
use crate::utils::env_var_or_else;

mod api;
mod audiences;
mod config;
mod error;
mod graceful_shutdown;
mod lifecycle;
mod reminders;
mod roles;
mod schedule;
mod storage;
mod utils;
mod views;

const DEFAULT_RUST_LOG: &str = "placement_reminders=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let settings = Settings::from_env()?;
    let app = setup_app(settings, Arc::new(SystemClock))?;

    let address = setup_address()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if the seed reminders fail to load
pub fn setup_app(settings: Settings, clock: Arc<dyn Clock>) -> Result<Router> {
    let store = if settings.seed_reminders {
        ReminderStore::seeded()?
    } else {
        ReminderStore::new()
    };

    tracing::info!(
        "Starting with {} reminders and {} student groups",
        store.len(),
        settings.audiences.groups().len()
    );

    let reminders = Reminders::new(
        store,
        settings.audiences,
        clock,
        Arc::new(TracingNotifier),
    );

    Ok(create_router(Arc::new(Mutex::new(reminders))))
}

/// Create the router for the portal
fn create_router(reminders: api::SharedReminders) -> Router {
    Router::new()
        .nest("/api", router())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(reminders))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Some(port) = utils::env_var("PORT") {
        let port = port.parse::<u16>()?;

        address.set_port(port);
    }

    Ok(address)
}
