//! Actix Web front end for the dashboard.
//!
//! Each page request runs the whole render pass on the blocking pool, so
//! slow file reads never stall the async workers.

pub mod page;
pub mod routes;

use crate::dashboard::Dashboard;
use crate::readers::GeoLayerCache;
use crate::settings::Settings;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub use routes::configure;

/// Bind and run the dashboard until the server is stopped.
pub async fn run_server(settings: Settings) -> Result<()> {
    let cache = Arc::new(GeoLayerCache::new());
    let dashboard = web::Data::new(Dashboard::new(&settings, cache));
    let address = (settings.server.host.clone(), settings.server.port);

    info!(
        host = %address.0,
        port = address.1,
        workers = settings.server.workers,
        root = %settings.root.display(),
        "Starting dashboard server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(dashboard.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .workers(settings.server.workers)
    .bind(address.clone())
    .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?
    .run()
    .await
    .context("HTTP server error")
}
