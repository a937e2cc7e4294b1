pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use application::usecases::video_catalog::VideoCatalogUseCase;
use infrastructure::http::{http_transport::ReqwestTransport, video_api_gateway::VideoApiGateway};

pub type DefaultGateway = VideoApiGateway<ReqwestTransport>;

/// Loads the environment once and wires the catalog onto a `reqwest` gateway.
pub fn bootstrap() -> Result<VideoCatalogUseCase<DefaultGateway>> {
    let dotenvy_env = config::config_loader::load()?;
    info!(base_url = %dotenvy_env.gateway.base_url, "ENV has been loaded");

    let gateway = VideoApiGateway::from_config(&dotenvy_env.gateway)
        .context("failed to build video api gateway")?;

    Ok(VideoCatalogUseCase::new(Arc::new(gateway)))
}
