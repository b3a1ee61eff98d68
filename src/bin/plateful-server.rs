// ABOUTME: Plateful server binary entry point
// ABOUTME: Loads configuration, wires the provider and store, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Plateful

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use plateful_server::config::environment::ServerConfig;
use plateful_server::llm::OpenAiCompatibleProvider;
use plateful_server::logging;
use plateful_server::resources::ServerResources;
use plateful_server::server::PlatefulServer;
use plateful_server::storage::InMemoryStore;

#[derive(Parser)]
#[command(name = "plateful-server")]
#[command(about = "Recipe suggestion server with streaming generation")]
struct Args {
    /// Override the HTTP port from the environment
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }
    info!("Configuration: {}", config.summary());

    let provider = Arc::new(OpenAiCompatibleProvider::from_llm_config(&config.llm)?);
    let store = Arc::new(InMemoryStore::new());

    let base = format!("http://{}:{}", config.http_host, config.http_port);
    info!("Recipe generation: POST {base}/api/recipes/generate");
    info!("Liked recipes:     GET/POST {base}/api/recipes/liked");
    info!("Feedback:          GET/POST {base}/api/feedback");
    info!("Health check:      GET {base}/health");

    let resources = Arc::new(ServerResources::new(config, provider, store));
    PlatefulServer::new(resources).run().await
}
