use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;
mod config;
mod conversation;
mod core;
mod display;
mod gateway;
mod input;
mod session;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::config::Config;
use crate::core::error::GuideError;
use crate::gateway::Gateway;
use crate::gateway::gemini::GeminiBackend;

#[tokio::main]
async fn main() -> Result<(), GuideError> {
    // Diagnostics go to stderr so the chat rendering stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let profile = config.resolve_profile(args.profile.as_deref())?;
    let model = config.resolve_model(args.model.as_deref());
    let api_key = config.resolve_api_key();

    let backend = match config.gateway.base_url.clone() {
        Some(base_url) => GeminiBackend::with_endpoint(base_url, api_key, model),
        None => GeminiBackend::new(api_key, model),
    };

    let gateway = Gateway::new(Box::new(backend), profile);
    let command_dispatcher = create_command_registry();

    let mut app = Application::new(args, gateway, command_dispatcher);
    app.run().await
}
