//! PromptLab API server entry point

use clap::Parser;

use optimizer::{PromptOptimizer, ProviderEndpoints, RealModelRouter};
use shared::ProviderCredentials;
use webserver::{AppState, RealRecordStore, WebServer, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "PromptLab prompt optimization API")]
struct Args {
    /// Port for the HTTP API
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    shared::logging::init_tracing(Some(&args.log_level));

    let credentials = ProviderCredentials::from_env();
    let configured = credentials.configured();
    if configured.is_empty() {
        tracing::warn!(
            "no provider API keys configured; every optimization will degrade to the fallback result"
        );
    } else {
        tracing::info!(providers = ?configured, "provider credentials loaded");
    }

    let router = RealModelRouter::new(credentials, ProviderEndpoints::from_env());
    let store = RealRecordStore::from_env();
    if !store.is_enabled() {
        tracing::warn!("optimization history will be empty until the record store is configured");
    }

    let state = AppState::new(PromptOptimizer::new(router), store);
    WebServer::new(state, args.port).run().await
}
