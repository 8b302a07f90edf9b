use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::info;

use padel_slot_finder::config::Config;
use padel_slot_finder::handler::handler;
use padel_slot_finder::SlotFinder;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.log_level.to_lowercase()))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    info!(api = %config.api_base_url, timezone = %config.default_timezone, "Starting slot finder tool handler");

    // One pooled client for the lifetime of the function instance.
    let finder = Arc::new(SlotFinder::from_config(config));
    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let finder = Arc::clone(&finder);
        async move { handler(finder, event).await }
    }))
    .await
}
