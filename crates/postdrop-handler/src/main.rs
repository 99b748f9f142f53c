//! Function runtime entry point.
//!
//! Clients are built once per cold start and shared by every invocation.

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use postdrop_config::Config;
use postdrop_handler::{init_logging, IngestHandler, LogFormat};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging(LogFormat::Runtime, false);

    let config = Config::load().context("Failed to load configuration")?;
    let handler = IngestHandler::from_config(&config).context("Failed to build ingest handler")?;

    info!(
        "Ready: {} -> s3://{}/{}/",
        config.source.url, config.storage.bucket, config.storage.key_prefix
    );

    run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let handler = handler.clone();
        async move { Ok::<_, Error>(handler.handle(event.payload).await) }
    }))
    .await
}
