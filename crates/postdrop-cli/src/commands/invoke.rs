//! Invoke command - run the ingest handler once, locally.

use super::format_size;
use anyhow::{Context, Result};
use colored::Colorize;
use postdrop_config::Config;
use postdrop_core::{ObjectKey, SuccessBody};
use postdrop_handler::IngestHandler;
use postdrop_store::ObjectStoreSink;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Run the invoke command.
pub fn run(memory: bool, event: Option<String>) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let event = parse_event(event.as_deref())?;
    debug!("Effective config: {:?}", config);

    let rt = Runtime::new().context("Failed to create async runtime")?;

    let sink = memory.then(|| Arc::new(ObjectStoreSink::in_memory(&config.storage.bucket)));
    let handler = match &sink {
        Some(sink) => IngestHandler::with_storage(&config, sink.clone()),
        None => IngestHandler::from_config(&config),
    }
    .context("Failed to build ingest handler")?;

    println!(
        "{} {} -> {}{}",
        "Invoking".cyan().bold(),
        config.source.url,
        if memory { "memory://" } else { "s3://" },
        handler.bucket()
    );

    let response = rt.block_on(handler.handle(event));

    println!();
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        println!();
        println!("{}", "Details are in the log output above.".dimmed());
        anyhow::bail!("Invocation failed with status {}", response.status_code);
    }

    if let Some(sink) = sink {
        let body: SuccessBody = response.parse_body()?;
        let key = ObjectKey::from(body.object_key.as_str());
        let stored = rt
            .block_on(sink.read_object(&key))
            .context("Failed to read back stored object")?;

        println!();
        println!("{}", "Stored Object".white().bold());
        println!("  Key: {}", stored.key);
        println!("  Size: {}", format_size(stored.body.len()));
        println!("  Content-Type: {}", stored.content_type);
    }

    println!();
    println!("{} Invocation succeeded.", "✓".green());

    Ok(())
}

/// The trigger event; an empty object when none is given.
fn parse_event(raw: Option<&str>) -> Result<serde_json::Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw).context("Event must be valid JSON"),
        None => Ok(serde_json::json!({})),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event() {
        assert_eq!(parse_event(None).unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_event(Some(r#"{"source":"aws.events"}"#)).unwrap()["source"],
            "aws.events"
        );
        assert!(parse_event(Some("{not json")).is_err());
    }
}
