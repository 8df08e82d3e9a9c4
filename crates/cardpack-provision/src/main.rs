//! Cardpack provisioning function - entry point.
//!
//! Invoked by the host platform once per account-created event. Reads the
//! JSON payload from stdin, runs the provisioning handler, and reports the
//! acknowledgment through the exit status (0 = handled, nonzero = redeliver).

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardpack_provision::{Ack, ProvisionConfig, UserProvisioningHandler};
use cardpack_store::{DocumentStore, RocksStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Process-wide initialization, performed exactly once at startup.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cardpack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProvisionConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir,
        max_instances = config.max_instances,
        "provisioning function starting"
    );

    match run(&config).await {
        Ok(Ack::Handled) => ExitCode::SUCCESS,
        Ok(Ack::Retry) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %err, "invocation failed before the handler ran");
            ExitCode::FAILURE
        }
    }
}

/// Run one invocation: open the store, read the event, invoke the handler.
async fn run(config: &ProvisionConfig) -> Result<Ack, Box<dyn std::error::Error>> {
    let store: Arc<dyn DocumentStore> = Arc::new(RocksStore::open(&config.data_dir)?);
    let handler = UserProvisioningHandler::new(store);

    let mut raw = Vec::new();
    tokio::io::stdin().read_to_end(&mut raw).await?;

    let event = match cardpack_provision::platform::decode_event(&raw) {
        Ok(event) => event,
        Err(err) => {
            // Malformed payloads never parse on redelivery; acknowledge them.
            tracing::warn!(error = %err, "unparseable event payload, ignoring");
            return Ok(Ack::Handled);
        }
    };

    // The store is blocking; keep it off the async runtime's core threads.
    let result = tokio::task::spawn_blocking(move || handler.on_account_created(&event)).await?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "provisioning failed, requesting redelivery");
    }

    Ok(Ack::from_result(&result))
}
