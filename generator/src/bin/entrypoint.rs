//! Generator Entrypoint Lambda - placeholder invocation handler.
//!
//! Accepts any string-keyed map as its payload, records the payload's
//! runtime type, and returns nothing. The schedule generation itself lives
//! in the `schedule_finder` function.

use std::collections::HashMap;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The one capability the handler borrows from its host: appending a line
/// to the invocation log.
trait EventLog {
    fn log(&self, line: &str);
}

/// Production sink backed by the tracing subscriber installed in `main`.
struct TracingLog;

impl EventLog for TracingLog {
    fn log(&self, line: &str) {
        info!("{line}");
    }
}

/// Record the runtime type of the invocation payload.
///
/// Emits exactly one log line per invocation and cannot fail; the payload
/// contents are never inspected.
fn handle(event: &HashMap<String, String>, log: &dyn EventLog) {
    log.log(&format!(
        "EVENT TYPE: {}",
        std::any::type_name_of_val(event)
    ));
}

async fn handler(event: LambdaEvent<HashMap<String, String>>) -> Result<(), Error> {
    handle(&event.payload, &TracingLog);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(handler)).await
}
