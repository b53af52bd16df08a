use http_contracts::HelloWorldResponse;
use tracing::{debug, instrument};

use crate::config::HelloWorldConfig;

/// Body served by the hello world endpoint.
#[instrument(name = "hello_world", skip_all)]
pub fn hello_world(cfg: &HelloWorldConfig) -> HelloWorldResponse {
    debug!(greeting = %cfg.message, "building hello world response");
    HelloWorldResponse::new(cfg.message.as_str())
}
