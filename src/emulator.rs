//! HTTP front-end that makes any [`JuraDriver`] answer like a bridged
//! machine. The `ristretto-emulator` binary serves the simulator through
//! it, and the integration tests use it to exercise the real transport
//! path end to end.

use axum::routing::post;
use axum::{Extension, Router};

use crate::jura::JuraDriver;
use crate::prelude::*;

/// Builds a router that feeds every POSTed body through `driver` and
/// returns the driver's response text verbatim.
pub fn router(driver: Arc<dyn JuraDriver>) -> Router {
    Router::new().route("/", post(exchange)).layer(Extension(driver))
}

async fn exchange(Extension(driver): Extension<Arc<dyn JuraDriver>>, payload: String) -> String {
    log::debug!("emulated exchange: '{}'", payload);
    match driver.exchange(&payload).await {
        Ok(response) => response,
        Err(error) => format!("err:{}", error),
    }
}
