//! Universal imports for this crate.

use crate::jura::JuraError;

pub use std::future::Future;
pub use std::{pin::Pin, sync::Arc, time::Duration};
pub use tokio_stream::StreamExt;

pub use crate::trace_exchange;

pub type AsyncFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, JuraError>> + Send + 'a>>;
