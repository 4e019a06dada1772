//! Connection scope held for the lifetime of one call.

use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

/// Owned slot of the client's connection budget.
///
/// Released on drop, so every exit path of a call gives the slot back:
/// success, error, or the call's future being dropped on cancellation.
pub(crate) struct ConnectionScope {
    _permit: OwnedSemaphorePermit,
    acquired_at: Instant,
}

impl ConnectionScope {
    pub(crate) async fn acquire(slots: &Arc<Semaphore>) -> Result<Self> {
        let permit = slots.clone().acquire_owned().await.map_err(|_| {
            Error::configuration_with_context(
                "client has been shut down",
                ErrorContext::new().with_source("connection_scope"),
            )
        })?;
        Ok(Self {
            _permit: permit,
            acquired_at: Instant::now(),
        })
    }
}

impl Drop for ConnectionScope {
    fn drop(&mut self) {
        trace!(
            held_ms = self.acquired_at.elapsed().as_millis() as u64,
            "connection scope released"
        );
    }
}
