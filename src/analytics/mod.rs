//! Click bookkeeping, decoupled from the redirect response.
//!
//! Losing a click record is acceptable; delaying or failing a redirect is
//! not. The recorder therefore runs its three writes in a spawned task that
//! the redirect path never awaits, and every failure ends in a log line
//! instead of a response.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::cache::LookupCache;
use crate::storage::{ClickEvent, SeaOrmStorage};

#[derive(Clone)]
pub struct ClickRecorder {
    storage: Arc<SeaOrmStorage>,
    cache: Arc<dyn LookupCache>,
}

impl ClickRecorder {
    pub fn new(storage: Arc<SeaOrmStorage>, cache: Arc<dyn LookupCache>) -> Self {
        Self { storage, cache }
    }

    /// Fire-and-forget entry point used by the redirect path.
    pub fn dispatch(&self, event: ClickEvent) {
        let recorder = self.clone();
        tokio::spawn(async move {
            recorder.record(event).await;
        });
    }

    /// Run all three bookkeeping writes. Each failure is logged and the
    /// remaining writes still run; nothing propagates to a caller.
    pub async fn record(&self, event: ClickEvent) {
        let code = event.short_code.clone();

        if let Err(e) = self.storage.insert_click(&event).await {
            warn!("Click event logging failed for '{}': {}", code, e);
        }

        if let Err(e) = self.storage.increment_click(&code).await {
            warn!("Click counter update failed for '{}': {}", code, e);
        }

        self.cache.incr_clicks(&code).await;

        trace!("Click recorded for '{}'", code);
    }
}
