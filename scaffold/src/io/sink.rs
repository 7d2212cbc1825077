//! Event sinks that observe a scaffold run.

use tracing::info;

use crate::core::events::ScaffoldEvent;

/// Receives every event the scaffolder reports, in order.
pub trait EventSink {
    fn record(&mut self, event: &ScaffoldEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &ScaffoldEvent) {
        (**self).record(event);
    }
}

/// Sink that writes one INFO line per event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &ScaffoldEvent) {
        info!("{event}");
    }
}
