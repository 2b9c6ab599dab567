//! Network activity indicator helper.
//!
//! The UI layer owns the actual spinner; the wrapper only reports when
//! requests are in flight through the [`ActivityIndicator`] trait. Instead of
//! a global widget singleton, an indicator is injected per dispatcher and
//! toggled by [`IndicatorPlugin`](crate::plugin::IndicatorPlugin).

use std::sync::atomic::{AtomicUsize, Ordering};

/// Show/hide operations invoked around the request lifecycle. Failures in
/// implementations never affect the request outcome.
pub trait ActivityIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Reference-counted indicator state: visible while at least one request is
/// in flight. UIs poll [`ActivityCounter::is_active`] to drive the spinner.
#[derive(Debug, Default)]
pub struct ActivityCounter {
    in_flight: AtomicUsize,
}

impl ActivityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl ActivityIndicator for ActivityCounter {
    fn show(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        // Saturating: an unmatched hide must not wrap the counter.
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}
