//! Synchronous publish/subscribe for applied-alpha notifications
//!
//! The preset engine publishes one [`AlphaApplied`] per record after the
//! record's mutations are complete. Handlers run in subscription order, on
//! the publishing call stack. A handler receives only the event, so it can
//! update display state but has no path back into the apply machinery.

use log::trace;

/// Published after a preset record has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaApplied {
    /// Normalized entity key of the record
    pub entity_key: String,
    /// Record alpha on the `[0, 255]` scale, after clamping
    pub alpha: u8,
}

/// Handle returned by [`NotificationBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Handler = Box<dyn FnMut(&AlphaApplied)>;

/// Subscriber registry for [`AlphaApplied`]
///
/// Unsubscribed slots are left empty rather than removed, so ids stay stable
/// and delivery order is always subscription order.
#[derive(Default)]
pub struct NotificationBus {
    handlers: Vec<Option<Handler>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&AlphaApplied) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.handlers.len());
        self.handlers.push(Some(Box::new(handler)));
        id
    }

    /// Removes a handler; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.handlers.get_mut(id.0) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    /// Delivers `event` to every live handler in subscription order
    pub fn publish(&mut self, event: &AlphaApplied) {
        trace!("AlphaApplied({}, {})", event.entity_key, event.alpha);
        for handler in self.handlers.iter_mut().flatten() {
            handler(event);
        }
    }

    /// Number of live handlers
    pub fn subscriber_count(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
