use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Opaque handle returned by every subscribe call, used to unsubscribe.
///
/// Handles are unique across all events in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Identity a subscriber can be removed by, besides its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandlerKey {
    Closure,
    Function(usize),
    Method { instance: usize, method: usize },
}
