//! Lock-free multicast events.
//!
//! An [`Event`] holds an ordered list of subscribers and calls each of them
//! with the same `(sender, argument)` pair when invoked. The list is an
//! immutable snapshot behind an [`arc_swap::ArcSwap`]: every subscribe or
//! unsubscribe builds a new list and publishes it with compare-and-swap, so
//! invocation never takes a lock and always sees one consistent list.
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//! use tessera_event::Event;
//!
//! struct Slider;
//!
//! let changed: Event<Slider, f32> = Event::new();
//! let hits = Arc::new(AtomicU32::new(0));
//!
//! let counter = hits.clone();
//! let id = changed.subscribe(move |_, value| {
//!     assert_eq!(*value, 0.5);
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! changed.invoke(&Slider, &0.5);
//! assert!(changed.unsubscribe(id));
//! changed.invoke(&Slider, &0.5);
//! assert_eq!(hits.load(Ordering::Relaxed), 1);
//! ```

mod event;
mod subscription;

pub use event::{Event, Handler};
pub use subscription::SubscriptionId;
