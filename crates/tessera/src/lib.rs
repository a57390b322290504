//! Tessera
//!
//! The object runtime underneath a widget toolkit:
//!
//! - [`ObjectOwner`] - owns objects, assigns ids, creates with rollback and
//!   indexes objects by capability
//! - [`Event`] - lock-free multicast notifications (re-exported from
//!   `tessera-event`)
//! - [`Collection`] - ordered, duplicate-free lists of non-owning handles
//! - [`Updatable`] and [`Drawable`] - the per-cycle capabilities
//! - [`Control`] and [`Form`] - composites that run the two-phase
//!   update/draw traversal over their children
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tessera::prelude::*;
//! use tessera_test_utils::{MockRenderBackend, MockWindow};
//!
//! let backend = Arc::new(MockRenderBackend::new());
//! let window = MockWindow::new(backend.clone()).close_after(3);
//! let mut form = Form::new(FormSettings::default(), Services::new(backend), Box::new(window));
//!
//! struct App;
//!
//! impl FormHandler for App {
//!     fn init(&mut self, form: &mut Form) -> Result<(), InitError> {
//!         form.create::<Panel>("sidebar")
//!             .map(|_| ())
//!             .ok_or_else(|| InitError::failed("no sidebar"))
//!     }
//! }
//!
//! form.open(&mut App).unwrap();
//! assert_eq!(form.frame(), 3);
//! ```

pub mod capability;
pub mod collection;
pub mod composite;
pub mod control;
pub mod error;
pub mod form;
pub mod id;
pub mod object;
pub mod owner;
pub mod time;
pub mod update;
pub mod view;

pub use capability::{Capabilities, Capability, CapabilityKey};
pub use collection::{Collection, Handle};
pub use composite::{ChildIndex, Composite, ObjectCounts};
pub use control::{Control, Panel};
pub use error::{FormError, InitError};
pub use form::{DefaultHandler, Form, FormHandler, FormSettings};
pub use id::{IdGenerator, ObjectId};
pub use object::{Object, ObjectCore, Services, Spawn, init_once};
pub use owner::{NoHooks, ObjectOwner, OwnerHooks};
pub use tessera_event::{Event, SubscriptionId};
pub use time::{SystemClock, TimeProfile};
pub use update::{UpdateContext, Updatable};
pub use view::{Canvas, DirtyFlag, Drawable, Transform, View};

pub mod prelude {
    pub use crate::{
        Canvas, Control, Drawable, Event, Form, FormHandler, FormSettings, InitError, Object,
        ObjectCore, ObjectId, ObjectOwner, Panel, Services, Spawn, UpdateContext, Updatable, View,
    };
    pub use tessera_core::math::{IVec2, UVec2, Vec2};
    pub use tessera_test_utils::{Color, WindowEvent};
}
