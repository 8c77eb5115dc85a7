//! Observable properties for Rust.
//!
//! This crate provides [`ObservableProperty<T>`], a wrapper around a value
//! that notifies registered listeners whenever the value is set. Listeners
//! choose which notifications they get, see [`ChangeKind`]:
//!
//! - `Initial`: once, right when subscribing, with the current value
//! - `Prior`: before a new value is stored
//! - `New`: after a new value is stored
//!
//! Listeners are registered on behalf of an observer held in an [`Arc`]. The
//! property only keeps a weak reference to the observer, and stops calling the
//! listener once the observer is gone.
//!
//! Here is a quick walk-through:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use eyeball_prop::{ChangeKind, ChangeKinds, ChangeRecord, ObservableProperty, PropertyId};
//!
//! let mut property = ObservableProperty::new(true);
//!
//! // The observer can be any value, here it's also where changes are stored.
//! let observer = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&observer);
//! property.observe(
//!     &observer,
//!     ChangeKinds::PRIOR | ChangeKinds::NEW,
//!     move |_: PropertyId, change: &ChangeRecord<bool>| log.lock().unwrap().push(change.clone()),
//! );
//!
//! property.set(false);
//! assert_eq!(
//!     *observer.lock().unwrap(),
//!     [
//!         ChangeRecord::new(ChangeKind::Prior, false, true),
//!         ChangeRecord::new(ChangeKind::New, false, true),
//!     ]
//! );
//!
//! // Setting an equal value is skipped entirely by `set_if_different`.
//! observer.lock().unwrap().clear();
//! property.set_if_different(false);
//! assert!(observer.lock().unwrap().is_empty());
//! ```
//!
//! Note that the listener above holds a strong reference to the observer, so
//! the observer stays alive until it is unsubscribed. Listeners usually
//! capture something else, or only a [`Weak`][std::sync::Weak] reference.
//!
//! Listeners can also be called on an [`Executor`] instead of directly, see
//! [`ObservableProperty::observe_on`].
//!
//! Cargo features:
//!
//! - `tokio` (enabled by default): [`Executor`] implementations for tokio's
//!   runtime handle and unbounded channel sender, and
//!   [`ObservableProperty::observe_stream`]
//! - `tracing`: Emit [tracing] events when changes are sent out
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]

mod change;
pub mod executor;
mod listener;
mod observer_key;
mod property;
mod state;
#[cfg(feature = "tokio")]
mod stream;

#[cfg(doc)]
use std::sync::Arc;

#[doc(inline)]
pub use change::{ChangeKind, ChangeKinds, ChangeRecord};
#[doc(inline)]
pub use executor::Executor;
pub use listener::Listener;
pub use observer_key::ObserverKey;
pub use property::{ObservableProperty, PropertyId};
#[cfg(feature = "tokio")]
pub use stream::ChangeStream;
