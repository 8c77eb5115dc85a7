//! This module defines the [`ObservableProperty`] type, a value that tells
//! registered listeners about every update right before and right after it
//! happens.

use std::{
    fmt, mem,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::{
    state::{Subscription, Subscriptions},
    ChangeKind, ChangeKinds, ChangeRecord, Executor, Listener, ObserverKey,
};

/// Identifies an [`ObservableProperty`].
///
/// Listeners receive the id of the property that changed, so a single listener
/// can be registered on multiple properties and still tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(u64);

impl PropertyId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A value whose changes are sent to listeners.
///
/// Listeners are registered on behalf of an observer, some value behind an
/// [`Arc`]. The property only holds on to the observer weakly: once all of its
/// strong references are gone, its listener is not called anymore and the
/// subscription is cleaned up on the next update. Every observer has at most
/// one subscription; registering again replaces the previous one.
///
/// Updates require `&mut` access. Listeners that are called directly therefore
/// can't modify the property they observe.
pub struct ObservableProperty<T> {
    id: PropertyId,
    value: T,
    subscriptions: Subscriptions<T>,
}

impl<T> ObservableProperty<T> {
    /// Create a new `ObservableProperty` with the given initial value.
    pub fn new(value: T) -> Self {
        Self { id: PropertyId::next(), value, subscriptions: Subscriptions::new() }
    }

    /// Get the id of this property.
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Get a clone of the inner value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.clone()
    }

    /// Get a reference to the inner value.
    pub fn read(&self) -> &T {
        &self.value
    }

    /// Set the inner value to the given `value` and notify listeners.
    ///
    /// Listeners are notified even if `value` equals the previous value. Use
    /// [`set_if_different`][Self::set_if_different] to skip those updates.
    pub fn set(&mut self, value: T)
    where
        T: Clone,
    {
        self.replace(value);
    }

    /// Set the inner value to the given `value` if it doesn't compare equal to
    /// the existing value.
    ///
    /// If the inner value is set, listeners are notified and
    /// `Some(previous_value)` is returned. Otherwise, nobody is notified (not
    /// even about a [`Prior`][ChangeKind::Prior] change) and `None` is
    /// returned.
    pub fn set_if_different(&mut self, value: T) -> Option<T>
    where
        T: Clone + PartialEq,
    {
        if self.value != value {
            Some(self.replace(value))
        } else {
            None
        }
    }

    /// Set the inner value to the given `value`, notify listeners and return
    /// the previous value.
    ///
    /// Listeners accepting [`ChangeKind::Prior`] are notified before the value
    /// is stored, those accepting [`ChangeKind::New`] afterwards.
    pub fn replace(&mut self, value: T) -> T
    where
        T: Clone,
    {
        let Self { id, value: current, subscriptions } = self;

        subscriptions.notify(*id, ChangeKind::Prior, || {
            ChangeRecord::new(ChangeKind::Prior, value.clone(), current.clone())
        });

        let previous = mem::replace(current, value);

        subscriptions.notify(*id, ChangeKind::New, || {
            ChangeRecord::new(ChangeKind::New, current.clone(), previous.clone())
        });

        previous
    }

    /// Set the inner value to a `Default` instance of its type, notify
    /// listeners and return the previous value.
    ///
    /// Shorthand for `property.replace(T::default())`.
    pub fn take(&mut self) -> T
    where
        T: Clone + Default,
    {
        self.replace(T::default())
    }

    /// Update the inner value and notify listeners.
    ///
    /// The closure is applied to a clone of the inner value, which is then
    /// stored like with [`set`][Self::set], so listeners interested in
    /// [`ChangeKind::Prior`] changes get to see the previous value still in
    /// place. Listeners are notified even if the closure didn't change
    /// anything; see [`update_if_different`][Self::update_if_different].
    pub fn update(&mut self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let mut value = self.value.clone();
        f(&mut value);
        self.set(value);
    }

    /// Update the inner value and notify listeners if the updated value does
    /// not equal the previous value.
    pub fn update_if_different(&mut self, f: impl FnOnce(&mut T))
    where
        T: Clone + PartialEq,
    {
        let mut value = self.value.clone();
        f(&mut value);
        self.set_if_different(value);
    }

    /// Call `listener` whenever the inner value changes, for as long as
    /// `observer` is alive.
    ///
    /// If `kinds` contains [`ChangeKinds::INITIAL`], the listener is called
    /// with the current value before this function returns.
    ///
    /// Any previous subscription of `observer` is replaced.
    pub fn observe<O, L>(&mut self, observer: &Arc<O>, kinds: ChangeKinds, listener: L)
    where
        T: Clone + 'static,
        O: ?Sized + Send + Sync + 'static,
        L: Listener<T> + Send + Sync + 'static,
    {
        self.add_subscription(observer, Subscription::inline(kinds, listener));
    }

    /// Like [`observe`][Self::observe], but instead of calling `listener`
    /// directly, every call is submitted as a unit of work to `executor`.
    ///
    /// This includes the [`Initial`][ChangeKind::Initial] notification, if
    /// requested. Work that was already submitted can't be retracted, so
    /// `listener` may still run after
    /// [`stop_observing`][Self::stop_observing] returned.
    pub fn observe_on<O, E, L>(
        &mut self,
        observer: &Arc<O>,
        kinds: ChangeKinds,
        executor: E,
        listener: L,
    ) where
        T: Clone + Send + Sync + 'static,
        O: ?Sized + Send + Sync + 'static,
        E: Executor + 'static,
        L: Listener<T> + Send + Sync + 'static,
    {
        self.add_subscription(observer, Subscription::on_executor(kinds, executor, listener));
    }

    /// Remove the subscription of `observer`.
    ///
    /// Returns whether `observer` was subscribed.
    pub fn stop_observing<O>(&mut self, observer: &Arc<O>) -> bool
    where
        O: ?Sized + Send + Sync + 'static,
    {
        self.subscriptions.remove(&ObserverKey::new(observer))
    }

    /// Whether `observer` currently has a subscription.
    pub fn is_observed_by<O>(&self, observer: &Arc<O>) -> bool
    where
        O: ?Sized + Send + Sync + 'static,
    {
        self.subscriptions.contains(&ObserverKey::new(observer))
    }

    /// Get the number of subscriptions.
    ///
    /// Subscriptions of observers that were dropped are included until the
    /// next update cleans them up.
    pub fn observer_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn add_subscription<O>(&mut self, observer: &Arc<O>, subscription: Subscription<T>)
    where
        T: Clone,
        O: ?Sized + Send + Sync + 'static,
    {
        if subscription.accepts(ChangeKind::Initial) {
            subscription.deliver(self.id, &Arc::new(ChangeRecord::initial(&self.value)));
        }
        self.subscriptions.insert(ObserverKey::new(observer), subscription);
    }
}

impl<T: Default> Default for ObservableProperty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("subscriptions", &self.subscriptions)
            .finish()
    }
}
