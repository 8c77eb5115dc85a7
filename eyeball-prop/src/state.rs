use std::{collections::HashMap, fmt, sync::Arc};

use crate::{ChangeKind, ChangeKinds, ChangeRecord, Executor, Listener, ObserverKey, PropertyId};

type Dispatch<T> = Box<dyn Fn(PropertyId, &Arc<ChangeRecord<T>>) + Send + Sync>;

pub(crate) struct Subscription<T> {
    /// The kinds of changes this subscription wants to hear about.
    kinds: ChangeKinds,

    /// Delivers a change record to the listener, either by calling it right
    /// away or by submitting a call to an executor.
    dispatch: Dispatch<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn inline<L>(kinds: ChangeKinds, listener: L) -> Self
    where
        T: 'static,
        L: Listener<T> + Send + Sync + 'static,
    {
        let dispatch = move |source, change: &Arc<ChangeRecord<T>>| {
            listener.on_change(source, change);
        };
        Self { kinds, dispatch: Box::new(dispatch) }
    }

    pub(crate) fn on_executor<E, L>(kinds: ChangeKinds, executor: E, listener: L) -> Self
    where
        T: Send + Sync + 'static,
        E: Executor + 'static,
        L: Listener<T> + Send + Sync + 'static,
    {
        let listener = Arc::new(listener);
        let dispatch = move |source, change: &Arc<ChangeRecord<T>>| {
            let listener = Arc::clone(&listener);
            let change = Arc::clone(change);
            executor.submit(Box::new(move || listener.on_change(source, &change)));
        };
        Self { kinds, dispatch: Box::new(dispatch) }
    }

    pub(crate) fn accepts(&self, kind: ChangeKind) -> bool {
        self.kinds.accepts(kind)
    }

    pub(crate) fn deliver(&self, source: PropertyId, change: &Arc<ChangeRecord<T>>) {
        (self.dispatch)(source, change);
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("kinds", &self.kinds).finish_non_exhaustive()
    }
}

/// The subscriptions of one property, keyed by observer.
pub(crate) struct Subscriptions<T> {
    entries: HashMap<ObserverKey, Subscription<T>>,
}

impl<T> Subscriptions<T> {
    pub(crate) fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, key: &ObserverKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Add a subscription, replacing any previous one of the same observer.
    pub(crate) fn insert(&mut self, key: ObserverKey, subscription: Subscription<T>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(?key, kinds = ?subscription.kinds, "Adding subscription");

        self.entries.insert(key, subscription);
    }

    pub(crate) fn remove(&mut self, key: &ObserverKey) -> bool {
        #[cfg(feature = "tracing")]
        tracing::trace!(?key, "Removing subscription");

        self.entries.remove(key).is_some()
    }

    /// Send out a change of the given kind.
    ///
    /// `make_change` is called at most once, and only if a live subscription
    /// accepts `kind`. The resulting record is shared between all of them.
    /// Subscriptions of observers that were dropped are not notified, and
    /// removed afterwards.
    pub(crate) fn notify(
        &mut self,
        source: PropertyId,
        kind: ChangeKind,
        make_change: impl Fn() -> ChangeRecord<T>,
    ) {
        if self.entries.is_empty() {
            return;
        }

        let mut change = None;
        let mut found_dead = false;
        #[cfg(feature = "tracing")]
        let mut num_delivered = 0_usize;

        for (key, subscription) in &self.entries {
            if !key.is_alive() {
                found_dead = true;
                continue;
            }
            if !subscription.accepts(kind) {
                continue;
            }

            let change = change.get_or_insert_with(|| Arc::new(make_change()));
            subscription.deliver(source, change);

            #[cfg(feature = "tracing")]
            {
                num_delivered += 1;
            }
        }

        #[cfg(feature = "tracing")]
        if num_delivered > 0 {
            tracing::debug!(
                target: "eyeball_prop::notify",
                ?source,
                ?kind,
                "Change delivered to {num_delivered} observers"
            );
        }

        if found_dead {
            self.prune();
        }
    }

    fn prune(&mut self) {
        #[cfg(feature = "tracing")]
        let len_before = self.entries.len();

        self.entries.retain(|key, _| key.is_alive());

        #[cfg(feature = "tracing")]
        {
            let num_pruned = len_before - self.entries.len();
            tracing::debug!("Pruned {num_pruned} subscriptions of dropped observers");
        }
    }
}

impl<T> fmt::Debug for Subscriptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.entries).finish()
    }
}
