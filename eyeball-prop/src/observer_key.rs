use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Weak},
};

/// A non-owning handle to an observer, used to key a property's
/// subscriptions.
///
/// Two keys are equal if they were created from the same allocation. The key
/// holds a [`Weak`] reference, which keeps the allocation itself (but not the
/// observer value) around, so the address can't be handed out to a different
/// observer while the key exists. This makes comparisons unambiguous even after
/// the observer was dropped.
pub struct ObserverKey {
    addr: usize,
    observer: Box<dyn Liveness>,
}

impl ObserverKey {
    /// Create a key for the given observer, without extending its lifetime.
    pub fn new<O>(observer: &Arc<O>) -> Self
    where
        O: ?Sized + Send + Sync + 'static,
    {
        Self { addr: address_of(observer), observer: Box::new(Arc::downgrade(observer)) }
    }

    /// Whether the observer is still alive, i.e. has not been dropped by its
    /// owners.
    pub fn is_alive(&self) -> bool {
        self.observer.is_alive()
    }

    /// Whether this key was created for the given observer.
    pub fn refers_to<O: ?Sized>(&self, observer: &Arc<O>) -> bool {
        self.addr == address_of(observer)
    }
}

impl PartialEq for ObserverKey {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl Eq for ObserverKey {}

impl Hash for ObserverKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
    }
}

impl fmt::Debug for ObserverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverKey")
            .field("addr", &format_args!("{:#x}", self.addr))
            .field("alive", &self.is_alive())
            .finish()
    }
}

trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl<O: ?Sized + Send + Sync> Liveness for Weak<O> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

fn address_of<O: ?Sized>(observer: &Arc<O>) -> usize {
    Arc::as_ptr(observer).cast::<()>() as usize
}
