//! The kinds of change notifications and the records delivered to listeners.

use bitflags::bitflags;

/// The point in an update at which a notification is sent out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Sent once, right when a listener is registered, with the current
    /// value as both the new and the old value.
    Initial,
    /// Sent before the new value is stored.
    Prior,
    /// Sent after the new value is stored.
    New,
}

bitflags! {
    /// A set of [`ChangeKind`]s a listener wants to be notified about.
    ///
    /// The [`Default`] is [`NEW`][Self::NEW]. An empty set is allowed, the
    /// listener is then simply never called.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ChangeKinds: u8 {
        /// See [`ChangeKind::Initial`].
        const INITIAL = 1 << 0;
        /// See [`ChangeKind::Prior`].
        const PRIOR = 1 << 1;
        /// See [`ChangeKind::New`].
        const NEW = 1 << 2;
    }
}

impl ChangeKinds {
    /// Whether notifications of the given kind are part of this set.
    pub fn accepts(self, kind: ChangeKind) -> bool {
        self.contains(kind.into())
    }
}

impl Default for ChangeKinds {
    fn default() -> Self {
        Self::NEW
    }
}

impl From<ChangeKind> for ChangeKinds {
    fn from(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Initial => Self::INITIAL,
            ChangeKind::Prior => Self::PRIOR,
            ChangeKind::New => Self::NEW,
        }
    }
}

/// A single notification about a property's value.
///
/// For [`ChangeKind::Prior`] and [`ChangeKind::New`], `new_value` is the value
/// passed to the setter and `old_value` the value it replaces. For
/// [`ChangeKind::Initial`], both are the value at the time of registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeRecord<T> {
    /// When this notification was sent.
    pub kind: ChangeKind,
    /// The value the property holds (or is about to hold, for `Prior`).
    pub new_value: T,
    /// The value the property held before the update.
    pub old_value: T,
}

impl<T> ChangeRecord<T> {
    /// Create a new `ChangeRecord`.
    pub fn new(kind: ChangeKind, new_value: T, old_value: T) -> Self {
        Self { kind, new_value, old_value }
    }

    pub(crate) fn initial(value: &T) -> Self
    where
        T: Clone,
    {
        Self::new(ChangeKind::Initial, value.clone(), value.clone())
    }
}
