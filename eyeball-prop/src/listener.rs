use crate::{ChangeRecord, PropertyId};

/// Something that wants to be told about changes of an
/// [`ObservableProperty`][crate::ObservableProperty].
///
/// This is implemented for all closures of the form
/// `Fn(PropertyId, &ChangeRecord<T>)`.
pub trait Listener<T> {
    /// Called with the id of the property that changed and a record of the
    /// change.
    fn on_change(&self, source: PropertyId, change: &ChangeRecord<T>);
}

impl<T, F> Listener<T> for F
where
    F: Fn(PropertyId, &ChangeRecord<T>),
{
    fn on_change(&self, source: PropertyId, change: &ChangeRecord<T>) {
        self(source, change);
    }
}
