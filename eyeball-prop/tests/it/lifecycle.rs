use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use eyeball_prop::{ChangeKinds, ChangeRecord, ObservableProperty, PropertyId};

use crate::{observer, Recorder};

#[test]
fn stop_observing() {
    let mut prop = ObservableProperty::new(0);
    let ob = observer();
    let rec = Recorder::new();
    prop.observe(&ob, ChangeKinds::all(), rec.clone());
    rec.take();

    assert!(prop.stop_observing(&ob));
    assert!(!prop.is_observed_by(&ob));
    assert_eq!(prop.observer_count(), 0);

    prop.set(1);
    prop.set(2);
    assert!(rec.take().is_empty());

    // no-op the second time
    assert!(!prop.stop_observing(&ob));
}

#[test]
fn stop_observing_unknown() {
    let mut prop = ObservableProperty::new(0);
    let ob1 = observer();
    let ob2 = observer();
    let rec = Recorder::new();
    prop.observe(&ob1, ChangeKinds::NEW, rec.clone());

    assert!(!prop.stop_observing(&ob2));
    assert_eq!(prop.observer_count(), 1);

    prop.set(1);
    assert_eq!(rec.take().len(), 1);
}

#[test]
fn dropped_observer_is_pruned() {
    let mut prop = ObservableProperty::new(0);
    let alive = observer();
    let dropped = observer();
    let alive_rec = Recorder::new();
    let dropped_rec = Recorder::new();

    prop.observe(&alive, ChangeKinds::NEW, alive_rec.clone());
    prop.observe(&dropped, ChangeKinds::PRIOR | ChangeKinds::NEW, dropped_rec.clone());
    assert_eq!(prop.observer_count(), 2);

    drop(dropped);
    // not cleaned up before the next update
    assert_eq!(prop.observer_count(), 2);

    prop.set(1);
    assert_eq!(prop.observer_count(), 1);
    assert!(dropped_rec.take().is_empty());
    assert_eq!(alive_rec.take().len(), 1);
}

#[test]
fn pruned_even_if_kind_not_accepted() {
    let mut prop = ObservableProperty::new(0);
    let ob = observer();
    prop.observe(&ob, ChangeKinds::INITIAL, Recorder::new());
    drop(ob);

    prop.set(1);
    assert_eq!(prop.observer_count(), 0);
}

#[test]
fn pruned_by_set_if_different_only_when_set() {
    let mut prop = ObservableProperty::new(0);
    let ob = observer();
    prop.observe(&ob, ChangeKinds::NEW, Recorder::new());
    drop(ob);

    prop.set_if_different(0);
    assert_eq!(prop.observer_count(), 1);

    prop.set_if_different(1);
    assert_eq!(prop.observer_count(), 0);
}

#[test]
fn observer_is_held_weakly() {
    let mut prop = ObservableProperty::new(0);
    let ob = observer();
    prop.observe(&ob, ChangeKinds::NEW, Recorder::new());
    assert_eq!(Arc::strong_count(&ob), 1);
}

#[test]
fn dropping_property_drops_listeners() {
    let prop_token = Arc::new(());
    let mut prop = ObservableProperty::new(0);
    let ob = observer();

    let token = Arc::clone(&prop_token);
    prop.observe(&ob, ChangeKinds::NEW, move |_: PropertyId, _: &ChangeRecord<i32>| {
        let _token = &token;
    });
    assert_eq!(Arc::strong_count(&prop_token), 2);

    drop(prop);
    assert_eq!(Arc::strong_count(&prop_token), 1);
}

/// A value that counts how often it was cloned.
#[derive(Debug)]
struct CountClones(Arc<AtomicUsize>);

impl Clone for CountClones {
    fn clone(&self) -> Self {
        self.0.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(&self.0))
    }
}

#[test]
fn change_record_is_shared() {
    let clones = Arc::new(AtomicUsize::new(0));
    let mut prop = ObservableProperty::new(CountClones(Arc::clone(&clones)));

    // no observers, no records
    prop.set(CountClones(Arc::clone(&clones)));
    assert_eq!(clones.load(Ordering::SeqCst), 0);

    let observers: Vec<_> = (0..4).map(|_| observer()).collect();
    let calls = Arc::new(AtomicUsize::new(0));
    for ob in &observers {
        let calls = Arc::clone(&calls);
        prop.observe(ob, ChangeKinds::NEW, move |_: PropertyId, _: &ChangeRecord<CountClones>| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
    }

    // one record for all four observers, holding a clone of the new and the
    // old value
    prop.set(CountClones(Arc::clone(&clones)));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(clones.load(Ordering::SeqCst), 2);
}
