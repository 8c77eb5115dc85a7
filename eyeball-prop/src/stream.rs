use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures_core::Stream;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::{ChangeKinds, ChangeRecord, Listener, ObservableProperty, PropertyId};

impl<T> ObservableProperty<T> {
    /// Get the changes of the inner value as a [`Stream`], for as long as
    /// `observer` is alive.
    ///
    /// This registers a subscription for `observer` like
    /// [`observe`][Self::observe] does, replacing any previous one. The stream
    /// ends once that subscription is gone, that is after
    /// [`stop_observing`][Self::stop_observing], after the observer was dropped
    /// and the next update cleaned up its subscription, after `observer`
    /// subscribed again, or after the property itself was dropped.
    pub fn observe_stream<O>(&mut self, observer: &Arc<O>, kinds: ChangeKinds) -> ChangeStream<T>
    where
        T: Clone + Send + 'static,
        O: ?Sized + Send + Sync + 'static,
    {
        let (sender, receiver) = unbounded_channel();
        self.observe(observer, kinds, ForwardChanges { sender });
        ChangeStream { receiver }
    }
}

/// A stream of [`ChangeRecord`]s, created by
/// [`ObservableProperty::observe_stream`].
///
/// Changes are buffered without limit until they are polled.
#[derive(Debug)]
pub struct ChangeStream<T> {
    receiver: UnboundedReceiver<ChangeRecord<T>>,
}

impl<T> Stream for ChangeStream<T> {
    type Item = ChangeRecord<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

struct ForwardChanges<T> {
    sender: UnboundedSender<ChangeRecord<T>>,
}

impl<T: Clone> Listener<T> for ForwardChanges<T> {
    fn on_change(&self, _source: PropertyId, change: &ChangeRecord<T>) {
        // The stream was dropped, the subscription stays until it is replaced
        // or its observer goes away.
        let _ = self.sender.send(change.clone());
    }
}
