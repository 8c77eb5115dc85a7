//! Handing notifications off to an execution context.
//!
//! A subscription registered through
//! [`ObservableProperty::observe_on`][crate::ObservableProperty::observe_on]
//! doesn't call its listener directly. Instead, every notification is wrapped
//! in a unit of [`Work`] and submitted to an [`Executor`], which runs it at
//! some later point, possibly on a different thread.
//!
//! Submission is fire-and-forget: work that was submitted can't be retracted,
//! so a listener may still be called for a change that happened before it was
//! unsubscribed.

use std::sync::Arc;

/// A unit of work submitted to an [`Executor`].
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// An execution context that accepts work and runs it eventually.
pub trait Executor: Send + Sync {
    /// Submit `work` to be run at some point in the future.
    fn submit(&self, work: Work);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn submit(&self, work: Work) {
        (**self).submit(work);
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn submit(&self, work: Work) {
        (**self).submit(work);
    }
}

/// Spawns a new task on the runtime for every unit of work.
#[cfg(feature = "tokio")]
impl Executor for tokio::runtime::Handle {
    fn submit(&self, work: Work) {
        let _join_handle = self.spawn(async move { work() });
    }
}

/// Sends work into a queue, to be run by whoever owns the receiving end.
///
/// This is a serial executor if the receiver runs the work in the order it is
/// received. If the receiver was dropped, the work is dropped too.
#[cfg(feature = "tokio")]
impl Executor for tokio::sync::mpsc::UnboundedSender<Work> {
    fn submit(&self, work: Work) {
        if self.send(work).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Work queue is closed, dropping work");
        }
    }
}
