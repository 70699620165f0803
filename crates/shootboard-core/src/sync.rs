//! Fire-and-forget remote writes and change listeners.
//!
//! Every store mutation runs in two phases: the local state changes inside
//! the call, then the remote write is handed to a [`Spawner`] and the call
//! returns without waiting for it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::error::PersistenceResult;

/// A detached unit of remote work.
pub type Task = LocalBoxFuture<'static, ()>;

/// Runs detached tasks on the local executor (`spawn_local` in the browser).
pub type Spawner = Rc<dyn Fn(Task)>;

/// Holds spawned tasks until they are explicitly driven.
///
/// Lets a caller decide when remote writes land relative to reads, e.g. to
/// let a poll overtake a pending write.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawner(&self) -> Spawner {
        let tasks = Rc::clone(&self.tasks);
        Rc::new(move |task| tasks.borrow_mut().push_back(task))
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run the oldest pending task; `false` when none was pending.
    pub async fn run_next(&self) -> bool {
        let next = self.tasks.borrow_mut().pop_front();
        match next {
            Some(task) => {
                task.await;
                true
            }
            None => false,
        }
    }

    /// Run pending tasks in spawn order, including ones spawned meanwhile.
    pub async fn run_all(&self) {
        while self.run_next().await {}
    }
}

/// Persistence handle plus the spawner its writes go through.
pub(crate) struct Remote<P> {
    service: Rc<P>,
    spawner: Spawner,
}

impl<P: 'static> Remote<P> {
    pub(crate) fn new(service: Rc<P>, spawner: Spawner) -> Self {
        Self { service, spawner }
    }

    pub(crate) fn service(&self) -> &P {
        &self.service
    }

    /// Spawn a remote write; failures are logged and otherwise dropped.
    pub(crate) fn dispatch<F, Fut>(&self, operation: &'static str, call: F)
    where
        F: FnOnce(Rc<P>) -> Fut + 'static,
        Fut: Future<Output = PersistenceResult<()>> + 'static,
    {
        let service = Rc::clone(&self.service);
        (self.spawner)(Box::pin(async move {
            match call(service).await {
                Ok(()) => debug!(operation, "remote write landed"),
                Err(err) => warn!(
                    operation,
                    error = %err,
                    "remote write failed; next refresh shows the server state"
                ),
            }
        }));
    }
}

/// Callbacks receiving a snapshot after each local change.
pub(crate) struct Listeners<S> {
    callbacks: RefCell<Vec<Rc<dyn Fn(&S)>>>,
}

impl<S> Default for Listeners<S> {
    fn default() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }
}

impl<S> Listeners<S> {
    pub(crate) fn add(&self, callback: impl Fn(&S) + 'static) {
        self.callbacks.borrow_mut().push(Rc::new(callback));
    }

    /// Calls every callback registered before this call. The list is
    /// copied first, so a callback may register further listeners.
    pub(crate) fn notify(&self, snapshot: &S) {
        let callbacks = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn queue_runs_tasks_in_spawn_order() {
        let queue = TaskQueue::new();
        let spawn = queue.spawner();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let seen = Rc::clone(&seen);
            spawn(Box::pin(async move { seen.borrow_mut().push(i) }));
        }
        assert_eq!(queue.len(), 3);
        assert!(seen.borrow().is_empty());

        assert!(queue.run_next().await);
        assert_eq!(*seen.borrow(), vec![0]);

        queue.run_all().await;
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert!(queue.is_empty());
        assert!(!queue.run_next().await);
    }

    #[test]
    fn listeners_see_every_notification() {
        let listeners = Listeners::<u32>::default();
        let total = Rc::new(Cell::new(0));
        let sink = Rc::clone(&total);
        listeners.add(move |v| sink.set(sink.get() + *v));
        listeners.notify(&2);
        listeners.notify(&3);
        assert_eq!(total.get(), 5);
    }

    #[test]
    fn listener_can_subscribe_from_inside_notify() {
        let listeners = Rc::new(Listeners::<u32>::default());
        let late_calls = Rc::new(Cell::new(0));

        let inner = Rc::clone(&listeners);
        let counter = Rc::clone(&late_calls);
        listeners.add(move |_| {
            let counter = Rc::clone(&counter);
            inner.add(move |_| counter.set(counter.get() + 1));
        });

        listeners.notify(&1);
        assert_eq!(late_calls.get(), 0);
        listeners.notify(&2);
        assert_eq!(late_calls.get(), 1);
    }
}
