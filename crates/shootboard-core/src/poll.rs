//! Polling Refresh Loop
//!
//! Periodic full resync: every tick re-fetches each registered store and
//! replaces its local state. There is no merge, so an optimistic change whose
//! remote write has not landed yet is overwritten by the next tick.

use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::error::PersistenceResult;

/// A store that can replace its state with the service's.
#[async_trait(?Send)]
pub trait Refresh {
    /// Used in log lines.
    fn name(&self) -> &'static str;

    async fn refresh(&self) -> PersistenceResult<()>;
}

/// Stops a running poll loop. Clones share the same flag.
///
/// `Send + Sync` so it can be moved into teardown hooks.
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    stopped: Arc<AtomicBool>,
}

impl PollHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Refresh every target once.
///
/// Targets run concurrently; a failure is logged and does not affect the
/// others. Returns how many succeeded.
pub async fn refresh_all(targets: &[Rc<dyn Refresh>]) -> usize {
    let results = join_all(targets.iter().map(|target| target.refresh())).await;
    let mut ok = 0;
    for (target, result) in targets.iter().zip(results) {
        match result {
            Ok(()) => ok += 1,
            Err(err) => warn!(target = target.name(), error = %err, "refresh failed"),
        }
    }
    ok
}

/// Refresh immediately, then once per `interval` until `handle` is stopped.
///
/// `sleep` supplies the timer: `gloo_timers::future::sleep` in the browser,
/// `tokio::time::sleep` natively.
pub async fn run_polling<S, F>(
    targets: Vec<Rc<dyn Refresh>>,
    interval: Duration,
    handle: PollHandle,
    sleep: S,
) where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!(targets = targets.len(), ?interval, "polling started");
    let mut ticks: u64 = 0;
    while !handle.is_stopped() {
        refresh_all(&targets).await;
        ticks += 1;
        debug!(ticks, "poll tick done");
        sleep(interval).await;
    }
    info!(ticks, "polling stopped");
}
