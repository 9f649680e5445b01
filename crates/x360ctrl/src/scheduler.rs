use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};

use crate::error::{Error, Result};

/// A task invoked on a dedicated thread at a fixed interval.
///
/// Once [`RepeatingTask::stop`] returns, no further invocation starts.
/// An invocation that is already running is waited for, unless `stop` is
/// called from inside the task itself. The task receives the cancellation
/// flag so an invocation blocked on a lock can bail out once it is set.
pub struct RepeatingTask {
    cancelled: Arc<AtomicBool>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTask {
    /// Spawns the task thread. The first invocation happens one `interval`
    /// after spawning.
    pub fn spawn<F>(name: &str, interval: Duration, mut task: F) -> Result<Self>
    where
        F: FnMut(&AtomicBool) + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            if flag.load(Ordering::Acquire) {
                                break;
                            }
                            task(&flag);
                        }
                    }
                }
                log::trace!("repeating task stopped");
            })
            .map_err(|e| Error::Scheduler(e.to_string()))?;

        Ok(Self {
            cancelled,
            stop_tx,
            handle: Some(handle),
        })
    }

    /// Returns `true` until the task has been stopped.
    pub fn is_running(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire)
    }

    /// Cancels future invocations and waits for the task thread to exit.
    pub fn stop(&mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        let _ = self.stop_tx.try_send(());
    }

    /// Cancels future invocations without waiting for the task thread. An
    /// invocation already running finishes on its own.
    pub fn detach(&mut self) {
        self.cancel();
        self.handle = None;
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}
