//! Single-flight pass requests.
//!
//! A request made while another is still pending merges into it, so however
//! many queues wake up before the worker gets to run, exactly one pass
//! follows. A request that arrives while a pass is running leaves one new
//! pending pass behind, which picks up whatever the running pass missed.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct TriggerState {
    pending: bool,
    shutdown: bool,
}

/// Coalescing pass request shared by the activation path and the pass worker.
#[derive(Debug, Default)]
pub struct PassTrigger {
    state: Mutex<TriggerState>,
    condvar: Condvar,
    #[cfg(feature = "tokio-runtime")]
    notify: tokio::sync::Notify,
}

impl PassTrigger {
    /// New trigger with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a pass. Returns `false` if the request merged with a pending one.
    pub fn request(&self) -> bool {
        {
            let mut state = self.state.lock();
            if state.pending || state.shutdown {
                return false;
            }
            state.pending = true;
        }
        self.condvar.notify_one();
        #[cfg(feature = "tokio-runtime")]
        self.notify.notify_one();
        true
    }

    /// Whether a pass is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending
    }

    /// Claim the pending request without waiting.
    pub fn try_take(&self) -> bool {
        std::mem::take(&mut self.state.lock().pending)
    }

    /// Block until a pass is pending and claim it. Returns `false` on shutdown.
    pub fn wait_blocking(&self) -> bool {
        let mut state = self.state.lock();
        while !state.pending && !state.shutdown {
            self.condvar.wait(&mut state);
        }
        if state.shutdown {
            return false;
        }
        state.pending = false;
        true
    }

    /// Wait for a pending pass and claim it. Returns `false` on shutdown.
    #[cfg(feature = "tokio-runtime")]
    pub async fn wait(&self) -> bool {
        loop {
            {
                let mut state = self.state.lock();
                if state.shutdown {
                    return false;
                }
                if state.pending {
                    state.pending = false;
                    return true;
                }
            }
            // a request between the check and here leaves a stored permit
            self.notify.notified().await;
        }
    }

    /// Stop every waiter; later requests are ignored.
    pub fn shutdown(&self) {
        self.state.lock().shutdown = true;
        self.condvar.notify_all();
        #[cfg(feature = "tokio-runtime")]
        self.notify.notify_waiters();
        #[cfg(feature = "tokio-runtime")]
        self.notify.notify_one();
    }

    /// Whether [`PassTrigger::shutdown`] was called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.state.lock().shutdown
    }
}
