//! Pass workers: the single context that executes scheduling passes.
//!
//! Activation only requests a pass; one of these workers claims the request
//! and runs it. Because requests coalesce in the [`PassTrigger`], at most
//! one pass is pending at any time and only one runs at a time.
//!
//! [`PassTrigger`]: crate::core::PassTrigger

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::core::{FrameQueue, TxScheduler};

/// Abstraction for spawning a future on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Run passes on the current task until the trigger shuts down.
#[cfg(feature = "tokio-runtime")]
pub async fn run_pass_loop<Q>(scheduler: Arc<TxScheduler<Q>>)
where
    Q: FrameQueue + Default + 'static,
{
    let trigger = Arc::clone(scheduler.trigger());
    while trigger.wait().await {
        scheduler.run_pass();
    }
    debug!("pass worker stopped");
}

/// Spawn [`run_pass_loop`] with `spawner`.
#[cfg(feature = "tokio-runtime")]
pub fn spawn_pass_worker<Q, S>(scheduler: Arc<TxScheduler<Q>>, spawner: &S)
where
    Q: FrameQueue + Default + 'static,
    S: Spawn,
{
    spawner.spawn(run_pass_loop(scheduler));
}

/// Run passes on a dedicated OS thread until the trigger shuts down.
///
/// # Errors
///
/// Returns the error from [`std::thread::Builder::spawn`].
pub fn spawn_pass_thread<Q>(scheduler: Arc<TxScheduler<Q>>) -> io::Result<JoinHandle<()>>
where
    Q: FrameQueue + Default + 'static,
{
    thread::Builder::new()
        .name("txq-pass".into())
        .spawn(move || {
            let trigger = Arc::clone(scheduler.trigger());
            while trigger.wait_blocking() {
                scheduler.run_pass();
            }
            debug!("pass thread stopped");
        })
}
