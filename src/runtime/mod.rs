//! Runtime adapters: pass workers, spawners and the administrative API.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;
pub mod worker;

pub use api::{CreditResponse, StatsResponse, StatusResponse};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
#[cfg(feature = "tokio-runtime")]
pub use worker::spawn_pass_worker;
pub use worker::{spawn_pass_thread, Spawn};
