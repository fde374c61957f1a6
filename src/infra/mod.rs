//! Infrastructure adapters: queue backends and the host-interface channel.

pub mod hif;
pub mod queue;

pub use hif::{HifChannel, HifCommand};
pub use queue::InMemoryFrameQueue;
