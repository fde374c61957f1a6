//! Frame queue backends.

pub mod memory;

pub use memory::InMemoryFrameQueue;
