//! Runtime infrastructure - Tokio runtime bridge for backend calls

mod bridge;
mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use worker::{run_async_worker, TEST_FAILED_FALLBACK};
