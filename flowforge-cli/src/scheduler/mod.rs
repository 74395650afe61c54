//! Scheduler layer
//!
//! Runs pipeline requests one after another against the remote API and
//! collects their results. A request only starts once the previous one has
//! finished successfully.

pub mod executor;

pub use executor::{Execution, SequentialExecutor};
