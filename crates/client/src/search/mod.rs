//! Search execution: submit, wait, fetch and partition.
//!
//! # Submodules
//! - `api`: the [`SearchJobApi`] trait the engine runs against
//! - `options`: per-search [`SearchOptions`]
//! - `window`: [`TimeWindow`] and its subdivision
//! - `poll`: [`PollPolicy`] and the status polling loop
//! - `executor`: [`SearchExecutor`], the recursive partitioning pipeline
//!
//! # What this module does NOT handle:
//! - HTTP, authentication or response decoding (see [`crate::client`] and [`crate::endpoints`])

mod api;
mod executor;
mod options;
mod poll;
mod window;

pub use api::SearchJobApi;
pub use executor::SearchExecutor;
pub use options::SearchOptions;
pub use poll::{PollPolicy, wait_for_job};
pub use window::{TimeWindow, partition_step, split_window};
