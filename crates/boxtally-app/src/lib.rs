// Library root: re-exports all modules so integration tests and the binaries
// can reach the crate's public API.

pub mod config;
pub mod espn;
pub mod league;
pub mod logging;
pub mod pipeline;
