pub mod normalized;
pub mod ranking;
pub mod stats_table;
pub mod trend;
