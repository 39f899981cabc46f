// Library root: stat categories, box-score extraction, season aggregation,
// and the snapshot / display presenters.

pub mod aggregate;
pub mod category;
pub mod extract;
pub mod present;
pub mod snapshot;
