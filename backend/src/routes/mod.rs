pub mod detail;
pub mod ranking;
pub mod snapshot;
