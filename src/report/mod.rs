pub mod export;
pub mod flags;
pub mod summary;

pub use summary::RosterSummary;
