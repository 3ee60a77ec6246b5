pub mod audit;
pub mod dashboard;
pub mod disputes;
pub mod entries;
pub mod preview;
