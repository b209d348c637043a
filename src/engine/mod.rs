//! Balance aggregation and greedy settlement.

pub mod aggregator;
pub mod config;
pub mod report;
pub mod settlement;
