//! Synthetic group histories for benchmarks and the CLI.

pub mod random_group;
