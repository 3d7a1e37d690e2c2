//! Property-based tests for operator inference.

pub mod generators;

mod init_props;
mod rng_props;
