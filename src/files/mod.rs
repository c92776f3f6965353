//! File path helpers.

pub mod paths;
