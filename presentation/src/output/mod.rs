//! Answer output formatting

pub mod console;
