//! Progress indication while waiting for an answer

pub mod spinner;
