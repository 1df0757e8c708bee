//! Core domain types and logic.

pub mod resolution;
pub mod udf;
pub mod upstream;
pub mod fallback;
pub mod error;
