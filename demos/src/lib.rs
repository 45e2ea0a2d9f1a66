//! Shared setup for the rapport demos and the `reporting-app` binary.

pub mod common;
pub mod render;
