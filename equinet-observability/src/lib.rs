//! # equinet-observability
//!
//! Tracing subscriber setup plus the span macros and structured events the
//! offline pipeline and the query path emit.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_filter, spans};
