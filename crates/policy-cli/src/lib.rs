#![deny(unsafe_code)]

//! CLI library components for policy form auto-fill.

pub mod autofill;
pub mod logging;
