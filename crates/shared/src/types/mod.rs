//! Common types used across the application.

pub mod cutoff;
pub mod id;

pub use cutoff::CutoffRule;
pub use id::*;
