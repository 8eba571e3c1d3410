//! Common types, traits, and error definitions for motion-planner
//!
//! This module provides the foundational building blocks used by the
//! sampling-based planners: configuration-space primitives, the constraint
//! oracle interface, and the error types.

pub mod constraint;
pub mod error;
pub mod state;

pub use constraint::*;
pub use error::*;
pub use state::*;
