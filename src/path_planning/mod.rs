//! Sampling-based path planning algorithms
//!
//! This module contains the planners and their building blocks:
//! - RRT: returns the first feasible path
//! - Informed RRT*: asymptotically optimal, with ellipsoidal informed
//!   sampling once a first solution exists
//! - Shared pieces: the append-only tree store, n-dimensional steering,
//!   and the samplers (uniform, unit n-ball, informed ellipsoid)

pub mod informed_rrt_star;
pub mod rrt;
pub mod sampling;
pub mod steer;
pub mod tree;

// Re-exports for convenience
pub use informed_rrt_star::{InformedRRTStarConfig, InformedRRTStarPlanner};
pub use rrt::{RRTConfig, RRTPlanner};
pub use tree::{Node, Tree};
