//! Constraint oracle interface consumed by the sampling-based planners
//!
//! The oracle is owned by the caller and borrowed by a planner for the
//! duration of `solve`. It answers three questions: what the bounded space
//! looks like, whether a single state is allowed, and whether the straight
//! segment between two states is collision-free.

use crate::common::state::{Space, State};

/// Verdict of the oracle for a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// The state is allowed
    Entry,
    /// The state is forbidden (out of bounds or inside an obstacle)
    NoEntry,
}

/// Capability set the planners rely on.
pub trait Constraint {
    /// The bounded configuration space being searched.
    fn space(&self) -> &Space;

    /// Classify a single state.
    fn classify(&self, state: &State) -> ConstraintType;

    /// True iff the straight segment from `a` to `b` is collision-free.
    ///
    /// The default checks ten evenly spaced points at parametric ratios
    /// 0.0, 0.1, .., 0.9 through `classify`. Oracles with analytic obstacle
    /// geometry should override this with an exact segment test; an
    /// override must not report a segment free when any of those interior
    /// points is forbidden.
    fn segment_free(&self, a: &State, b: &State) -> bool {
        let vec = b - a;
        for i in 0..10 {
            let ratio = i as f64 / 10.0;
            let target = a + &(&vec * ratio);
            if self.classify(&target) == ConstraintType::NoEntry {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::state::Bound;

    /// 2-D world with a single circular obstacle.
    struct CircleWorld {
        space: Space,
        center: (f64, f64),
        radius: f64,
    }

    impl CircleWorld {
        fn new() -> Self {
            CircleWorld {
                space: Space::new(vec![Bound::new(0.0, 10.0), Bound::new(0.0, 10.0)]),
                center: (5.0, 5.0),
                radius: 1.0,
            }
        }
    }

    impl Constraint for CircleWorld {
        fn space(&self) -> &Space {
            &self.space
        }

        fn classify(&self, state: &State) -> ConstraintType {
            for i in 0..self.space.dim() {
                let b = self.space.bound(i);
                if state.vals[i] < b.low || b.high < state.vals[i] {
                    return ConstraintType::NoEntry;
                }
            }
            let dx = state.vals[0] - self.center.0;
            let dy = state.vals[1] - self.center.1;
            if (dx * dx + dy * dy).sqrt() <= self.radius {
                return ConstraintType::NoEntry;
            }
            ConstraintType::Entry
        }
    }

    #[test]
    fn test_classify() {
        let world = CircleWorld::new();
        assert_eq!(world.classify(&State::new(vec![1.0, 1.0])), ConstraintType::Entry);
        assert_eq!(world.classify(&State::new(vec![5.0, 5.0])), ConstraintType::NoEntry);
        assert_eq!(world.classify(&State::new(vec![-1.0, 5.0])), ConstraintType::NoEntry);
        assert_eq!(world.classify(&State::new(vec![5.0, 11.0])), ConstraintType::NoEntry);
    }

    #[test]
    fn test_segment_free_clear() {
        let world = CircleWorld::new();
        let a = State::new(vec![1.0, 1.0]);
        let b = State::new(vec![9.0, 1.0]);
        assert!(world.segment_free(&a, &b));
    }

    #[test]
    fn test_segment_free_blocked() {
        let world = CircleWorld::new();
        let a = State::new(vec![1.0, 5.0]);
        let b = State::new(vec![9.0, 5.0]);
        assert!(!world.segment_free(&a, &b));
    }

    #[test]
    fn test_segment_free_does_not_sample_endpoint() {
        let world = CircleWorld::new();
        // Segment ending just inside the obstacle: the parametric check
        // stops at ratio 0.9, so the endpoint itself is not examined.
        let a = State::new(vec![5.0, 0.0]);
        let b = State::new(vec![5.0, 4.2]);
        assert_eq!(world.classify(&b), ConstraintType::NoEntry);
        assert!(world.segment_free(&a, &b));
    }
}
