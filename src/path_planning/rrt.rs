//! Rapidly-exploring Random Tree (RRT) path planning
//!
//! Grows a tree from the start by repeatedly steering the nearest node
//! toward a goal-biased random sample, and returns the first feasible path.
//!
//! Reference: LaValle, S. M. (1998). "Rapidly-Exploring Random Trees: A New
//! Tool for Path Planning"

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Constraint, ConstraintType, PlannerError, PlannerResult, Space, State};
use crate::path_planning::sampling;
use crate::path_planning::steer::steer;
use crate::path_planning::tree::{Node, Tree};

/// Configuration for the RRT planner
#[derive(Debug, Clone)]
pub struct RRTConfig {
    /// Dimension of the configuration space
    pub dim: usize,
    /// Sample budget for one `solve` call
    pub max_sampling_num: usize,
    /// Probability of sampling the goal state directly (0.0-1.0)
    pub goal_sampling_rate: f64,
    /// Maximum length of one steering step
    pub expand_dist: f64,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            dim: 2,
            max_sampling_num: 5000,
            goal_sampling_rate: 0.1,
            expand_dist: 1.0,
        }
    }
}

/// RRT path planner
pub struct RRTPlanner {
    config: RRTConfig,
    tree: Tree,
    result: Vec<State>,
}

impl RRTPlanner {
    /// Create a planner, validating the goal sampling rate.
    pub fn new(config: RRTConfig) -> PlannerResult<Self> {
        validate_goal_sampling_rate(config.goal_sampling_rate)?;
        Ok(RRTPlanner {
            config,
            tree: Tree::default(),
            result: Vec::new(),
        })
    }

    pub fn set_max_sampling_num(&mut self, max_sampling_num: usize) {
        self.config.max_sampling_num = max_sampling_num;
    }

    pub fn set_goal_sampling_rate(&mut self, goal_sampling_rate: f64) -> PlannerResult<()> {
        validate_goal_sampling_rate(goal_sampling_rate)?;
        self.config.goal_sampling_rate = goal_sampling_rate;
        Ok(())
    }

    pub fn set_expand_dist(&mut self, expand_dist: f64) {
        self.config.expand_dist = expand_dist;
    }

    /// Plan from `start` to `goal`, returning `Ok(true)` on success and
    /// `Ok(false)` when no path was found within the budget.
    ///
    /// `Err` reports a configured dimension that does not match the
    /// constraint's space. Both endpoints are expected to classify as
    /// `Entry`; the planner does not check them.
    pub fn solve<C: Constraint>(
        &mut self,
        constraint: &C,
        start: &State,
        goal: &State,
    ) -> PlannerResult<bool> {
        let mut rng = StdRng::from_entropy();
        self.solve_with_rng(constraint, start, goal, &mut rng)
    }

    /// Plan with a seeded generator; identical seeds give identical paths
    /// and trees.
    pub fn solve_with_seed<C: Constraint>(
        &mut self,
        constraint: &C,
        start: &State,
        goal: &State,
        seed: u64,
    ) -> PlannerResult<bool> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.solve_with_rng(constraint, start, goal, &mut rng)
    }

    fn solve_with_rng<C: Constraint>(
        &mut self,
        constraint: &C,
        start: &State,
        goal: &State,
        rng: &mut StdRng,
    ) -> PlannerResult<bool> {
        let space = constraint.space();
        validate_space_dim(self.config.dim, space)?;

        let mut tree = Tree::with_root(start.clone());

        let mut sampling_cnt = 0;
        let success = loop {
            // Goal-biased random sampling. Forbidden samples are redrawn
            // without consuming budget.
            let rand_state = if rng.gen::<f64>() <= self.config.goal_sampling_rate {
                goal.clone()
            } else {
                let s = sampling::sample_uniform(rng, space);
                if constraint.classify(&s) == ConstraintType::NoEntry {
                    continue;
                }
                s
            };

            let nearest_index = tree.nearest(&rand_state);
            let nearest = tree.node(nearest_index);
            let (new_state, step) = steer(&nearest.state, &rand_state, self.config.expand_dist);
            let new_cost = nearest.cost + step;

            if constraint.segment_free(&nearest.state, &new_state) {
                let dist_to_goal = new_state.distance_from(goal);
                let new_index = tree.add(Node::new(new_state, Some(nearest_index), new_cost));

                if dist_to_goal <= self.config.expand_dist {
                    let goal_cost = tree.node(new_index).cost + dist_to_goal;
                    tree.add(Node::new(goal.clone(), Some(new_index), goal_cost));
                    break true;
                }
            }

            sampling_cnt += 1;
            if sampling_cnt >= self.config.max_sampling_num {
                break false;
            }
        };

        self.result.clear();
        if success {
            let mut index = tree.len() - 1;
            loop {
                let node = tree.node(index);
                self.result.push(node.state.clone());
                match node.parent {
                    Some(parent) => index = parent,
                    None => break,
                }
            }
            self.result.reverse();
        }

        self.tree = tree;
        Ok(success)
    }

    /// Path from start to goal produced by the last successful `solve`.
    pub fn result(&self) -> &[State] {
        &self.result
    }

    /// Tree built during the last `solve`.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

pub(crate) fn validate_goal_sampling_rate(rate: f64) -> PlannerResult<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(PlannerError::InvalidParameter(format!(
            "goal sampling rate must be in [0, 1], got {}",
            rate
        )));
    }
    Ok(())
}

pub(crate) fn validate_space_dim(dim: usize, space: &Space) -> PlannerResult<()> {
    if space.dim() != dim {
        return Err(PlannerError::InvalidDimension(format!(
            "configured dimension {} does not match the constraint space dimension {}",
            dim,
            space.dim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Bound, Space};

    /// 2-D world bounded to [0, 10] x [0, 10] with axis-aligned rectangular
    /// obstacles given as (xmin, xmax, ymin, ymax).
    struct RectWorld {
        space: Space,
        obstacles: Vec<(f64, f64, f64, f64)>,
    }

    impl RectWorld {
        fn new(obstacles: Vec<(f64, f64, f64, f64)>) -> Self {
            RectWorld {
                space: Space::new(vec![Bound::new(0.0, 10.0), Bound::new(0.0, 10.0)]),
                obstacles,
            }
        }
    }

    impl Constraint for RectWorld {
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
            let (x, y) = (state.vals[0], state.vals[1]);
            for &(xmin, xmax, ymin, ymax) in &self.obstacles {
                if xmin <= x && x <= xmax && ymin <= y && y <= ymax {
                    return ConstraintType::NoEntry;
                }
            }
            ConstraintType::Entry
        }
    }

    fn path_length(path: &[State]) -> f64 {
        path.windows(2).map(|w| w[0].distance_from(&w[1])).sum()
    }

    #[test]
    fn test_invalid_goal_sampling_rate() {
        let config = RRTConfig {
            goal_sampling_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            RRTPlanner::new(config),
            Err(PlannerError::InvalidParameter(_))
        ));

        let mut planner = RRTPlanner::new(RRTConfig::default()).unwrap();
        assert!(planner.set_goal_sampling_rate(-0.1).is_err());
        assert!(planner.set_goal_sampling_rate(0.5).is_ok());
    }

    #[test]
    fn test_rejects_mismatched_space_dimension() {
        let world = RectWorld::new(Vec::new());
        let config = RRTConfig {
            dim: 3,
            ..Default::default()
        };
        let mut planner = RRTPlanner::new(config).unwrap();
        let result = planner.solve_with_seed(
            &world,
            &State::new(vec![1.0, 1.0]),
            &State::new(vec![9.0, 9.0]),
            0,
        );
        assert!(matches!(result, Err(PlannerError::InvalidDimension(_))));
        assert!(planner.result().is_empty());
    }

    #[test]
    fn test_empty_space() {
        let world = RectWorld::new(Vec::new());
        let start = State::new(vec![1.0, 1.0]);
        let goal = State::new(vec![9.0, 9.0]);

        let mut planner = RRTPlanner::new(RRTConfig::default()).unwrap();
        assert!(planner.solve_with_seed(&world, &start, &goal, 1).unwrap());

        let path = planner.result();
        assert_eq!(path.first().unwrap(), &start);
        assert_eq!(path.last().unwrap(), &goal);
        assert!(path_length(path) <= 15.0, "path length {}", path_length(path));

        for w in path.windows(2) {
            assert!(world.segment_free(&w[0], &w[1]));
        }
    }

    #[test]
    fn test_wall_with_gap() {
        // wall across x in [4.5, 5.5] with a gap at y in [4.5, 5.5]
        let world = RectWorld::new(vec![
            (4.5, 5.5, 0.0, 4.5),
            (4.5, 5.5, 5.5, 10.0),
        ]);
        let start = State::new(vec![1.0, 5.0]);
        let goal = State::new(vec![9.0, 5.0]);

        let config = RRTConfig {
            expand_dist: 0.5,
            max_sampling_num: 20000,
            ..Default::default()
        };
        let mut planner = RRTPlanner::new(config).unwrap();
        assert!(planner.solve_with_seed(&world, &start, &goal, 2).unwrap());

        let path = planner.result();
        assert_eq!(path.first().unwrap(), &start);
        assert_eq!(path.last().unwrap(), &goal);
        let through_gap = path.iter().any(|s| {
            4.5 <= s.vals[0] && s.vals[0] <= 5.5 && 4.5 <= s.vals[1] && s.vals[1] <= 5.5
        });
        assert!(through_gap, "path does not thread the gap");
    }

    #[test]
    fn test_no_feasible_path() {
        // wall across x in [4, 6] spanning the full height
        let world = RectWorld::new(vec![(4.0, 6.0, 0.0, 10.0)]);
        let start = State::new(vec![1.0, 5.0]);
        let goal = State::new(vec![9.0, 5.0]);

        let config = RRTConfig {
            max_sampling_num: 1000,
            ..Default::default()
        };
        let mut planner = RRTPlanner::new(config).unwrap();
        assert!(!planner.solve_with_seed(&world, &start, &goal, 3).unwrap());
        assert!(planner.result().is_empty());
    }

    #[test]
    fn test_tree_structure() {
        let world = RectWorld::new(vec![(4.5, 5.5, 0.0, 4.5), (4.5, 5.5, 5.5, 10.0)]);
        let start = State::new(vec![1.0, 5.0]);
        let goal = State::new(vec![9.0, 5.0]);

        let mut planner = RRTPlanner::new(RRTConfig::default()).unwrap();
        assert!(planner.solve_with_seed(&world, &start, &goal, 4).unwrap());

        let tree = planner.tree();
        assert_eq!(tree.nodes().iter().filter(|n| n.parent.is_none()).count(), 1);
        assert_eq!(tree.node(0).state, start);
        assert_eq!(tree.node(0).cost, 0.0);

        for index in 0..tree.len() {
            let mut current = index;
            let mut hops = 0;
            while let Some(parent) = tree.node(current).parent {
                let node = tree.node(current);
                assert!(node.cost >= tree.node(parent).cost);
                current = parent;
                hops += 1;
                assert!(hops <= tree.len(), "cycle reached from node {}", index);
            }
            assert_eq!(current, 0);
        }
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let world = RectWorld::new(vec![(4.5, 5.5, 0.0, 4.5), (4.5, 5.5, 5.5, 10.0)]);
        let start = State::new(vec![1.0, 5.0]);
        let goal = State::new(vec![9.0, 5.0]);

        let mut a = RRTPlanner::new(RRTConfig::default()).unwrap();
        let mut b = RRTPlanner::new(RRTConfig::default()).unwrap();
        assert!(a.solve_with_seed(&world, &start, &goal, 99).unwrap());
        assert!(b.solve_with_seed(&world, &start, &goal, 99).unwrap());

        assert_eq!(a.result(), b.result());
        assert_eq!(a.tree().len(), b.tree().len());
        for (na, nb) in a.tree().nodes().iter().zip(b.tree().nodes()) {
            assert_eq!(na.state, nb.state);
            assert_eq!(na.parent, nb.parent);
            assert_eq!(na.cost, nb.cost);
        }
    }
}
