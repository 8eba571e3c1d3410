//! Informed RRT* path planning
//!
//! Asymptotically optimal variant of RRT: every new node picks the cheapest
//! feasible parent among its neighbors, neighbors are rewired through the
//! new node when that shortens their path, and once a solution exists the
//! sampler is restricted to the ellipsoidal informed set spanned by the
//! start, the goal, and the current best cost. The planner always runs its
//! full sample budget and then reports the best goal-region node.
//!
//! References:
//! - Karaman, S., & Frazzoli, E. (2011). "Sampling-based Algorithms for
//!   Optimal Motion Planning"
//! - Gammell, J. D., Srinivasa, S. S., & Barfoot, T. D. (2014).
//!   "Informed RRT*: Optimal Sampling-based Path Planning Focused via
//!   Direct Sampling of an Admissible Ellipsoidal Heuristic"

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Constraint, ConstraintType, PlannerResult, State};
use crate::path_planning::rrt::{validate_goal_sampling_rate, validate_space_dim};
use crate::path_planning::sampling;
use crate::path_planning::steer::steer;
use crate::path_planning::tree::{Node, Tree};

/// Configuration for the Informed RRT* planner
#[derive(Debug, Clone)]
pub struct InformedRRTStarConfig {
    /// Dimension of the configuration space
    pub dim: usize,
    /// Number of sampling iterations for one `solve` call
    pub max_sampling_num: usize,
    /// Probability of sampling the goal state directly (0.0-1.0)
    pub goal_sampling_rate: f64,
    /// Maximum length of one steering step
    pub expand_dist: f64,
    /// Coefficient of the shrinking near-node radius
    pub r: f64,
    /// Radius around the goal within which nodes join the goal region
    pub goal_region_radius: f64,
}

impl Default for InformedRRTStarConfig {
    fn default() -> Self {
        Self {
            dim: 2,
            max_sampling_num: 2000,
            goal_sampling_rate: 0.1,
            expand_dist: 1.0,
            r: 5.0,
            goal_region_radius: 0.5,
        }
    }
}

/// Informed RRT* path planner
pub struct InformedRRTStarPlanner {
    config: InformedRRTStarConfig,
    tree: Tree,
    result: Vec<State>,
    result_cost: f64,
}

impl InformedRRTStarPlanner {
    /// Create a planner, validating the goal sampling rate.
    pub fn new(config: InformedRRTStarConfig) -> PlannerResult<Self> {
        validate_goal_sampling_rate(config.goal_sampling_rate)?;
        Ok(InformedRRTStarPlanner {
            config,
            tree: Tree::default(),
            result: Vec::new(),
            result_cost: 0.0,
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

    pub fn set_r(&mut self, r: f64) {
        self.config.r = r;
    }

    pub fn set_goal_region_radius(&mut self, goal_region_radius: f64) {
        self.config.goal_region_radius = goal_region_radius;
    }

    /// Plan from `start` to `goal`, returning `Ok(true)` on success and
    /// `Ok(false)` when no path was found within the budget.
    ///
    /// `Err` reports caller bugs: a configured dimension that does not
    /// match the constraint's space, and mismatched or sub-2 state
    /// dimensions or coincident start and goal surfaced by the rotation
    /// builder. Both endpoints are expected to classify as `Entry`; the
    /// planner does not check them.
    pub fn solve<C: Constraint>(
        &mut self,
        constraint: &C,
        start: &State,
        goal: &State,
    ) -> PlannerResult<bool> {
        let mut rng = StdRng::from_entropy();
        self.solve_with_rng(constraint, start, goal, &mut rng)
    }

    /// Plan with a seeded generator; identical seeds give identical paths,
    /// trees, and costs.
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
        let dim = self.config.dim;

        // straight-line cost, ellipsoid center, and the rotation taking the
        // canonical ellipsoid frame to the start-to-goal direction
        let c_min = goal.distance_from(start);
        let mut center_v = (&(start + goal) / 2.0).vals;
        center_v.push(0.0);
        let center = DVector::from_vec(center_v);
        let rotation = sampling::rotation_to_world_frame(start, goal)?;

        let mut tree = Tree::with_root(start.clone());
        let mut goal_node_indexes: Vec<usize> = Vec::new();

        for _ in 0..self.config.max_sampling_num {
            // best cost among nodes currently in the goal region
            let best_cost = goal_node_indexes
                .iter()
                .map(|&i| tree.node(i).cost)
                .fold(f64::INFINITY, f64::min);

            // Goal-biased sampling: uniform over the space until a solution
            // exists, ellipsoidal afterwards. A forbidden candidate forfeits
            // the iteration.
            let rand_state = if rng.gen::<f64>() <= self.config.goal_sampling_rate {
                goal.clone()
            } else {
                let s = if best_cost == f64::INFINITY {
                    sampling::sample_uniform(rng, space)
                } else {
                    sampling::sample_informed(rng, best_cost, c_min, &center, &rotation)?
                };
                if constraint.classify(&s) == ConstraintType::NoEntry {
                    continue;
                }
                s
            };

            let nearest_index = tree.nearest(&rand_state);
            let nearest = tree.node(nearest_index);
            let (new_state, step) = steer(&nearest.state, &rand_state, self.config.expand_dist);

            if !constraint.segment_free(&nearest.state, &new_state) {
                continue;
            }

            let radius = near_radius(self.config.r, tree.len(), dim);
            let near_indexes = tree.near_indices(&new_state, radius);

            // Choose parent: cheapest feasible connection among the near
            // nodes, falling back to the steered-from node.
            let mut parent_index = nearest_index;
            let mut cost = tree.node(nearest_index).cost + step;
            let mut min_cost = f64::INFINITY;
            for &near in &near_indexes {
                let near_node = tree.node(near);
                let near_cost = near_node.cost + new_state.distance_from(&near_node.state);
                if near_cost < min_cost && constraint.segment_free(&new_state, &near_node.state) {
                    parent_index = near;
                    min_cost = near_cost;
                }
            }
            if min_cost != f64::INFINITY {
                cost = min_cost;
            }

            let new_index = tree.add(Node::new(new_state.clone(), Some(parent_index), cost));

            // Rewire: route near nodes through the new node when that is
            // strictly cheaper. Descendant costs are left as they are.
            for &near in &near_indexes {
                let rewired_cost =
                    tree.node(new_index).cost + tree.node(near).state.distance_from(&new_state);
                if rewired_cost < tree.node(near).cost
                    && constraint.segment_free(&new_state, &tree.node(near).state)
                {
                    let near_node = tree.node_mut(near);
                    near_node.parent = Some(new_index);
                    near_node.cost = rewired_cost;
                }
            }

            if new_state.distance_from(goal) < self.config.goal_region_radius {
                goal_node_indexes.push(new_index);
            }
        }

        self.result.clear();
        self.result_cost = 0.0;

        let success = match best_goal_index(&tree, goal, self.config.expand_dist) {
            None => false,
            Some(best_index) => {
                let best = tree.node(best_index);
                self.result_cost = best.cost + best.state.distance_from(goal);

                if best.state != *goal {
                    self.result.push(goal.clone());
                }
                let mut index = best_index;
                loop {
                    let node = tree.node(index);
                    self.result.push(node.state.clone());
                    match node.parent {
                        Some(parent) => index = parent,
                        None => break,
                    }
                }
                self.result.reverse();
                true
            }
        };

        self.tree = tree;
        Ok(success)
    }

    /// Path from start to goal produced by the last successful `solve`.
    pub fn result(&self) -> &[State] {
        &self.result
    }

    /// Cost of the returned path as recorded in the tree.
    pub fn result_cost(&self) -> f64 {
        self.result_cost
    }

    /// Tree built during the last `solve`.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

/// Shrinking near-node radius `r * (ln|V| / |V|)^(1/dim)`.
fn near_radius(r: f64, num_nodes: usize, dim: usize) -> f64 {
    let n = num_nodes as f64;
    r * (n.ln() / n).powf(1.0 / dim as f64)
}

/// Node within `radius` of `goal` with the smallest cost, if any. The first
/// node scanned wins ties.
fn best_goal_index(tree: &Tree, goal: &State, radius: f64) -> Option<usize> {
    let mut best_index = None;
    let mut min_cost = f64::INFINITY;
    for (i, node) in tree.nodes().iter().enumerate() {
        if goal.distance_from(&node.state) < radius && node.cost < min_cost {
            best_index = Some(i);
            min_cost = node.cost;
        }
    }
    best_index
}
