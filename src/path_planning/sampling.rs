//! Samplers for the sampling-based planners
//!
//! Provides the uniform-in-box draw used by both planners, the unit n-ball
//! sampler, and the informed ellipsoidal sampler with its SVD-based
//! rotation-to-world-frame construction.
//!
//! Reference: Gammell, J. D., Srinivasa, S. S., & Barfoot, T. D. (2014).
//! "Informed RRT*: Optimal Sampling-based Path Planning Focused via Direct
//! Sampling of an Admissible Ellipsoidal Heuristic"

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::common::{PlannerError, PlannerResult, Space, State};

/// Draw one state with each component uniform over its dimension's bound.
pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, space: &Space) -> State {
    let vals = (0..space.dim())
        .map(|i| {
            let b = space.bound(i);
            rng.gen_range(b.low..=b.high)
        })
        .collect();
    State::new(vals)
}

/// Draw a point uniformly from the unit `dim`-ball.
///
/// A standard-normal vector gives the direction (redrawn in the measure-zero
/// case of a zero norm), and `u^(1/dim)` gives the radius.
pub fn sample_unit_n_ball<R: Rng + ?Sized>(rng: &mut R, dim: usize) -> PlannerResult<State> {
    if dim == 0 {
        return Err(PlannerError::InvalidDimension(
            "cannot sample a zero-dimensional ball".to_string(),
        ));
    }

    let mut x = State::zeros(dim);
    loop {
        for v in &mut x.vals {
            *v = rng.sample(StandardNormal);
        }
        let r = x.norm();
        if r != 0.0 {
            x = &x / r;
            break;
        }
    }

    let r = rng.gen::<f64>().powf(1.0 / dim as f64);
    Ok(&x * r)
}

/// Build the rotation taking the canonical ellipsoid frame to the
/// start-to-goal direction.
///
/// The unit direction `a1` is padded with a trailing zero, the rank-1
/// matrix `a1 * e1^T` is decomposed with a full SVD, and the determinants
/// of `U` and `V` are folded into the diagonal so the result is a proper
/// rotation (`det = +1`) with `C * e1 = a1`.
pub fn rotation_to_world_frame(start: &State, goal: &State) -> PlannerResult<DMatrix<f64>> {
    if start.dim() != goal.dim() || start.dim() < 2 {
        return Err(PlannerError::InvalidDimension(
            "rotation to world frame requires matching state dimensions of at least 2".to_string(),
        ));
    }

    let c_min = goal.distance_from(start);
    if c_min == 0.0 {
        return Err(PlannerError::InvalidParameter(
            "start and goal states coincide".to_string(),
        ));
    }

    let a1 = &(goal - start) / c_min;
    let mut a1_v = a1.vals;
    a1_v.push(0.0);
    let n = a1_v.len();

    let m = DVector::from_vec(a1_v) * DMatrix::<f64>::identity(1, n);
    let svd = m.svd(true, true);
    let u = svd.u.unwrap();
    let v_t = svd.v_t.unwrap();

    let mut diag = DVector::from_element(n, 1.0);
    diag[n - 2] = u.determinant();
    diag[n - 1] = v_t.determinant();

    Ok(u * DMatrix::from_diagonal(&diag) * v_t)
}

/// Draw one state from the informed set: the ellipsoid with foci at the
/// start and goal, semi-major axis `c_best / 2`, and remaining semi-axes
/// `sqrt(c_best^2 - c_min^2) / 2`.
///
/// `center` and `rotation` carry the one-padded dimension used by
/// [`rotation_to_world_frame`]; the padded coordinate stays inert and is
/// dropped when the sample is narrowed back to the space dimension.
pub fn sample_informed<R: Rng + ?Sized>(
    rng: &mut R,
    c_best: f64,
    c_min: f64,
    center: &DVector<f64>,
    rotation: &DMatrix<f64>,
) -> PlannerResult<State> {
    let dim = center.len() - 1;

    let r = (c_best.powi(2) - c_min.powi(2)).sqrt() / 2.0;
    let mut diag = DVector::from_element(dim + 1, r);
    diag[0] = c_best / 2.0;

    let x_ball = sample_unit_n_ball(rng, dim)?;
    let mut x_ball_v = x_ball.vals;
    x_ball_v.push(0.0);

    let sample = rotation * DMatrix::from_diagonal(&diag) * DVector::from_vec(x_ball_v) + center;

    Ok(State::new(sample.iter().take(dim).copied().collect()))
}
