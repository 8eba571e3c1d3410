//! n-dimensional steering along the straight line from `src` toward `dst`

use crate::common::State;

/// Produce a state at most `expand_dist` from `src` along the direction
/// toward `dst`, together with the length of the step taken.
///
/// When `dst` is closer than `expand_dist` the destination itself is
/// returned with the true distance. Otherwise the step has length exactly
/// `expand_dist`, built by an incremental spherical-coordinate
/// decomposition: from the topmost dimension down, each component's angle
/// against the remaining lower-dimensional distance splits the running step
/// into a `sin` contribution for that component and a `cos` remainder for
/// the rest.
pub fn steer(src: &State, dst: &State, expand_dist: f64) -> (State, f64) {
    let dist = src.distance_from(dst);
    if dist < expand_dist {
        return (dst.clone(), dist);
    }

    let dim = src.dim();
    let s = &src.vals;
    let d = &dst.vals;

    let mut new_state = src.clone();
    let mut step = expand_dist;
    for i in (1..dim).rev() {
        let dist_delta_dim = d[i] - s[i];
        let dist_lower_dim = if i != 1 {
            s[..i]
                .iter()
                .zip(&d[..i])
                .map(|(a, b)| (b - a).powi(2))
                .sum::<f64>()
                .sqrt()
        } else {
            d[0] - s[0]
        };

        let t = dist_delta_dim.atan2(dist_lower_dim);

        new_state.vals[i] += step * t.sin();
        step *= t.cos();
    }
    new_state.vals[0] += step;

    (new_state, expand_dist)
}
