//! Parallel-line combiner: folds two branches with a common
//! endpoint pair into one equivalent branch.
//!
//! Always invoked right before deleting whichever of the two lines is not
//! kept, never exposed as a standalone rule.

use crate::model::Line;
use crate::orient::Oriented;

/// Combine `a` and `b`, which must share the same unordered endpoint pair.
/// The result is oriented along `a`'s `from`/`to` direction; `b` is aligned
/// to that direction first (flow bounds negated and swapped if `b` runs the
/// other way).
///
/// Emergency limits are not part of this crate's `Line`; only
/// the fields `Line` actually carries are combined.
pub fn combine(a: &Line, b: &Line) -> Line {
    debug_assert!(
        (b.from == a.from && b.to == a.to) || (b.from == a.to && b.to == a.from),
        "combine() requires a common endpoint pair"
    );

    let t = a.flow_ub.len();
    debug_assert_eq!(t, b.flow_ub.len());

    let b_aligned = Oriented::align(b, (a.from, a.to));
    let (b_ub, b_lb, b_active_ub, b_active_lb, b_ub_pp, b_lb_pp) = (
        b_aligned.ub,
        b_aligned.lb,
        b_aligned.active_ub,
        b_aligned.active_lb,
        b_aligned.active_ub_pp,
        b_aligned.active_lb_pp,
    );

    let x_a = a.reactance;
    let x_b = b.reactance;
    let reactance = x_a * x_b / (x_a + x_b);
    let y = x_a / (x_a + x_b);

    let flow_ub: Vec<f64> = (0..t)
        .map(|i| f64::min(a.flow_ub[i] + y * b_ub[i], b_ub[i] + (1.0 - y) * a.flow_ub[i]))
        .collect();
    let flow_lb: Vec<f64> = (0..t)
        .map(|i| f64::max(a.flow_lb[i] + y * b_lb[i], b_lb[i] + (1.0 - y) * a.flow_lb[i]))
        .collect();

    let active_ub_per_period: Vec<bool> = a
        .active_ub_per_period
        .iter()
        .zip(b_ub_pp.iter())
        .map(|(x, y)| *x || *y)
        .collect();
    let active_lb_per_period: Vec<bool> = a
        .active_lb_per_period
        .iter()
        .zip(b_lb_pp.iter())
        .map(|(x, y)| *x || *y)
        .collect();

    Line {
        from: a.from,
        to: a.to,
        reactance,
        resistance: a.resistance + b.resistance,
        shunt_conductance: a.shunt_conductance + b.shunt_conductance,
        shunt_susceptance: a.shunt_susceptance + b.shunt_susceptance,
        flow_ub,
        flow_lb,
        active_bounds: a.active_bounds || b.active_bounds,
        active_ub: a.active_ub || b_active_ub,
        active_lb: a.active_lb || b_active_lb,
        active_ub_per_period,
        active_lb_per_period,
    }
}
