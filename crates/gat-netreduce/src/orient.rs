//! Direction bookkeeping shared by the rules that must re-anchor a line's
//! signed flow bounds onto a new canonical direction.
use crate::ids::BusId;
use crate::model::Line;

/// A line's bound fields expressed relative to some chosen `(from, to)`
/// direction, which may or may not be the line's own stored direction.
#[derive(Debug, Clone)]
pub struct Oriented {
    pub ub: Vec<f64>,
    pub lb: Vec<f64>,
    pub active_ub: bool,
    pub active_lb: bool,
    pub active_ub_pp: Vec<bool>,
    pub active_lb_pp: Vec<bool>,
}

impl Oriented {
    /// Re-express `line`'s bounds in the direction `dir`, which must match
    /// either `(line.from, line.to)` or its reverse.
    pub fn align(line: &Line, dir: (BusId, BusId)) -> Self {
        if (line.from, line.to) == dir {
            Oriented {
                ub: line.flow_ub.clone(),
                lb: line.flow_lb.clone(),
                active_ub: line.active_ub,
                active_lb: line.active_lb,
                active_ub_pp: line.active_ub_per_period.clone(),
                active_lb_pp: line.active_lb_per_period.clone(),
            }
        } else {
            debug_assert_eq!((line.to, line.from), dir, "dir does not match either orientation of line");
            Oriented {
                ub: line.flow_lb.iter().map(|v| -v).collect(),
                lb: line.flow_ub.iter().map(|v| -v).collect(),
                active_ub: line.active_lb,
                active_lb: line.active_ub,
                active_ub_pp: line.active_lb_per_period.clone(),
                active_lb_pp: line.active_ub_per_period.clone(),
            }
        }
    }
}
