//! Rule R2 — mid-point (degree-2) bus with no injection.

use crate::error::ReductionResult;
use crate::ids::BusId;
use crate::model::{Line, Network, ThermalFleet};
use crate::orient::Oriented;
use crate::parallel;

/// Eliminate `bus` if it has exactly degree 2, merging its two incident
/// lines into one between the neighbours. Returns `Ok(false)` (no mutation)
/// if the bus is not degree 2.
pub fn eliminate(network: &mut Network, thermals: &mut ThermalFleet, bus: BusId) -> ReductionResult<bool> {
    let incident = network.lines_incident(bus);
    if incident.len() != 2 {
        return Ok(false);
    }
    let (lid1, lid2) = (incident[0], incident[1]);
    let l1 = network.lines[&lid1].clone();
    let l2 = network.lines[&lid2].clone();
    let n1 = network.other_end(lid1, bus).expect("incident line must touch bus");
    let n2 = network.other_end(lid2, bus).expect("incident line must touch bus");

    // Path direction n1 -> bus -> n2.
    let o1 = Oriented::align(&l1, (n1, bus));
    let o2 = Oriented::align(&l2, (bus, n2));

    let t = network.t();
    let ub_path: Vec<f64> = (0..t).map(|i| f64::min(o1.ub[i], o2.ub[i])).collect();
    let lb_path: Vec<f64> = (0..t).map(|i| f64::max(o1.lb[i], o2.lb[i])).collect();
    let active_ub_path = o1.active_ub || o2.active_ub;
    let active_lb_path = o1.active_lb || o2.active_lb;
    let active_ub_pp_path: Vec<bool> = (0..t).map(|i| o1.active_ub_pp[i] || o2.active_ub_pp[i]).collect();
    let active_lb_pp_path: Vec<bool> = (0..t).map(|i| o1.active_lb_pp[i] || o2.active_lb_pp[i]).collect();

    let (from, to) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };
    let flip = (from, to) != (n1, n2);
    let (ub, lb, active_ub, active_lb, active_ub_pp, active_lb_pp) = if flip {
        (
            lb_path.iter().map(|v| -v).collect::<Vec<_>>(),
            ub_path.iter().map(|v| -v).collect::<Vec<_>>(),
            active_lb_path,
            active_ub_path,
            active_lb_pp_path,
            active_ub_pp_path,
        )
    } else {
        (ub_path, lb_path, active_ub_path, active_lb_path, active_ub_pp_path, active_lb_pp_path)
    };

    let merged = Line {
        from,
        to,
        reactance: l1.reactance + l2.reactance,
        resistance: l1.resistance + l2.resistance,
        shunt_conductance: l1.shunt_conductance + l2.shunt_conductance,
        shunt_susceptance: l1.shunt_susceptance + l2.shunt_susceptance,
        flow_ub: ub,
        flow_lb: lb,
        active_bounds: l1.active_bounds || l2.active_bounds,
        active_ub,
        active_lb,
        active_ub_per_period: active_ub_pp,
        active_lb_per_period: active_lb_pp,
    };

    if let Some(existing_id) = network.line_between(from, to)? {
        let existing = network.lines[&existing_id].clone();
        let combined = parallel::combine(&existing, &merged);
        network.lines.insert(existing_id, combined);
        network.delete_lines(&[lid1, lid2]);
    } else {
        network.delete_lines(&[lid1, lid2]);
        let reused_id = lid1;
        network.insert_line(reused_id, merged)?;
    }

    network.update_load_and_network(thermals, &[bus]);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineId;

    #[test]
    fn merges_series_reactance() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "a");
        net.add_bus(BusId::new(2), "b");
        net.add_bus(BusId::new(3), "c");
        net.ref_buses.clear();
        net.ref_buses.insert(BusId::new(1));
        net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1))
            .unwrap();
        net.insert_line(LineId::new(2), Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1))
            .unwrap();
        let mut thermals = ThermalFleet::new();

        assert!(eliminate(&mut net, &mut thermals, BusId::new(2)).unwrap());
        assert_eq!(net.lines.len(), 1);
        let merged = net.lines.values().next().unwrap();
        assert!((merged.reactance - 2.0).abs() < 1e-12);
        assert_eq!((merged.from, merged.to), (BusId::new(1), BusId::new(3)));
    }

    #[test]
    fn refuses_non_degree_two() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "a");
        net.add_bus(BusId::new(2), "b");
        net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1))
            .unwrap();
        let mut thermals = ThermalFleet::new();
        assert!(!eliminate(&mut net, &mut thermals, BusId::new(2)).unwrap());
    }
}
