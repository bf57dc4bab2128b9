//! Rule R4 — mid-point bus with injection.
//!
//! The merged line always reuses the binding incident line's id: whichever
//! of the two incident lines is the flow-limited one is always the one kept
//! in place, with the other folded into it.

use crate::error::ReductionResult;
use crate::ids::BusId;
use crate::model::{Line, Network, ThermalFleet};
use crate::parallel;

/// Eliminate `bus` if it is degree 2, carries no thermal unit, and exactly
/// one of its two incident lines is flow-limited. Returns `Ok(false)`
/// without mutating when any precondition fails — a refusal, not an error.
pub fn eliminate(network: &mut Network, thermals: &mut ThermalFleet, bus: BusId) -> ReductionResult<bool> {
    if network.ref_buses.contains(&bus) {
        return Ok(false);
    }
    if !thermals.units_at(bus).is_empty() {
        return Ok(false);
    }
    let incident = network.lines_incident(bus);
    if incident.len() != 2 {
        return Ok(false);
    }
    let (lid1, lid2) = (incident[0], incident[1]);
    let l1 = network.lines[&lid1].clone();
    let l2 = network.lines[&lid2].clone();

    let binding_count = l1.active_bounds as u8 + l2.active_bounds as u8;
    if binding_count != 1 {
        return Ok(false);
    }
    let (binding_id, binding, free_id, free) = if l1.active_bounds {
        (lid1, l1, lid2, l2)
    } else {
        (lid2, l2, lid1, l1)
    };

    let n_binding = network.other_end(binding_id, bus).expect("incident line must touch bus");
    let n_free = network.other_end(free_id, bus).expect("incident line must touch bus");
    let (c0, c1) = if n_binding <= n_free { (n_binding, n_free) } else { (n_free, n_binding) };

    let x1 = binding.reactance;
    let x2 = free.reactance;
    // Power-transfer factor onto the retained (binding) line; the bus's
    // injection is split `pf` to the binding line's neighbour and `1-pf`
    // to the free line's neighbour so the binding line's original flow is
    // exactly reproduced.
    let pf = -(1.0 / x1) / (1.0 / x1 + 1.0 / x2);
    let alpha_binding = pf;
    let alpha_free = 1.0 - pf;

    let t = network.t();
    let original_load: Vec<f64> = network.net_load_row(bus).to_vec();
    let addition_to_cap: Vec<f64> = original_load.iter().map(|&v| alpha_binding * v).collect();

    network.reassign_injections(thermals, bus, n_binding, alpha_binding);
    network.reassign_injections(thermals, bus, n_free, alpha_free);

    // `binding` only ever runs between `bus` and `n_binding`; "forward"
    // means its stored direction agrees with the canonical c0 -> c1 path
    // once `bus` is treated as a pass-through point on that path.
    let is_from_neighbour = binding.from == n_binding;
    let binding_forward = if n_binding == c0 { is_from_neighbour } else { !is_from_neighbour };
    let (ub, lb, active_ub, active_lb, active_ub_pp, active_lb_pp): (
        Vec<f64>,
        Vec<f64>,
        bool,
        bool,
        Vec<bool>,
        Vec<bool>,
    ) = if binding_forward {
        (
            (0..t).map(|i| binding.flow_ub[i] - addition_to_cap[i]).collect(),
            (0..t).map(|i| binding.flow_lb[i] - addition_to_cap[i]).collect(),
            binding.active_ub,
            binding.active_lb,
            binding.active_ub_per_period.clone(),
            binding.active_lb_per_period.clone(),
        )
    } else {
        (
            (0..t).map(|i| -binding.flow_lb[i] - addition_to_cap[i]).collect(),
            (0..t).map(|i| -binding.flow_ub[i] - addition_to_cap[i]).collect(),
            binding.active_lb,
            binding.active_ub,
            binding.active_lb_per_period.clone(),
            binding.active_ub_per_period.clone(),
        )
    };

    let merged = Line {
        from: c0,
        to: c1,
        reactance: x1 + x2,
        resistance: binding.resistance + free.resistance,
        shunt_conductance: binding.shunt_conductance + free.shunt_conductance,
        shunt_susceptance: binding.shunt_susceptance + free.shunt_susceptance,
        flow_ub: ub,
        flow_lb: lb,
        active_bounds: binding.active_bounds || free.active_bounds,
        active_ub,
        active_lb,
        active_ub_per_period: active_ub_pp,
        active_lb_per_period: active_lb_pp,
    };

    let existing = network.line_between(c0, c1)?;
    network.delete_lines(&[binding_id, free_id]);
    if let Some(existing_id) = existing {
        let existing_line = network.lines[&existing_id].clone();
        let combined = parallel::combine(&existing_line, &merged);
        network.lines.insert(existing_id, combined);
    } else {
        network.insert_line(binding_id, merged)?;
    }

    network.update_load_and_network(thermals, &[bus]);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineId;

    #[test]
    fn injection_split_reproduces_binding_line_flow() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "a");
        net.add_bus(BusId::new(2), "b");
        net.add_bus(BusId::new(3), "c");
        net.ref_buses.clear();
        net.ref_buses.insert(BusId::new(1));

        let mut ab = Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1);
        ab.active_bounds = true;
        net.insert_line(LineId::new(1), ab).unwrap();
        net.insert_line(LineId::new(2), Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1))
            .unwrap();
        net.set_net_load(BusId::new(2), vec![100.0]);

        let mut thermals = ThermalFleet::new();
        assert!(eliminate(&mut net, &mut thermals, BusId::new(2)).unwrap());

        assert_eq!(net.lines.len(), 1);
        let line = net.lines.values().next().unwrap();
        assert_eq!((line.from, line.to), (BusId::new(1), BusId::new(3)));
        assert!((line.reactance - 2.0).abs() < 1e-9);

        let load_a = net.net_load_row(BusId::new(1))[0];
        let load_c = net.net_load_row(BusId::new(3))[0];
        assert!((load_a - (-50.0)).abs() < 1e-6);
        assert!((load_c - 150.0).abs() < 1e-6);
    }

    #[test]
    fn refuses_when_both_lines_binding() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "a");
        net.add_bus(BusId::new(2), "b");
        net.add_bus(BusId::new(3), "c");
        net.ref_buses.clear();
        net.ref_buses.insert(BusId::new(1));
        let mut ab = Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1);
        ab.active_bounds = true;
        let mut bc = Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1);
        bc.active_bounds = true;
        net.insert_line(LineId::new(1), ab).unwrap();
        net.insert_line(LineId::new(2), bc).unwrap();
        let mut thermals = ThermalFleet::new();
        assert!(!eliminate(&mut net, &mut thermals, BusId::new(2)).unwrap());
    }
}
