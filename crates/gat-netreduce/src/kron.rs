//! General n-connection Kron eliminator — rule R5.
//!
//! Eliminating one bus at a time means the local susceptance matrix's
//! `B_ee` block is always a 1×1 scalar, so the Schur complement collapses
//! to the classic star-to-mesh transform: no general matrix inverse is
//! needed, only a sum and a handful of divisions.

use crate::error::ReductionResult;
use crate::ids::BusId;
use crate::model::{Line, Network, ThermalFleet};
use crate::parallel;
use std::collections::HashMap;

/// Attempt to eliminate `bus` via the general Kron rule.
///
/// Returns `Ok(true)` if the bus was eliminated, `Ok(false)` if the
/// density-budget refusal rule declined — a refusal is not an error. The
/// caller (the driver) is responsible for only invoking this on buses
/// within its configured degree policy.
pub fn eliminate_bus(network: &mut Network, thermals: &mut ThermalFleet, bus: BusId) -> ReductionResult<bool> {
    let incident = network.lines_incident(bus);
    if incident.is_empty() {
        return Ok(false);
    }
    // A Kron-synthesized edge between two neighbours that didn't already
    // have a line starts life with `active_bounds = false` — it does not
    // inherit a predecessor's flag the way a merge does. Eliminating a bus
    // with any active-bound incident line would silently drop that flag,
    // so such buses are refused here.
    if incident.iter().any(|&lid| network.lines[&lid].active_bounds) {
        return Ok(false);
    }

    // y[n] = aggregate susceptance of every line directly between `bus`
    // and neighbour `n` (parallels folded in by summing 1/x, matching
    // parallel::combine's reactance formula).
    let mut y: HashMap<BusId, f64> = HashMap::new();
    for &lid in &incident {
        let l = &network.lines[&lid];
        let n = network.other_end(lid, bus).expect("incident line must touch bus");
        *y.entry(n).or_insert(0.0) += 1.0 / l.reactance;
    }

    let mut neighbours: Vec<BusId> = y.keys().copied().collect();
    neighbours.sort();
    let k = neighbours.len();

    let mut existing_pairs = 0;
    for i in 0..k {
        for j in (i + 1)..k {
            if network.line_between(neighbours[i], neighbours[j])?.is_some() {
                existing_pairs += 1;
            }
        }
    }
    let fresh_edges = k * k.saturating_sub(1) / 2 - existing_pairs;
    let degree = network.degree(bus);
    // Refusal rule: only densify the graph when at most one fresh edge
    // would result, unless the bus is sparse enough (≤ 5 incident lines)
    // that densifying it is cheap regardless.
    if fresh_edges > 1 && degree > 5 {
        return Ok(false);
    }

    let b_ee: f64 = y.values().sum();
    let t = network.t();

    let alpha: HashMap<BusId, f64> = neighbours.iter().map(|&n| (n, y[&n] / b_ee)).collect();

    for i in 0..k {
        for j in (i + 1)..k {
            let (ni, nj) = (neighbours[i], neighbours[j]);
            let b_ff_ij = -y[&ni] * y[&nj] / b_ee;
            let x_new = -1.0 / b_ff_ij;
            let fresh = Line::unbounded(ni, nj, x_new, t);
            if let Some(existing_id) = network.line_between(ni, nj)? {
                let existing = network.lines[&existing_id].clone();
                let combined = parallel::combine(&existing, &fresh);
                network.lines.insert(existing_id, combined);
            } else {
                let id = network.next_line_id();
                network.insert_line(id, fresh)?;
            }
        }
    }

    for (&n, &a) in &alpha {
        network.reassign_injections(thermals, bus, n, a);
    }

    network.delete_lines(&incident);
    network.update_load_and_network(thermals, &[bus]);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineId;

    fn star_network() -> (Network, ThermalFleet) {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "centre");
        net.add_bus(BusId::new(2), "n1");
        net.add_bus(BusId::new(3), "n2");
        net.add_bus(BusId::new(4), "n3");
        net.ref_buses.clear();
        net.ref_buses.insert(BusId::new(2));
        for (id, to, x) in [(1u64, 2u64, 1.0), (2, 3, 1.0), (3, 4, 1.0)] {
            net.insert_line(
                LineId::new(id),
                Line::unbounded(BusId::new(1), BusId::new(to), x, 1),
            )
            .unwrap();
        }
        (net, ThermalFleet::new())
    }

    #[test]
    fn star_collapses_into_triangle() {
        let (mut net, mut thermals) = star_network();
        let ok = eliminate_bus(&mut net, &mut thermals, BusId::new(1)).unwrap();
        assert!(ok);
        assert!(!net.bus_id.contains(&BusId::new(1)));
        // 3 neighbours -> 3 fresh edges (a triangle)
        assert_eq!(net.lines.len(), 3);
        for l in net.lines.values() {
            assert!((l.reactance - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ref_bus_is_reassigned_when_centre_was_reference() {
        let (mut net, mut thermals) = star_network();
        net.ref_buses.clear();
        net.ref_buses.insert(BusId::new(1));
        eliminate_bus(&mut net, &mut thermals, BusId::new(1)).unwrap();
        assert!(!net.ref_buses.contains(&BusId::new(1)));
        assert!(!net.ref_buses.is_empty());
    }
}
