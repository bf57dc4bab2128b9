//! The fixed-point reduction loop.

use crate::error::{ReductionError, ReductionResult};
use crate::ids::BusId;
use crate::kron;
use crate::model::{Network, ThermalFleet};
use crate::params::Params;
use crate::rules::{r1_end_of_line, r2_mid_point, r3_end_of_line_injection, r4_mid_point_injection};

const MAX_IT: usize = 20;
const MAX_R3_IT: usize = 20;
const MAX_R4_IT: usize = 10;

/// Per-rule bus removal counts and iteration count for one `reduce_network`
/// call, returned to the caller instead of only being logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionReport {
    pub iterations: usize,
    pub r1_removed: usize,
    pub r2_removed: usize,
    pub r3_removed: usize,
    pub r4_removed: usize,
    pub r5_removed: usize,
}

impl ReductionReport {
    pub fn total_removed(&self) -> usize {
        self.r1_removed + self.r2_removed + self.r3_removed + self.r4_removed + self.r5_removed
    }
}

fn has_load(network: &Network, bus: BusId) -> bool {
    network.net_load_row(bus).iter().any(|&v| v.abs() > 0.0)
}

/// Buses carrying neither thermal generation nor net load — the candidate
/// pool for the no-injection rules R1/R2/R5, ascending by id for the
/// deterministic tie-break.
fn no_injection_candidates(network: &Network, thermals: &ThermalFleet) -> Vec<BusId> {
    let gen_buses = thermals.gen_buses();
    let mut candidates: Vec<BusId> = network
        .bus_id
        .iter()
        .copied()
        .filter(|&b| !gen_buses.contains(&b) && !has_load(network, b))
        .collect();
    candidates.sort();
    candidates
}

/// Run the reduction engine to a fixed point. No-op (and zero-cost) if
/// `params` disables reduction for the configured network model.
pub fn reduce_network(
    params: &Params,
    thermals: &mut ThermalFleet,
    network: &mut Network,
) -> ReductionResult<ReductionReport> {
    let mut report = ReductionReport::default();
    if !params.should_reduce() {
        return Ok(report);
    }
    let had_lines = !network.lines.is_empty();

    for _ in 0..MAX_IT {
        report.iterations += 1;
        let n_before = network.bus_id.len();

        if params.max_number_of_connections >= 1 {
            for b in no_injection_candidates(network, thermals) {
                if !network.bus_header.contains_key(&b) {
                    continue;
                }
                if network.degree(b) <= 1 && r1_end_of_line::eliminate(network, thermals, b) {
                    report.r1_removed += 1;
                }
            }
        }

        if params.max_number_of_connections >= 2 {
            for b in no_injection_candidates(network, thermals) {
                if !network.bus_header.contains_key(&b) {
                    continue;
                }
                if network.degree(b) == 2 && r2_mid_point::eliminate(network, thermals, b)? {
                    report.r2_removed += 1;
                }
            }
        }

        if params.max_number_of_connections >= 1 {
            for _ in 0..MAX_R3_IT {
                let candidates: Vec<BusId> = network
                    .bus_id
                    .iter()
                    .copied()
                    .filter(|&b| !network.ref_buses.contains(&b) && network.degree(b) == 1)
                    .collect();
                if candidates.is_empty() {
                    break;
                }
                let mut any = false;
                for b in candidates {
                    if !network.bus_header.contains_key(&b) {
                        continue;
                    }
                    if network.degree(b) == 1 && r3_end_of_line_injection::eliminate(network, thermals, params, b) {
                        report.r3_removed += 1;
                        any = true;
                    }
                }
                if !any {
                    break;
                }
            }
        }

        if params.max_number_of_connections >= 2 {
            for _ in 0..MAX_R4_IT {
                let candidates: Vec<BusId> = network
                    .bus_id
                    .iter()
                    .copied()
                    .filter(|&b| {
                        !network.ref_buses.contains(&b)
                            && network.degree(b) == 2
                            && thermals.units_at(b).is_empty()
                    })
                    .collect();
                if candidates.is_empty() {
                    break;
                }
                let mut any = false;
                for b in candidates {
                    if !network.bus_header.contains_key(&b) {
                        continue;
                    }
                    if network.degree(b) == 2 && r4_mid_point_injection::eliminate(network, thermals, b)? {
                        report.r4_removed += 1;
                        any = true;
                    }
                }
                if !any {
                    break;
                }
            }
        }

        if params.max_number_of_connections >= 1 {
            let mut candidates: Vec<(usize, BusId)> = network
                .bus_id
                .iter()
                .copied()
                .map(|b| (network.degree(b), b))
                .filter(|&(deg, _)| deg >= 3 && deg <= params.max_number_of_connections)
                .collect();
            candidates.sort();
            for (_, b) in candidates {
                if !network.bus_header.contains_key(&b) {
                    continue;
                }
                if kron::eliminate_bus(network, thermals, b)? {
                    report.r5_removed += 1;
                }
            }
        }

        if network.bus_id.len() == n_before {
            break;
        }
    }

    // A network that already had no lines (a true single-bus/SINGLE_BUS-style
    // input) is a legitimate no-op. A network that *had* lines and the
    // reduction passes eliminated every one of them is not a usable
    // B_THETA/FLUXES/PTDF result even if exactly one bus happens to remain —
    // that is a fatal error, not a successful trivial reduction.
    if had_lines && network.lines.is_empty() {
        return Err(ReductionError::EmptyNetwork);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineId;
    use crate::model::Line;
    use crate::params::NetworkModel;

    #[test]
    fn chain_collapses_to_single_line() {
        // Load at both ends keeps buses 1 and 3 out of the no-injection
        // candidate pool, so only the genuinely empty mid-point bus 2 is
        // eligible for R1/R2 — otherwise bus 1 (degree 1) would itself be
        // swallowed by R1 first, cascading the whole chain away.
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
        net.set_net_load(BusId::new(1), vec![-50.0]);
        net.set_net_load(BusId::new(3), vec![50.0]);
        let mut thermals = ThermalFleet::new();
        let params = Params::default();

        let report = reduce_network(&params, &mut thermals, &mut net).unwrap();
        assert_eq!(net.bus_id.len(), 2);
        assert_eq!(net.lines.len(), 1);
        assert_eq!(report.r2_removed, 1);
    }

    #[test]
    fn single_bus_is_a_no_op() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "only");
        let mut thermals = ThermalFleet::new();
        let params = Params::default();
        let report = reduce_network(&params, &mut thermals, &mut net).unwrap();
        assert_eq!(report.total_removed(), 0);
        assert_eq!(net.bus_id.len(), 1);
    }

    #[test]
    fn disabled_or_single_bus_model_is_a_no_op() {
        let mut net = Network::new(1);
        net.add_bus(BusId::new(1), "a");
        net.add_bus(BusId::new(2), "b");
        net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1))
            .unwrap();
        let mut thermals = ThermalFleet::new();
        let mut params = Params::default();
        params.network_model = NetworkModel::SingleBus;
        let report = reduce_network(&params, &mut thermals, &mut net).unwrap();
        assert_eq!(report.total_removed(), 0);
    }

    #[test]
    fn radial_tree_with_one_load_leaf_empties_and_errors() {
        // A pure chain with load only at the far leaf: R1 eats the ref bus,
        // promotes its neighbour, then eats that too, leaving one bus and
        // zero lines — a fatal EmptyNetwork, not a silent single-bus result.
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
        net.set_net_load(BusId::new(3), vec![10.0]);
        let mut thermals = ThermalFleet::new();
        let params = Params::default();

        let err = reduce_network(&params, &mut thermals, &mut net).unwrap_err();
        assert!(matches!(err, ReductionError::EmptyNetwork));
    }

    #[test]
    fn idempotent_second_call_removes_nothing() {
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
        net.set_net_load(BusId::new(1), vec![-50.0]);
        net.set_net_load(BusId::new(3), vec![50.0]);
        let mut thermals = ThermalFleet::new();
        let params = Params::default();

        reduce_network(&params, &mut thermals, &mut net).unwrap();
        let second = reduce_network(&params, &mut thermals, &mut net).unwrap();
        assert_eq!(second.total_removed(), 0);
    }
}
