//! End-to-end scenarios driven entirely through the public API, one per
//! concrete case the reduction rules are meant to cover.

use gat_netreduce::{
    diagnostics::check_invariants, reduce_network, BusId, Line, LineId, NetworkModel, Params,
    ThermalFleet, UnitId,
};
use gat_netreduce::Network;

fn params_allowing(max_connections: usize) -> Params {
    let mut p = Params::default();
    p.max_number_of_connections = max_connections;
    p
}

#[test]
fn chain_with_no_injection_collapses_to_a_single_line() {
    // Load at both ends keeps buses 1 and 4 out of the no-injection pool,
    // so only the genuinely empty interior (buses 2, 3) reduces via R2 —
    // otherwise bus 1 (degree 1, no injection) would be swallowed by R1
    // first, cascading the whole chain away instead of merging it.
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "a");
    net.add_bus(BusId::new(2), "b");
    net.add_bus(BusId::new(3), "c");
    net.add_bus(BusId::new(4), "d");
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(1));
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(2), Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(3), Line::unbounded(BusId::new(3), BusId::new(4), 1.0, 1)).unwrap();
    net.set_net_load(BusId::new(1), vec![-75.0]);
    net.set_net_load(BusId::new(4), vec![75.0]);
    let mut thermals = ThermalFleet::new();
    let params = params_allowing(2);

    let report = reduce_network(&params, &mut thermals, &mut net).unwrap();

    assert_eq!(net.bus_id.len(), 2);
    assert_eq!(net.lines.len(), 1);
    let line = net.lines.values().next().unwrap();
    assert!((line.reactance - 3.0).abs() < 1e-9);
    assert!(report.r2_removed >= 1);
    assert!(!check_invariants(&net, &thermals).has_errors());
}

#[test]
fn end_of_line_generator_moves_onto_its_neighbour() {
    // A bare two-bus tie line has no cycle to preserve once the generator
    // bus is folded away, so this exercises
    // `r3_end_of_line_injection::eliminate` directly rather than through
    // the full driver: running the whole network through `reduce_network`
    // would legitimately empty every line and trip the fatal "switch to
    // SINGLE_BUS" error, since a pure radial tree has nothing left to flow
    // through once fully reduced.
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "hub");
    net.add_bus(BusId::new(2), "gen_bus");
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(1));
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    net.set_net_load(BusId::new(1), vec![-80.0]);

    let mut thermals = ThermalFleet::new();
    thermals.add_unit(UnitId::new(1), "g1", 80.0);
    thermals.add_participation(UnitId::new(1), BusId::new(2), 1.0);

    let params = params_allowing(2);
    let ok = gat_netreduce::rules::r3_end_of_line_injection::eliminate(
        &mut net, &mut thermals, &params, BusId::new(2),
    );

    assert!(ok);
    assert_eq!(net.bus_id, vec![BusId::new(1)]);
    assert!(net.sec_constrs.iter().all(|m| m.is_empty()));
    assert_eq!(thermals.units_at(BusId::new(1)), vec![UnitId::new(1)]);
}

// The two tests below exercise `kron::eliminate_bus` directly rather than
// through the full driver: a bare star of leaf spokes never reaches R5
// through `reduce_network`, since R1 prunes degree-1 spokes (no injection)
// to a fixed point before R5 ever runs in the same iteration. Calling R5
// directly isolates the Kron rule's own behaviour on a hub, independent of
// what upstream pruning would otherwise have done to the spokes first.
#[test]
fn star_of_three_collapses_into_a_triangle_via_kron() {
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "centre");
    net.add_bus(BusId::new(2), "n1");
    net.add_bus(BusId::new(3), "n2");
    net.add_bus(BusId::new(4), "n3");
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(2));
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(2), Line::unbounded(BusId::new(1), BusId::new(3), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(3), Line::unbounded(BusId::new(1), BusId::new(4), 1.0, 1)).unwrap();

    let mut thermals = ThermalFleet::new();
    let ok = gat_netreduce::kron::eliminate_bus(&mut net, &mut thermals, BusId::new(1)).unwrap();

    assert!(ok);
    assert!(!net.bus_id.contains(&BusId::new(1)));
    assert_eq!(net.lines.len(), 3);
    assert!(!check_invariants(&net, &thermals).has_errors());
}

#[test]
fn dense_hub_above_the_density_budget_is_refused() {
    // Six spokes into a bare hub: 15 fresh edges would be needed and the
    // hub's degree exceeds the fixed refusal threshold, so R5 must decline
    // regardless of the caller's own degree policy.
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "hub");
    for i in 2..=7u64 {
        net.add_bus(BusId::new(i), &format!("spoke{i}"));
    }
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(2));
    for (lid, i) in (2..=7u64).enumerate() {
        net.insert_line(LineId::new(lid as u64 + 1), Line::unbounded(BusId::new(1), BusId::new(i), 1.0, 1))
            .unwrap();
    }

    let mut thermals = ThermalFleet::new();
    let ok = gat_netreduce::kron::eliminate_bus(&mut net, &mut thermals, BusId::new(1)).unwrap();

    assert!(!ok);
    assert!(net.bus_id.contains(&BusId::new(1)));
    assert_eq!(net.lines.len(), 6);
}

#[test]
fn reduction_that_would_empty_the_network_is_a_fatal_error() {
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "a");
    net.add_bus(BusId::new(2), "b");
    net.add_bus(BusId::new(3), "c");
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(1));
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(2), Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1)).unwrap();
    net.set_net_load(BusId::new(3), vec![25.0]);

    let mut thermals = ThermalFleet::new();
    let params = params_allowing(2);
    let result = reduce_network(&params, &mut thermals, &mut net);
    assert!(result.is_err());
}

#[test]
fn single_bus_input_is_a_clean_no_op() {
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "only");
    let mut thermals = ThermalFleet::new();
    let params = params_allowing(2);
    let report = reduce_network(&params, &mut thermals, &mut net).unwrap();
    assert_eq!(report.total_removed(), 0);
}

#[test]
fn disabling_reduction_for_single_bus_models_is_a_no_op() {
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "a");
    net.add_bus(BusId::new(2), "b");
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    let mut thermals = ThermalFleet::new();
    let mut params = params_allowing(2);
    params.network_model = NetworkModel::SingleBus;
    let report = reduce_network(&params, &mut thermals, &mut net).unwrap();
    assert_eq!(report.total_removed(), 0);
    assert_eq!(net.lines.len(), 1);
}

#[test]
fn a_second_reduction_pass_is_idempotent() {
    // Load at both ends keeps buses 1 and 3 out of the no-injection
    // candidate pool, so the chain merges via R2 instead of R1 cascading
    // every bus away and leaving nothing for a second pass to act on.
    let mut net = Network::new(1);
    net.add_bus(BusId::new(1), "a");
    net.add_bus(BusId::new(2), "b");
    net.add_bus(BusId::new(3), "c");
    net.ref_buses.clear();
    net.ref_buses.insert(BusId::new(1));
    net.insert_line(LineId::new(1), Line::unbounded(BusId::new(1), BusId::new(2), 1.0, 1)).unwrap();
    net.insert_line(LineId::new(2), Line::unbounded(BusId::new(2), BusId::new(3), 1.0, 1)).unwrap();
    net.set_net_load(BusId::new(1), vec![-30.0]);
    net.set_net_load(BusId::new(3), vec![30.0]);
    let mut thermals = ThermalFleet::new();
    let params = params_allowing(2);

    reduce_network(&params, &mut thermals, &mut net).unwrap();
    let before = (net.bus_id.len(), net.lines.len());
    let second = reduce_network(&params, &mut thermals, &mut net).unwrap();
    assert_eq!(second.total_removed(), 0);
    assert_eq!((net.bus_id.len(), net.lines.len()), before);
}
