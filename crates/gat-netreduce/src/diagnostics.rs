//! Standing invariant checker for the structural properties a reduced
//! network must still hold, built on `gat_core::diagnostics::Diagnostics`
//! the same way `gat_core::Network::validate_into` reports ingest issues.

use crate::model::{Network, ThermalFleet};
use gat_core::diagnostics::Diagnostics;

/// Check the structural properties of the current state of
/// `network`/`thermals`: line topology, bus indexing, thermal
/// participation references, and reference-bus presence. Does not check
/// electrical equivalence, idempotence, or the density-budget refusal
/// rule — those are properties of a *reduction pass*, not of a static
/// network, and are asserted directly in integration tests.
pub fn check_invariants(network: &Network, thermals: &ThermalFleet) -> Diagnostics {
    let mut diag = Diagnostics::new();

    // Every line's endpoints are distinct and surviving, reactance > 0.
    for (id, line) in &network.lines {
        let entity = format!("Line {id}");
        if line.from == line.to {
            diag.add_error_with_entity("topology", "line has equal endpoints", &entity);
        }
        if !network.bus_header.contains_key(&line.from) {
            diag.add_error_with_entity("topology", "line's from-bus does not survive", &entity);
        }
        if !network.bus_header.contains_key(&line.to) {
            diag.add_error_with_entity("topology", "line's to-bus does not survive", &entity);
        }
        if line.reactance <= 0.0 {
            diag.add_error_with_entity("physical", "line reactance is not strictly positive", &entity);
        }
    }

    // bus_header agrees with bus_id's position.
    for (i, bus) in network.bus_id.iter().enumerate() {
        let entity = format!("Bus {bus}");
        match network.bus_header.get(bus) {
            Some(&row) if row == i => {}
            Some(&row) => diag.add_error_with_entity(
                "reindex",
                &format!("bus_header row {row} disagrees with bus_id position {i}"),
                &entity,
            ),
            None => diag.add_error_with_entity("reindex", "bus missing from bus_header", &entity),
        }
    }

    // net_load has one row per surviving bus.
    if network.net_load.len() != network.bus_id.len() {
        diag.add_error(
            "reindex",
            &format!(
                "net_load has {} rows but {} buses survive",
                network.net_load.len(),
                network.bus_id.len()
            ),
        );
    }

    // Thermal participation only references surviving buses, with matching
    // key sets between bus[g] and bus_coeff[g].
    for g in &thermals.units {
        let entity = format!("Unit {g}");
        let buses = &thermals.bus[g];
        let coeffs = &thermals.bus_coeff[g];
        for b in buses {
            if !network.bus_header.contains_key(b) {
                diag.add_error_with_entity("reference", "unit participates at a deleted bus", &entity);
            }
            if !coeffs.contains_key(b) {
                diag.add_error_with_entity("reference", "unit's bus list and coefficient map disagree", &entity);
            }
        }
        if coeffs.len() != buses.len() {
            diag.add_error_with_entity("reference", "bus_coeff has entries not present in bus[g]", &entity);
        }
    }

    // ref_buses is a non-empty subset of bus_id when bus_id is non-empty.
    for rb in &network.ref_buses {
        if !network.bus_header.contains_key(rb) {
            diag.add_error_with_entity("reference", "reference bus does not survive", &format!("Bus {rb}"));
        }
    }
    if !network.bus_id.is_empty() && network.ref_buses.is_empty() {
        diag.add_error("reference", "non-empty network has no reference bus");
    }

    // Active-bound lines are never simply absent — callers comparing two
    // snapshots should use `active_line_count` below to confirm the count
    // only drops via the rules' own merges.
    diag
}

/// Count of lines with `active_bounds == true`, used by tests to assert
/// that this count only ever decreases monotonically across successive
/// driver iterations, never drops via a line simply vanishing.
pub fn active_line_count(network: &Network) -> usize {
    network.lines.values().filter(|l| l.active_bounds).count()
}
