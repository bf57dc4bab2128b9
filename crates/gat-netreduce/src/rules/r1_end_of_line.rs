//! Rule R1 — end-of-line bus with no injection.

use crate::ids::BusId;
use crate::model::{Network, ThermalFleet};

/// Eliminate `bus` if it has degree ≤ 1. The caller is responsible for
/// having already excluded generator/load/renewable buses from the
/// candidate set.
pub fn eliminate(network: &mut Network, thermals: &mut ThermalFleet, bus: BusId) -> bool {
    if network.degree(bus) > 1 {
        return false;
    }
    // Never eliminate the last bus standing — an isolated degree-0 bus is
    // only a candidate once something else remains to hold the system.
    if network.bus_id.len() <= 1 {
        return false;
    }

    let incident = network.lines_incident(bus);
    if let Some(&lid) = incident.first() {
        let neighbour = network
            .other_end(lid, bus)
            .expect("incident line must touch bus");
        network.replace_ref_bus(bus, neighbour);
        network.delete_lines(&[lid]);
    }
    network.update_load_and_network(thermals, &[bus]);
    true
}
