//! Rule R3 — end-of-line bus with injection.
//!
//! Whether the tie line can be dropped silently or needs an artificial
//! security constraint hinges on whether the bus's injection range could
//! ever need more transfer capacity than the line has. With generation
//! dispatchable between 0 and its capacity, the tightest bound the line
//! must support at each period is `[net_load - max_gen, net_load]` — if
//! that interval sits inside the line's own bounds at every period, the
//! tie line can never bind and reduction is lossless.

use crate::ids::UnitId;
use crate::model::{Line, Network, ParticipantFactors, Participants, SecurityConstraint, ThermalFleet};
use crate::params::Params;
use std::collections::HashMap;
use std::rc::Rc;

/// Eliminate `bus` if it has degree exactly 1 and is not a reference bus.
pub fn eliminate(
    network: &mut Network,
    thermals: &mut ThermalFleet,
    params: &Params,
    bus: crate::ids::BusId,
) -> bool {
    if network.ref_buses.contains(&bus) {
        return false;
    }
    let incident = network.lines_incident(bus);
    if incident.len() != 1 {
        return false;
    }
    let lid = incident[0];
    let line = network.lines[&lid].clone();
    let neighbour = network.other_end(lid, bus).expect("incident line must touch bus");

    let threshold = params.unbounded_threshold();
    let bus_is_to = line.to == bus;
    let unconstrained = !line.active_bounds || line.is_unbounded(threshold);
    let needs_constraint = !unconstrained && !fits_without_constraint(network, thermals, bus, &line, bus_is_to);

    if needs_constraint {
        let participant_units: Vec<UnitId> = thermals.units_at(bus);
        let factors: HashMap<UnitId, f64> = participant_units
            .iter()
            .map(|&g| (g, thermals.bus_coeff[&g][&bus]))
            .collect();
        let participants = Rc::new(Participants { thermals: participant_units });
        let participant_factors = Rc::new(ParticipantFactors { thermals: factors });

        for t in 0..network.t() {
            let (ub, lb) = if bus_is_to {
                (-line.flow_lb[t], -line.flow_ub[t])
            } else {
                (line.flow_ub[t], line.flow_lb[t])
            };
            let name = format!("r3_bus{}_t{}", bus, t);
            let sc = SecurityConstraint {
                name: name.clone(),
                net_load: network.net_load_row(bus)[t],
                lb,
                ub,
                participants: Rc::clone(&participants),
                participants_factors: Rc::clone(&participant_factors),
            };
            network.sec_constrs[t].insert(name, sc);
        }
    }

    network.reassign_injections(thermals, bus, neighbour, 1.0);
    network.delete_lines(&[lid]);
    network.update_load_and_network(thermals, &[bus]);
    true
}

fn fits_without_constraint(
    network: &Network,
    thermals: &ThermalFleet,
    bus: crate::ids::BusId,
    line: &Line,
    bus_is_to: bool,
) -> bool {
    let max_gen = thermals.max_generation_at(bus);
    (0..network.t()).all(|t| {
        let net = network.net_load_row(bus)[t];
        let (ub, lb) = if bus_is_to {
            (-line.flow_lb[t], -line.flow_ub[t])
        } else {
            (line.flow_ub[t], line.flow_lb[t])
        };
        net <= ub && (net - max_gen) >= lb
    })
}
