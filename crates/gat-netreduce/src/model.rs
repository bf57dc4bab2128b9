//! The reduction-engine data model: `Network` and `ThermalFleet`,
//! plus every mutating primitive the reduction rules are built from.
//!
//! Fields are `pub`, following `gat_core::Network`'s own `pub graph` — this
//! crate is a single-owner working structure mutated exclusively by the
//! engine for the duration of one reduction pass; there is no internal
//! locking discipline to hide behind accessors.

use crate::error::{ReductionError, ReductionResult};
use crate::ids::{BusId, LineId, UnitId};
use crate::params::MAX_FLOW;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A single transmission line.
#[derive(Debug, Clone)]
pub struct Line {
    pub from: BusId,
    pub to: BusId,
    pub reactance: f64,
    pub resistance: f64,
    pub shunt_conductance: f64,
    pub shunt_susceptance: f64,
    /// Per-period upper flow bound, sign convention: positive = from→to.
    pub flow_ub: Vec<f64>,
    /// Per-period lower flow bound (≤ 0 in the from→to convention).
    pub flow_lb: Vec<f64>,
    /// Whether this line's flow limit may bind (set by upstream redundancy
    /// analysis, preserved/combined by reduction). A bus with any incident
    /// line carrying this flag is never eliminated.
    pub active_bounds: bool,
    pub active_ub: bool,
    pub active_lb: bool,
    pub active_ub_per_period: Vec<bool>,
    pub active_lb_per_period: Vec<bool>,
}

impl Line {
    /// A line with no electrical R/shunt parameters and unbounded flow,
    /// the shape every Kron-synthesized or merged line starts from: new
    /// lines carry zero resistance/shunt and flow limits of ±MAX_FLOW.
    pub fn unbounded(from: BusId, to: BusId, reactance: f64, t: usize) -> Self {
        Self {
            from,
            to,
            reactance,
            resistance: 0.0,
            shunt_conductance: 0.0,
            shunt_susceptance: 0.0,
            flow_ub: vec![MAX_FLOW; t],
            flow_lb: vec![-MAX_FLOW; t],
            active_bounds: false,
            active_ub: false,
            active_lb: false,
            active_ub_per_period: vec![false; t],
            active_lb_per_period: vec![false; t],
        }
    }

    /// Whether this line's bounds meet the "unbounded-equivalent" threshold
    /// at every period.
    pub fn is_unbounded(&self, threshold: f64) -> bool {
        self.flow_ub.iter().all(|&ub| ub >= threshold)
            && self.flow_lb.iter().all(|&lb| lb <= -threshold)
    }

    pub fn max_ub(&self) -> f64 {
        self.flow_ub.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_ub(&self) -> f64 {
        self.flow_ub.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_lb(&self) -> f64 {
        self.flow_lb.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_lb(&self) -> f64 {
        self.flow_lb.iter().cloned().fold(f64::INFINITY, f64::min)
    }
}

/// The set of resources a synthesized security constraint binds.
#[derive(Debug, Clone, Default)]
pub struct Participants {
    pub thermals: Vec<UnitId>,
}

#[derive(Debug, Clone, Default)]
pub struct ParticipantFactors {
    pub thermals: HashMap<UnitId, f64>,
}

/// An artificial security constraint synthesized by R3 when an end-of-line
/// bus with a binding tie line is eliminated.
#[derive(Debug, Clone)]
pub struct SecurityConstraint {
    pub name: String,
    pub net_load: f64,
    pub lb: f64,
    pub ub: f64,
    pub participants: Rc<Participants>,
    pub participants_factors: Rc<ParticipantFactors>,
}

/// DC-linearized transmission network: buses, lines, per-period net load,
/// and the synthesized security constraints reduction may add.
#[derive(Debug, Default)]
pub struct Network {
    pub bus_id: Vec<BusId>,
    pub bus_header: HashMap<BusId, usize>,
    pub ref_buses: HashSet<BusId>,
    pub bus_name: HashMap<BusId, String>,
    pub lines: HashMap<LineId, Line>,
    pub lines_from_bus: HashMap<BusId, Vec<LineId>>,
    pub lines_to_bus: HashMap<BusId, Vec<LineId>>,
    /// Dense net load, `net_load[bus_header[b]][t]`. Positive = withdrawal.
    pub net_load: Vec<Vec<f64>>,
    /// Time-indexed artificial security constraints, keyed by a synthetic id.
    pub sec_constrs: Vec<HashMap<String, SecurityConstraint>>,
}

impl Network {
    pub fn new(t: usize) -> Self {
        Self {
            bus_id: Vec::new(),
            bus_header: HashMap::new(),
            ref_buses: HashSet::new(),
            bus_name: HashMap::new(),
            lines: HashMap::new(),
            lines_from_bus: HashMap::new(),
            lines_to_bus: HashMap::new(),
            net_load: Vec::new(),
            sec_constrs: vec![HashMap::new(); t],
        }
    }

    pub fn t(&self) -> usize {
        self.sec_constrs.len()
    }

    /// Add a bus with a zeroed net-load row. The first bus added becomes
    /// the reference bus if none exists yet.
    pub fn add_bus(&mut self, id: BusId, name: impl Into<String>) {
        let row = self.bus_id.len();
        self.bus_id.push(id);
        self.bus_header.insert(id, row);
        self.bus_name.insert(id, name.into());
        self.net_load.push(vec![0.0; self.t()]);
        self.lines_from_bus.entry(id).or_default();
        self.lines_to_bus.entry(id).or_default();
        if self.ref_buses.is_empty() {
            self.ref_buses.insert(id);
        }
    }

    pub fn set_net_load(&mut self, bus: BusId, values: Vec<f64>) {
        let row = self.bus_header[&bus];
        self.net_load[row] = values;
    }

    /// Allocate the next free line id: `max(existing id) + 1`.
    pub fn next_line_id(&self) -> LineId {
        LineId::new(self.lines.keys().map(|l| l.value()).max().unwrap_or(0) + 1)
    }

    /// Insert a new line and wire up its adjacency. Caller is responsible
    /// for ensuring the endpoints survive; equal endpoints are rejected
    /// here rather than only in debug builds, since a violation reveals a
    /// prior bug upstream in a reduction rule and must not reach the
    /// network even in release.
    pub fn insert_line(&mut self, id: LineId, line: Line) -> ReductionResult<()> {
        if line.from == line.to {
            return Err(ReductionError::DegenerateEndpoints { line: id, bus: line.from });
        }
        debug_assert!(line.reactance > 0.0, "line {id} has non-positive reactance");
        self.lines_from_bus.entry(line.from).or_default().push(id);
        self.lines_to_bus.entry(line.to).or_default().push(id);
        self.lines.insert(id, line);
        Ok(())
    }

    /// Remove a set of lines and their adjacency-map entries.
    pub fn delete_lines(&mut self, ids: &[LineId]) {
        for id in ids {
            if let Some(line) = self.lines.remove(id) {
                if let Some(v) = self.lines_from_bus.get_mut(&line.from) {
                    v.retain(|l| l != id);
                }
                if let Some(v) = self.lines_to_bus.get_mut(&line.to) {
                    v.retain(|l| l != id);
                }
            }
        }
    }

    /// Lines incident to `bus`, as-from followed by as-to.
    pub fn lines_incident(&self, bus: BusId) -> Vec<LineId> {
        let mut v = self.lines_from_bus.get(&bus).cloned().unwrap_or_default();
        v.extend(self.lines_to_bus.get(&bus).cloned().unwrap_or_default());
        v
    }

    pub fn degree(&self, bus: BusId) -> usize {
        self.lines_from_bus.get(&bus).map_or(0, Vec::len)
            + self.lines_to_bus.get(&bus).map_or(0, Vec::len)
    }

    /// The other endpoint of `line`, relative to `bus`.
    pub fn other_end(&self, line: LineId, bus: BusId) -> Option<BusId> {
        let l = self.lines.get(&line)?;
        if l.from == bus {
            Some(l.to)
        } else if l.to == bus {
            Some(l.from)
        } else {
            None
        }
    }

    /// Existing line directly connecting `a` and `b`, in either direction.
    /// At most one is expected; more than one is a topology violation.
    pub fn line_between(&self, a: BusId, b: BusId) -> ReductionResult<Option<LineId>> {
        let mut matches = self
            .lines
            .iter()
            .filter(|(_, l)| (l.from == a && l.to == b) || (l.from == b && l.to == a))
            .map(|(id, _)| *id);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(ReductionError::TopologyViolation { from: a, to: b });
        }
        Ok(first)
    }

    pub fn net_load_row(&self, bus: BusId) -> &[f64] {
        &self.net_load[self.bus_header[&bus]]
    }

    fn net_load_row_mut(&mut self, bus: BusId) -> &mut Vec<f64> {
        let row = self.bus_header[&bus];
        &mut self.net_load[row]
    }

    /// Move `bus`'s net load and thermal participation to `new_bus` scaled
    /// by `coeff`. Does not remove `bus`
    /// itself; callers purge deleted buses via `update_load_and_network`.
    pub fn reassign_injections(
        &mut self,
        thermals: &mut ThermalFleet,
        bus: BusId,
        new_bus: BusId,
        coeff: f64,
    ) {
        let has_load = self.net_load_row(bus).iter().any(|&v| v.abs() > 0.0);
        if has_load {
            let moved: Vec<f64> = self.net_load_row(bus).iter().map(|&v| coeff * v).collect();
            let dst = self.net_load_row_mut(new_bus);
            for (d, m) in dst.iter_mut().zip(moved.iter()) {
                *d += m;
            }
        }
        thermals.reassign(bus, new_bus, coeff);
    }

    /// Canonical post-deletion reindex : row-purge `net_load`,
    /// drop `bus_name`/`bus_id` entries, re-elect reference buses, scrub
    /// the thermal participation map, and recompute `bus_header`.
    pub fn update_load_and_network(&mut self, thermals: &mut ThermalFleet, deleted: &[BusId]) {
        if deleted.is_empty() {
            return;
        }
        let deleted_set: HashSet<BusId> = deleted.iter().copied().collect();

        let keep_rows: Vec<usize> = self
            .bus_id
            .iter()
            .enumerate()
            .filter(|(_, b)| !deleted_set.contains(b))
            .map(|(i, _)| i)
            .collect();
        self.net_load = keep_rows.into_iter().map(|i| self.net_load[i].clone()).collect();

        self.bus_id.retain(|b| !deleted_set.contains(b));
        for b in deleted {
            self.bus_name.remove(b);
            self.lines_from_bus.remove(b);
            self.lines_to_bus.remove(b);
        }

        for b in deleted {
            if self.ref_buses.remove(b) {
                if let Some(&promoted) = self.bus_id.iter().find(|b2| !self.ref_buses.contains(b2))
                {
                    self.ref_buses.insert(promoted);
                }
            }
        }

        thermals.scrub_buses(&deleted_set);

        self.bus_header = self
            .bus_id
            .iter()
            .enumerate()
            .map(|(i, &b)| (b, i))
            .collect();
    }

    /// Promote a replacement reference bus in place of `old`, used by rules
    /// that eliminate a bus directly (outside `update_load_and_network`'s
    /// bulk path) and must keep at least one reference bus present at every
    /// intermediate step.
    pub fn replace_ref_bus(&mut self, old: BusId, new: BusId) {
        if self.ref_buses.remove(&old) {
            self.ref_buses.insert(new);
        }
    }
}

/// Controllable thermal generating units and their bus participation.
/// A unit may inject at several buses with coefficients that sum to 1
/// before reduction (and may not, after).
#[derive(Debug, Default)]
pub struct ThermalFleet {
    pub units: Vec<UnitId>,
    pub bus: HashMap<UnitId, Vec<BusId>>,
    pub bus_coeff: HashMap<UnitId, HashMap<BusId, f64>>,
    pub max_p: HashMap<UnitId, f64>,
    pub unit_name: HashMap<UnitId, String>,
}

impl ThermalFleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, id: UnitId, name: impl Into<String>, max_p: f64) {
        self.units.push(id);
        self.unit_name.insert(id, name.into());
        self.max_p.insert(id, max_p);
        self.bus.insert(id, Vec::new());
        self.bus_coeff.insert(id, HashMap::new());
    }

    pub fn add_participation(&mut self, unit: UnitId, bus: BusId, coeff: f64) {
        self.bus.entry(unit).or_default().push(bus);
        self.bus_coeff.entry(unit).or_default().insert(bus, coeff);
    }

    /// Units with any participation at `bus`.
    pub fn units_at(&self, bus: BusId) -> Vec<UnitId> {
        self.units
            .iter()
            .copied()
            .filter(|g| self.bus[g].contains(&bus))
            .collect()
    }

    /// All buses hosting at least one thermal unit.
    pub fn gen_buses(&self) -> HashSet<BusId> {
        self.bus.values().flatten().copied().collect()
    }

    /// Worst-case (sum of max_p-weighted) generation capacity at `bus`.
    pub fn max_generation_at(&self, bus: BusId) -> f64 {
        self.units_at(bus)
            .into_iter()
            .map(|g| self.bus_coeff[&g][&bus] * self.max_p[&g])
            .sum()
    }

    /// Move `bus`'s participation to `new_bus`, scaled by `coeff`: every
    /// unit participating at `bus` gains/extends a participation at
    /// `new_bus`.
    fn reassign(&mut self, bus: BusId, new_bus: BusId, coeff: f64) {
        for g in self.units_at(bus) {
            let old_coeff = self.bus_coeff[&g][&bus];
            let added = coeff * old_coeff;
            let coeffs = self.bus_coeff.get_mut(&g).unwrap();
            if let Some(existing) = coeffs.get_mut(&new_bus) {
                *existing += added;
            } else {
                coeffs.insert(new_bus, added);
                self.bus.get_mut(&g).unwrap().push(new_bus);
            }
        }
    }

    /// Drop all participation at the given (now-deleted) buses.
    fn scrub_buses(&mut self, deleted: &HashSet<BusId>) {
        for g in &self.units {
            if let Some(buses) = self.bus.get_mut(g) {
                buses.retain(|b| !deleted.contains(b));
            }
            if let Some(coeffs) = self.bus_coeff.get_mut(g) {
                coeffs.retain(|b, _| !deleted.contains(b));
            }
        }
    }
}
