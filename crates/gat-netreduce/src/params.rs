//! Run parameters consumed from the outer program.
//!
//! A plain configuration struct with a `Default` impl — no separate
//! config-loading crate, since the outer CLI owns parsing and just
//! constructs this value.

/// Engine-visible network representation the caller intends to solve with.
/// Reduction only runs for the network-flow models that can exploit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkModel {
    /// No transmission network modeled at all.
    SingleBus,
    /// Bus-angle (B-theta) DC formulation.
    BTheta,
    /// Explicit per-line flow variables.
    Fluxes,
    /// PTDF-based flow representation.
    Ptdf,
}

impl NetworkModel {
    /// Whether this model benefits from network reduction.
    pub fn supports_reduction(&self) -> bool {
        matches!(self, NetworkModel::BTheta | NetworkModel::Fluxes | NetworkModel::Ptdf)
    }
}

/// An engine constant treated as "unbounded-equivalent". A line
/// flow limit at or beyond `MAX_FLOW / POWER_BASE` (in p.u.) is infinite for
/// the purposes of the reduction rules.
pub const MAX_FLOW: f64 = 1.0e12;

/// Run parameters. `T` is the scheduling horizon length; all
/// per-period vectors on `Network`/`ThermalFleet` have this many entries.
#[derive(Debug, Clone)]
pub struct Params {
    pub t: usize,
    pub max_number_of_connections: usize,
    pub reduce_system: bool,
    pub network_model: NetworkModel,
    pub power_base: f64,
    pub deficit_cost: f64,
    pub min_gen_cut_mw: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            t: 1,
            max_number_of_connections: 2,
            reduce_system: true,
            network_model: NetworkModel::BTheta,
            power_base: 100.0,
            deficit_cost: 1.0e4,
            min_gen_cut_mw: 1.0,
        }
    }
}

impl Params {
    /// Whether the driver should run at all: reduction runs only when
    /// enabled and the chosen network model can use it.
    pub fn should_reduce(&self) -> bool {
        self.reduce_system && self.network_model.supports_reduction()
    }

    /// Threshold above which a line flow bound is considered unbounded, in
    /// per-unit.
    pub fn unbounded_threshold(&self) -> f64 {
        MAX_FLOW / self.power_base
    }
}
