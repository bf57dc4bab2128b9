//! Kron network-reduction engine for DC-linearized transmission networks.
//!
//! Given a [`model::Network`] and [`model::ThermalFleet`] produced by
//! ingest, [`driver::reduce_network`] eliminates redundant buses and lines
//! in place while preserving the electrical response observable at the
//! surviving buses, redistributing loads and generator participations onto
//! the buses that remain.

pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod ids;
pub mod kron;
pub mod model;
pub mod orient;
pub mod parallel;
pub mod params;
pub mod rules;

pub use driver::{reduce_network, ReductionReport};
pub use error::{ReductionError, ReductionResult};
pub use ids::{BusId, LineId, UnitId};
pub use model::{Line, Network, ParticipantFactors, Participants, SecurityConstraint, ThermalFleet};
pub use params::{NetworkModel, Params};
