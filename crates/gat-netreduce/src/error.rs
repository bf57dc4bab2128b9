//! Error type for the reduction engine.
//!
//! A dedicated `thiserror` enum for this crate's failure modes, with a
//! conversion into `gat_core::GatError` for callers that want one error
//! type at the workspace boundary.

use crate::ids::{BusId, LineId};
use gat_core::GatError;
use thiserror::Error;

/// Fatal failure of the reduction engine.
///
/// These are the only outcomes that abort a reduction. A rule declining to
/// act because its preconditions do not hold (R4 refusing a generator bus,
/// R5 refusing a dense elimination) is not an error — see `rules`.
#[derive(Debug, Error)]
pub enum ReductionError {
    /// More than one line was found between the same ordered endpoint pair
    /// where a rule assumed uniqueness. Reveals a prior invariant breach.
    #[error("more than one line between buses {from} and {to}")]
    TopologyViolation { from: BusId, to: BusId },

    /// A merged or synthesized line would have identical endpoints.
    #[error("line {line} would have equal endpoints at bus {bus}")]
    DegenerateEndpoints { line: LineId, bus: BusId },

    /// All lines were eliminated by reduction, leaving an empty network.
    #[error(
        "reduction removed every line in the network; switch NETWORK_MODEL to \
         SINGLE_BUS or set REDUCE_SYSTEM = false"
    )]
    EmptyNetwork,

    /// R4 was invoked on a bus whose incident lines are both non-binding;
    /// the caller should have filtered this bus out of the candidate set.
    #[error("rule R4 invoked on bus {bus} with no binding incident line")]
    NonBindingPrecondition { bus: BusId },
}

impl From<ReductionError> for GatError {
    fn from(err: ReductionError) -> Self {
        GatError::Network(err.to_string())
    }
}

pub type ReductionResult<T> = Result<T, ReductionError>;
