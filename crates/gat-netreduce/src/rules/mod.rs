//! The four topology-specific elimination rules. Rule R5,
//! the general n-connection Kron elimination, lives in [`crate::kron`]
//! rather than here since it is not topology-specific.

pub mod r1_end_of_line;
pub mod r2_mid_point;
pub mod r3_end_of_line_injection;
pub mod r4_mid_point_injection;
