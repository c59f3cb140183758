//! lp-core: stable foundation for lightpath.
//!
//! Contains:
//! - units (uom SI types, dB/linear conversions, physical constants)
//! - numeric (finite checks, reporting rounding)
//! - ids (element and network identifiers)
//! - kind (element kinds shared by topology and engine)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod kind;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LpError, LpResult};
pub use ids::*;
pub use kind::ElementKind;
pub use numeric::*;
pub use units::*;
