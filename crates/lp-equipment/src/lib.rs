//! lp-equipment: amplifier and ROADM models keyed by `type_variety`.
//!
//! Contains:
//! - model (EDFA noise-figure models, ROADM impairment tables)
//! - catalog (the equipment library, built-in defaults, file loading)
//! - error

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::{DEFAULT_VARIETY, Equipment};
pub use error::{EquipmentError, EquipmentResult};
pub use model::{EdfaModel, NoiseFigure, RoadmDegree, RoadmModel};
