//! lp-engine: spectral propagation of a WDM comb along a resolved path.
//!
//! Provides:
//! - Per-channel spectral state (signal, ASE and NLI powers in linear watts)
//! - Element transfer functions (fiber, amplifier, ROADM, splice)
//! - Measurement of the representative channel before and after each element
//! - `simulate`, which walks a path from its launch transceiver to the
//!   receiving transceiver or the path end
//!
//! All transfer functions are deterministic functions of the incoming state,
//! the element parameters and the immutable configuration passed in.

pub mod common;
pub mod edfa;
pub mod element;
pub mod engine;
pub mod error;
pub mod fiber;
pub mod fused;
pub mod measure;
pub mod roadm;
pub mod spectral;
pub mod traits;

pub use edfa::Edfa;
pub use element::{Element, Transceiver};
pub use engine::{ENGINE_VERSION, Propagation, Step, simulate};
pub use error::{EngineError, EngineResult};
pub use fiber::{Fiber, RamanFiber};
pub use fused::Fused;
pub use measure::{ChannelSnapshot, Measurement};
pub use roadm::Roadm;
pub use spectral::{EngineConfig, SpectralConfig, SpectralState};
pub use traits::{StepDetails, Transfer, TransferContext};
