//! Typed path elements and transfer dispatch.

use lp_core::{ElementId, ElementKind};

use crate::edfa::Edfa;
use crate::fiber::{Fiber, RamanFiber};
use crate::fused::Fused;
use crate::roadm::Roadm;
use crate::traits::Transfer;

/// Optical endpoint. Launches the comb at the start of a path and
/// terminates propagation anywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Transceiver {
    pub id: ElementId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Transceiver(Transceiver),
    Fiber(Fiber),
    RamanFiber(RamanFiber),
    Edfa(Edfa),
    Roadm(Roadm),
    Fused(Fused),
}

impl Element {
    pub fn id(&self) -> &ElementId {
        match self {
            Element::Transceiver(t) => &t.id,
            Element::Fiber(f) => &f.id,
            Element::RamanFiber(r) => &r.fiber.id,
            Element::Edfa(e) => &e.id,
            Element::Roadm(r) => &r.id,
            Element::Fused(f) => &f.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Transceiver(_) => ElementKind::Transceiver,
            Element::Fiber(_) => ElementKind::Fiber,
            Element::RamanFiber(_) => ElementKind::RamanFiber,
            Element::Edfa(_) => ElementKind::Edfa,
            Element::Roadm(_) => ElementKind::Roadm,
            Element::Fused(_) => ElementKind::Fused,
        }
    }

    /// Transfer function of the element; `None` for transceivers, which
    /// never transform the state.
    pub fn transfer(&self) -> Option<&dyn Transfer> {
        match self {
            Element::Transceiver(_) => None,
            Element::Fiber(f) => Some(f),
            Element::RamanFiber(r) => Some(r),
            Element::Edfa(e) => Some(e),
            Element::Roadm(r) => Some(r),
            Element::Fused(f) => Some(f),
        }
    }

    pub fn transceiver(id: impl Into<ElementId>) -> Self {
        Element::Transceiver(Transceiver { id: id.into() })
    }
}
