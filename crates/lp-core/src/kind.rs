use core::fmt;

/// Physical kind of a network element.
///
/// Shared between the stored topology and the propagation engine so that
/// reports and stored records name kinds identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Transceiver,
    Fiber,
    RamanFiber,
    Edfa,
    Roadm,
    Fused,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Transceiver,
        ElementKind::Fiber,
        ElementKind::RamanFiber,
        ElementKind::Edfa,
        ElementKind::Roadm,
        ElementKind::Fused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Transceiver => "Transceiver",
            ElementKind::Fiber => "Fiber",
            ElementKind::RamanFiber => "RamanFiber",
            ElementKind::Edfa => "Edfa",
            ElementKind::Roadm => "Roadm",
            ElementKind::Fused => "Fused",
        }
    }

    /// Passive elements attenuate without adding noise.
    pub fn is_passive(self) -> bool {
        matches!(
            self,
            ElementKind::Fiber | ElementKind::RamanFiber | ElementKind::Fused
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
