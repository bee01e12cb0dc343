//! Stable arena indices for anchors and chained elements.
//!
//! # Zero-Erasure Design
//!
//! - **Index-based**: back-references between chain neighbours are index
//!   fields, never owning pointers, so no reference cycles can form
//! - **Copy**: ids are plain `usize` newtypes, cheap to pass on the hot path

use std::fmt;

/// Index of an anchor: the fixed resource at the root of a chain.
///
/// Anchors are never chained themselves; they only seed the first element's
/// derived state with a resource-level baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorId(pub usize);

/// Index of a planning element capable of occupying a chain slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub usize);

/// Anything an element's predecessor reference may point at: the anchor at
/// the chain root, or another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainPosition {
    /// The chain root.
    Anchor(AnchorId),
    /// Another chained element.
    Element(ElementId),
}

impl ChainPosition {
    /// Returns the anchor id if this position is a chain root.
    pub fn as_anchor(self) -> Option<AnchorId> {
        match self {
            ChainPosition::Anchor(anchor) => Some(anchor),
            ChainPosition::Element(_) => None,
        }
    }

    /// Returns the element id if this position is a chained element.
    pub fn as_element(self) -> Option<ElementId> {
        match self {
            ChainPosition::Anchor(_) => None,
            ChainPosition::Element(element) => Some(element),
        }
    }
}

impl From<AnchorId> for ChainPosition {
    fn from(anchor: AnchorId) -> Self {
        ChainPosition::Anchor(anchor)
    }
}

impl From<ElementId> for ChainPosition {
    fn from(element: ElementId) -> Self {
        ChainPosition::Element(element)
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

impl fmt::Display for ChainPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainPosition::Anchor(anchor) => anchor.fmt(f),
            ChainPosition::Element(element) => element.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_conversions() {
        let pos: ChainPosition = AnchorId(3).into();
        assert_eq!(pos.as_anchor(), Some(AnchorId(3)));
        assert_eq!(pos.as_element(), None);

        let pos: ChainPosition = ElementId(7).into();
        assert_eq!(pos.as_element(), Some(ElementId(7)));
        assert_eq!(pos.as_anchor(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(AnchorId(0).to_string(), "anchor#0");
        assert_eq!(ElementId(12).to_string(), "element#12");
        assert_eq!(ChainPosition::Anchor(AnchorId(1)).to_string(), "anchor#1");
    }
}
