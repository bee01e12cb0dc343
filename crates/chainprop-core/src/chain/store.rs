//! The chain topology store.

use tracing::trace;

use super::{AnchorId, ChainPosition, ElementId};
use crate::error::{ChainError, Result};

/// Link state of one element slot in the arena.
#[derive(Debug, Clone, Copy, Default)]
struct ElementNode {
    predecessor: Option<ChainPosition>,
    successor: Option<ElementId>,
    anchor: Option<AnchorId>,
}

impl ElementNode {
    fn is_detached(&self) -> bool {
        self.predecessor.is_none() && self.successor.is_none()
    }
}

/// The links severed by [`ChainStore::unlink`].
///
/// The caller uses these to trigger propagation on the affected ends: the
/// detached element itself goes to the unassigned state, and the old
/// successor (now spliced onto the old predecessor) seeds the forward walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Severed {
    /// The element's predecessor before unlinking, if any.
    pub predecessor: Option<ChainPosition>,
    /// The element's successor before unlinking, if any.
    pub successor: Option<ElementId>,
}

/// Arena-backed owner of anchor-rooted chain topology.
///
/// The store maintains, per element, the `predecessor`/`successor` index
/// fields and an O(1) anchor reference, plus one head slot per anchor. It is
/// the only component that may mutate links; it never touches derived state.
///
/// Invariants enforced by the mutation API:
/// - every position (anchor or element) is followed by at most one element
/// - a linked element is reachable from exactly one anchor; no cycles
/// - an unassigned element has no predecessor, no successor and no anchor
///
/// # Example
///
/// ```
/// use chainprop_core::ChainStore;
///
/// let mut store = ChainStore::new();
/// let line = store.add_anchor();
/// let a = store.add_element();
/// let b = store.add_element();
///
/// store.link(a, line.into()).unwrap();
/// store.link(b, a.into()).unwrap();
///
/// assert_eq!(store.head_of(line).unwrap(), Some(a));
/// assert_eq!(store.successor_of(a.into()).unwrap(), Some(b));
/// assert_eq!(store.anchor_of(b).unwrap(), Some(line));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChainStore {
    elements: Vec<ElementNode>,
    heads: Vec<Option<ElementId>>,
}

impl ChainStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-allocated capacity.
    pub fn with_capacity(anchors: usize, elements: usize) -> Self {
        Self {
            elements: Vec::with_capacity(elements),
            heads: Vec::with_capacity(anchors),
        }
    }

    /// Registers a new anchor (chain root resource).
    pub fn add_anchor(&mut self) -> AnchorId {
        self.heads.push(None);
        AnchorId(self.heads.len() - 1)
    }

    /// Registers a new element, initially unassigned.
    pub fn add_element(&mut self) -> ElementId {
        self.elements.push(ElementNode::default());
        ElementId(self.elements.len() - 1)
    }

    /// Number of registered anchors.
    pub fn anchor_count(&self) -> usize {
        self.heads.len()
    }

    /// Number of registered elements, assigned or not.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn node(&self, element: ElementId) -> Result<&ElementNode> {
        self.elements
            .get(element.0)
            .ok_or(ChainError::UnknownElement(element))
    }

    fn check_anchor(&self, anchor: AnchorId) -> Result<()> {
        if anchor.0 < self.heads.len() {
            Ok(())
        } else {
            Err(ChainError::UnknownAnchor(anchor))
        }
    }

    /// The element directly following `position`, if any. O(1).
    pub fn successor_of(&self, position: ChainPosition) -> Result<Option<ElementId>> {
        match position {
            ChainPosition::Anchor(anchor) => {
                self.check_anchor(anchor)?;
                Ok(self.heads[anchor.0])
            }
            ChainPosition::Element(element) => Ok(self.node(element)?.successor),
        }
    }

    /// The predecessor of `element`, if assigned. O(1).
    pub fn predecessor_of(&self, element: ElementId) -> Result<Option<ChainPosition>> {
        Ok(self.node(element)?.predecessor)
    }

    /// The anchor whose chain `element` belongs to, if assigned. O(1).
    pub fn anchor_of(&self, element: ElementId) -> Result<Option<AnchorId>> {
        Ok(self.node(element)?.anchor)
    }

    /// The first element of an anchor's chain, if any. O(1).
    pub fn head_of(&self, anchor: AnchorId) -> Result<Option<ElementId>> {
        self.check_anchor(anchor)?;
        Ok(self.heads[anchor.0])
    }

    /// Whether `element` currently occupies a chain slot.
    pub fn is_linked(&self, element: ElementId) -> Result<bool> {
        Ok(self.node(element)?.predecessor.is_some())
    }

    /// Attaches a fully detached `element` directly after `predecessor`.
    ///
    /// The element inherits the predecessor's anchor in O(1). Mid-chain
    /// insertion and relocation are expressed by the caller as `unlink` +
    /// `link` sequences; `link` never displaces an existing successor.
    ///
    /// # Errors
    ///
    /// All errors are fail-fast programming-error diagnostics:
    /// - [`ChainError::AlreadyLinked`] / [`ChainError::TrailingSuccessor`] if
    ///   `element` is not fully detached
    /// - [`ChainError::OccupiedPredecessor`] if `predecessor` already has a
    ///   successor (chains are singly-occupied)
    /// - [`ChainError::SelfLink`] if `predecessor` is `element` itself
    /// - [`ChainError::DetachedPredecessor`] if the predecessor element is
    ///   not itself rooted at an anchor
    pub fn link(&mut self, element: ElementId, predecessor: ChainPosition) -> Result<()> {
        if predecessor == ChainPosition::Element(element) {
            return Err(ChainError::SelfLink(element));
        }
        let node = *self.node(element)?;
        if node.predecessor.is_some() {
            return Err(ChainError::AlreadyLinked(element));
        }
        if let Some(successor) = node.successor {
            return Err(ChainError::TrailingSuccessor { element, successor });
        }
        if let Some(occupant) = self.successor_of(predecessor)? {
            return Err(ChainError::OccupiedPredecessor {
                predecessor,
                occupant,
            });
        }
        let anchor = match predecessor {
            ChainPosition::Anchor(anchor) => anchor,
            ChainPosition::Element(prev) => self
                .node(prev)?
                .anchor
                .ok_or(ChainError::DetachedPredecessor(prev))?,
        };

        match predecessor {
            ChainPosition::Anchor(anchor) => self.heads[anchor.0] = Some(element),
            ChainPosition::Element(prev) => self.elements[prev.0].successor = Some(element),
        }
        let node = &mut self.elements[element.0];
        node.predecessor = Some(predecessor);
        node.anchor = Some(anchor);
        trace!(%element, %predecessor, %anchor, "linked");
        Ok(())
    }

    /// Detaches `element`, splicing its old predecessor directly to its old
    /// successor so the gap closes.
    ///
    /// Returns the severed links. Unlinking an already-detached element is a
    /// no-op and returns empty [`Severed`] links.
    pub fn unlink(&mut self, element: ElementId) -> Result<Severed> {
        let node = *self.node(element)?;
        if node.is_detached() {
            return Ok(Severed {
                predecessor: None,
                successor: None,
            });
        }
        if node.predecessor.is_none() {
            // A successor without a predecessor cannot be produced by the
            // mutation API.
            return Err(ChainError::CorruptTopology(format!(
                "{element} has a successor but no predecessor"
            )));
        }
        let severed = Severed {
            predecessor: node.predecessor,
            successor: node.successor,
        };
        match node.predecessor {
            Some(ChainPosition::Anchor(anchor)) => {
                self.check_anchor(anchor)?;
                self.heads[anchor.0] = node.successor;
            }
            Some(ChainPosition::Element(prev)) => {
                self.node(prev)?;
                self.elements[prev.0].successor = node.successor;
            }
            None => {}
        }
        if let Some(next) = node.successor {
            self.node(next)?;
            self.elements[next.0].predecessor = node.predecessor;
        }
        self.elements[element.0] = ElementNode::default();
        trace!(%element, "unlinked");
        Ok(severed)
    }

    /// Iterates an anchor's chain from head to tail.
    pub fn chain_iter(&self, anchor: AnchorId) -> Result<ChainIter<'_>> {
        Ok(ChainIter {
            store: self,
            next: self.head_of(anchor)?,
        })
    }
}

/// Iterator over the elements of one chain, head to tail.
#[derive(Debug, Clone)]
pub struct ChainIter<'a> {
    store: &'a ChainStore,
    next: Option<ElementId>,
}

impl Iterator for ChainIter<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self
            .store
            .elements
            .get(current.0)
            .and_then(|node| node.successor);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_chain(len: usize) -> (ChainStore, AnchorId, Vec<ElementId>) {
        let mut store = ChainStore::new();
        let anchor = store.add_anchor();
        let mut elements = Vec::new();
        let mut tail: ChainPosition = anchor.into();
        for _ in 0..len {
            let element = store.add_element();
            store.link(element, tail).unwrap();
            tail = element.into();
            elements.push(element);
        }
        (store, anchor, elements)
    }

    #[test]
    fn test_link_builds_chain() {
        let (store, anchor, elements) = store_with_chain(3);

        assert_eq!(store.head_of(anchor).unwrap(), Some(elements[0]));
        assert_eq!(
            store.successor_of(elements[0].into()).unwrap(),
            Some(elements[1])
        );
        assert_eq!(
            store.predecessor_of(elements[1]).unwrap(),
            Some(elements[0].into())
        );
        assert_eq!(store.successor_of(elements[2].into()).unwrap(), None);
        for element in &elements {
            assert_eq!(store.anchor_of(*element).unwrap(), Some(anchor));
        }
    }

    #[test]
    fn test_link_occupied_predecessor_rejected() {
        let (mut store, anchor, elements) = store_with_chain(1);
        let intruder = store.add_element();

        let err = store.link(intruder, anchor.into()).unwrap_err();
        assert_eq!(
            err,
            ChainError::OccupiedPredecessor {
                predecessor: anchor.into(),
                occupant: elements[0],
            }
        );
    }

    #[test]
    fn test_link_already_linked_rejected() {
        let (mut store, anchor, elements) = store_with_chain(2);

        let err = store.link(elements[1], elements[1].into()).unwrap_err();
        assert_eq!(err, ChainError::SelfLink(elements[1]));

        store.unlink(elements[0]).unwrap();
        assert_eq!(
            store.link(elements[1], anchor.into()).unwrap_err(),
            ChainError::AlreadyLinked(elements[1])
        );
    }

    #[test]
    fn test_link_detached_predecessor_rejected() {
        let mut store = ChainStore::new();
        store.add_anchor();
        let floating = store.add_element();
        let element = store.add_element();

        assert_eq!(
            store.link(element, floating.into()).unwrap_err(),
            ChainError::DetachedPredecessor(floating)
        );
    }

    #[test]
    fn test_unlink_splices_gap() {
        let (mut store, anchor, elements) = store_with_chain(3);
        let &[a, b, c] = elements.as_slice() else {
            unreachable!()
        };

        let severed = store.unlink(b).unwrap();
        assert_eq!(
            severed,
            Severed {
                predecessor: Some(a.into()),
                successor: Some(c),
            }
        );
        assert_eq!(store.successor_of(a.into()).unwrap(), Some(c));
        assert_eq!(store.predecessor_of(c).unwrap(), Some(a.into()));
        assert_eq!(store.predecessor_of(b).unwrap(), None);
        assert_eq!(store.anchor_of(b).unwrap(), None);
        assert_eq!(store.head_of(anchor).unwrap(), Some(a));
    }

    #[test]
    fn test_unlink_head() {
        let (mut store, anchor, elements) = store_with_chain(2);
        let &[a, b] = elements.as_slice() else {
            unreachable!()
        };

        let severed = store.unlink(a).unwrap();
        assert_eq!(severed.predecessor, Some(anchor.into()));
        assert_eq!(severed.successor, Some(b));
        assert_eq!(store.head_of(anchor).unwrap(), Some(b));
        assert_eq!(store.predecessor_of(b).unwrap(), Some(anchor.into()));
    }

    #[test]
    fn test_unlink_detached_is_noop() {
        let mut store = ChainStore::new();
        let element = store.add_element();

        let severed = store.unlink(element).unwrap();
        assert_eq!(severed.predecessor, None);
        assert_eq!(severed.successor, None);
    }

    #[test]
    fn test_relink_after_unlink() {
        let (mut store, anchor, elements) = store_with_chain(3);
        let &[a, b, c] = elements.as_slice() else {
            unreachable!()
        };

        // Move b to the tail: a -> c -> b.
        store.unlink(b).unwrap();
        store.link(b, c.into()).unwrap();

        let order: Vec<_> = store.chain_iter(anchor).unwrap().collect();
        assert_eq!(order, vec![a, c, b]);
        assert_eq!(store.anchor_of(b).unwrap(), Some(anchor));
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let store = ChainStore::new();
        assert_eq!(
            store.predecessor_of(ElementId(0)).unwrap_err(),
            ChainError::UnknownElement(ElementId(0))
        );
        assert_eq!(
            store.head_of(AnchorId(4)).unwrap_err(),
            ChainError::UnknownAnchor(AnchorId(4))
        );
    }

    #[test]
    fn test_chain_iter_empty_chain() {
        let mut store = ChainStore::new();
        let anchor = store.add_anchor();
        assert_eq!(store.chain_iter(anchor).unwrap().count(), 0);
    }
}
