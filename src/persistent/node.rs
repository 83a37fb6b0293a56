//! Trie nodes.
//!
//! A node maps single-byte key fragments to shared children and optionally
//! holds a value. A node with a value is a *value node*; a node without one
//! is a *plain* (branching) node.
//!
//! Nodes are never mutated once they are reachable from a published
//! snapshot. Writers take a shallow copy with [`Clone`], edit the copy while
//! they still own it exclusively, and only then wrap it in a
//! [`ReferenceCounter`].

use smallvec::SmallVec;

use super::ReferenceCounter;
use super::value::ValueCell;

/// Number of children kept inline before the mapping spills to the heap.
const INLINE_CHILDREN: usize = 4;

/// Shared reference to a node.
pub(crate) type NodeReference = ReferenceCounter<Node>;

/// Children sorted by fragment.
type Children = SmallVec<[(u8, NodeReference); INLINE_CHILDREN]>;

/// A trie node.
///
/// `Clone` is shallow: the copy owns a new mapping table whose entries point
/// at the same child subtrees, and the value (if any) is the same cell.
#[derive(Clone, Default)]
pub(crate) struct Node {
    children: Children,
    value: Option<ValueCell>,
}

impl Node {
    /// Creates a plain node with no children.
    #[inline]
    pub(crate) fn plain() -> Self {
        Self::default()
    }

    #[inline]
    fn position(&self, fragment: u8) -> Result<usize, usize> {
        self.children
            .binary_search_by_key(&fragment, |(child_fragment, _)| *child_fragment)
    }

    /// Returns the child reached through `fragment`.
    #[inline]
    pub(crate) fn get_child(&self, fragment: u8) -> Option<&Self> {
        self.child_reference(fragment).map(|child| &**child)
    }

    /// Returns the shared reference to the child reached through `fragment`.
    #[inline]
    pub(crate) fn child_reference(&self, fragment: u8) -> Option<&NodeReference> {
        self.position(fragment)
            .ok()
            .map(|index| &self.children[index].1)
    }

    /// Iterates over children in ascending fragment order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = (u8, &Self)> {
        self.children
            .iter()
            .map(|(fragment, child)| (*fragment, &**child))
    }

    #[inline]
    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&ValueCell> {
        self.value.as_ref()
    }

    #[inline]
    pub(crate) const fn is_value_node(&self) -> bool {
        self.value.is_some()
    }

    /// Links `child` under `fragment`, replacing any existing entry.
    pub(crate) fn put_child(&mut self, fragment: u8, child: NodeReference) {
        match self.position(fragment) {
            Ok(index) => self.children[index].1 = child,
            Err(index) => self.children.insert(index, (fragment, child)),
        }
    }

    /// Unlinks the child under `fragment`.
    pub(crate) fn remove_child(&mut self, fragment: u8) -> Option<NodeReference> {
        self.position(fragment)
            .ok()
            .map(|index| self.children.remove(index).1)
    }

    /// Turns this node into a value node holding `value`.
    #[inline]
    pub(crate) fn set_value(&mut self, value: ValueCell) {
        self.value = Some(value);
    }

    /// Demotes this value node to a plain node and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if the node holds no value.
    pub(crate) fn clear_value(&mut self) -> ValueCell {
        self.value
            .take()
            .expect("clear_value called on a plain node")
    }

    /// Keeps the node only if it still carries a value or a child.
    #[inline]
    pub(crate) fn into_surviving(self) -> Option<Self> {
        if self.has_children() || self.is_value_node() {
            Some(self)
        } else {
            None
        }
    }

    /// Counts the nodes reachable from this one, itself included.
    pub(crate) fn reachable_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children().map(|(_, child)| child));
        }
        count
    }

    /// Counts the value nodes reachable from this one, itself included.
    pub(crate) fn value_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += usize::from(node.is_value_node());
            pending.extend(node.children().map(|(_, child)| child));
        }
        count
    }
}

/// Releases the subtree with an explicit worklist so that dropping a long
/// key path does not recurse once per byte.
///
/// A child is taken apart only when this was its last reference; subtrees
/// still held by another snapshot are left untouched.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<NodeReference> =
            self.children.drain(..).map(|(_, child)| child).collect();

        while let Some(child) = pending.pop() {
            if let Some(mut node) = ReferenceCounter::into_inner(child) {
                pending.extend(node.children.drain(..).map(|(_, grandchild)| grandchild));
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
