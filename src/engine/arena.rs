//! Node Arena - fixed-capacity node storage.
//!
//! All slots are allocated when the arena is created and never move. Slots
//! are not freed individually: a new build cycle simply overwrites them
//! from index 0 upward.

use crate::config::IndexingMode;
use crate::error::LayoutError;

use super::node::{Node, NodeData, NodeId};

/// Fixed-capacity storage for tree nodes.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    mode: IndexingMode,
}

impl NodeArena {
    /// Allocate `capacity` default slots.
    pub fn new(capacity: usize, mode: IndexingMode) -> Self {
        Self {
            nodes: vec![Node::default(); capacity],
            mode,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn mode(&self) -> IndexingMode {
        self.mode
    }

    /// Check that `index` addresses a slot.
    ///
    /// Always succeeds in unchecked mode.
    pub fn check(&self, index: usize) -> Result<(), LayoutError> {
        match self.mode {
            IndexingMode::Checked if index >= self.nodes.len() => Err(LayoutError::IndexOutOfRange {
                index,
                capacity: self.nodes.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Borrow a slot.
    pub fn get(&self, id: NodeId) -> Result<&Node, LayoutError> {
        self.check(id.index())?;
        Ok(&self.nodes[id.index()])
    }

    /// Mutably borrow a slot.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, LayoutError> {
        self.check(id.index())?;
        Ok(&mut self.nodes[id.index()])
    }

    /// Reinitialise a slot with fresh data and no links except `parent`.
    pub fn reset_slot(
        &mut self,
        id: NodeId,
        data: NodeData,
        parent: Option<NodeId>,
    ) -> Result<(), LayoutError> {
        *self.get_mut(id)? = Node::new(data, parent);
        Ok(())
    }

    // Ids reached through links (or below `arena_size`) are always in range,
    // so internal traversal skips the mode check.

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
