//! Copy-on-write edits.
//!
//! An edit builds one new green node for the edited node and one per
//! ancestor; every other green node of the old tree is reused as is. The old
//! tree is left untouched, so handles into it stay readable.

use tracing::{debug, trace};

use crate::factory::{self, check_slot};
use crate::{
    GreenNode, GreenSlot, GreenToken, Slot, SlotError, SlotSpec, SyntaxKind, SyntaxNode,
    SyntaxToken,
};

/// Staged replacements for the slots of one node, committed by [`apply`] in
/// a single rebuild.
///
/// [`apply`]: NodeModifier::apply
#[derive(Debug)]
pub struct NodeModifier {
    node: SyntaxNode,
    slots: Vec<GreenSlot>,
}

impl NodeModifier {
    pub fn new(node: SyntaxNode) -> Self {
        let slots = node.green().to_slots();
        Self { node, slots }
    }

    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    /// Stages `value` for slot `index`.
    pub fn set(
        &mut self,
        index: usize,
        value: impl Into<GreenSlot>,
    ) -> Result<&mut Self, SlotError> {
        let value = value.into();
        let kind = self.node.kind();
        let spec = self.spec(index)?;
        check_slot(kind, spec, &value)?;
        self.slots[index] = value;
        Ok(self)
    }

    /// Inserts `element` before position `index` of a list.
    pub fn insert(&mut self, index: usize, element: GreenNode) -> Result<&mut Self, SlotError> {
        let element = Slot::Node(element);
        let spec = self.list_element_spec()?;
        if index > self.slots.len() {
            return Err(SlotError::SlotOutOfRange {
                kind: SyntaxKind::LIST,
                index,
                len: self.slots.len(),
            });
        }
        check_slot(SyntaxKind::LIST, spec, &element)?;
        self.slots.insert(index, element);
        Ok(self)
    }

    pub fn push(&mut self, element: GreenNode) -> Result<&mut Self, SlotError> {
        self.insert(self.slots.len(), element)
    }

    /// Removes position `index` of a list.
    pub fn remove(&mut self, index: usize) -> Result<&mut Self, SlotError> {
        self.list_element_spec()?;
        if index >= self.slots.len() {
            return Err(SlotError::SlotOutOfRange {
                kind: SyntaxKind::LIST,
                index,
                len: self.slots.len(),
            });
        }
        self.slots.remove(index);
        Ok(self)
    }

    /// Commits the staged replacements and returns the edited node in the
    /// new tree.
    ///
    /// When every staged value is the very same allocation as the current
    /// one, nothing is built and the original handle is returned. Value-equal
    /// but distinct allocations still count as an edit.
    pub fn apply(self) -> SyntaxNode {
        let green = self.node.green();
        let unchanged = green.slot_count() == self.slots.len()
            && green.slots().zip(&self.slots).all(|(old, new)| old.ptr_eq(new));
        if unchanged {
            trace!(kind = ?self.node.kind(), "edit is a no-op");
            return self.node;
        }

        let new_green = factory::create_node(self.node.kind(), self.slots);
        self.node.replace_green(new_green)
    }

    fn spec(&self, index: usize) -> Result<SlotSpec, SlotError> {
        let kind = self.node.kind();
        if kind == SyntaxKind::LIST {
            if index >= self.slots.len() {
                return Err(SlotError::SlotOutOfRange { kind, index, len: self.slots.len() });
            }
            return self.list_element_spec();
        }
        kind.slots().get(index).copied().ok_or(SlotError::SlotOutOfRange {
            kind,
            index,
            len: self.slots.len(),
        })
    }

    /// The element layout of this list, taken from the slot that holds it.
    fn list_element_spec(&self) -> Result<SlotSpec, SlotError> {
        let kind = self.node.kind();
        if kind != SyntaxKind::LIST {
            return Err(SlotError::NotAList { kind });
        }
        let holder = self
            .node
            .parent()
            .zip(self.node.slot_index())
            .and_then(|(parent, index)| parent.kind().slots().get(index))
            .and_then(|spec| spec.list_element());
        Ok(holder.unwrap_or(SlotSpec::ANY_LIST_ELEMENT))
    }
}

impl SyntaxNode {
    /// Starts a staged edit of this node's slots.
    pub fn modify(&self) -> NodeModifier {
        NodeModifier::new(self.clone())
    }

    pub fn replace_slot(
        &self,
        index: usize,
        value: impl Into<GreenSlot>,
    ) -> Result<Self, SlotError> {
        let mut modifier = self.modify();
        modifier.set(index, value)?;
        Ok(modifier.apply())
    }

    /// Replaces several slots with one rebuild. Later edits of the same slot
    /// win.
    pub fn replace_slots(
        &self,
        edits: impl IntoIterator<Item = (usize, GreenSlot)>,
    ) -> Result<Self, SlotError> {
        let mut modifier = self.modify();
        for (index, value) in edits {
            modifier.set(index, value)?;
        }
        Ok(modifier.apply())
    }

    /// Replaces this whole node with `green`, which must fit the slot this
    /// node occupies. Returns the replacement's handle in the new tree.
    pub fn replace_with(&self, green: GreenNode) -> Result<Self, SlotError> {
        if green.ptr_eq(self.green()) {
            trace!(kind = ?self.kind(), "edit is a no-op");
            return Ok(self.clone());
        }
        match self.parent().zip(self.slot_index()) {
            None => Ok(Self::new_root(green)),
            Some((parent, index)) => {
                let new_parent = parent.replace_slot(index, green)?;
                Ok(new_parent.child_node(index).expect("replaced slot holds a node"))
            }
        }
    }

    /// Swaps in `green` for this node's green node, rebuilding every
    /// ancestor up to the root.
    pub(crate) fn replace_green(&self, green: GreenNode) -> Self {
        let mut path = Vec::new();
        let mut new_green = green;
        let mut node = self;

        while let Some((parent, index)) = node.parent().zip(node.slot_index()) {
            let mut slots = parent.green().to_slots();
            slots[index] = Slot::Node(new_green);
            new_green = factory::create_node(parent.kind(), slots);
            trace!(kind = ?parent.kind(), slot = index, "rebuilt spine node");

            path.push(index);
            node = parent;
        }

        debug!(kind = ?self.kind(), spine = path.len(), "replaced subtree");

        let mut result = Self::new_root(new_green);
        for &index in path.iter().rev() {
            result = result.child_node(index).expect("spine slot holds a node");
        }
        result
    }
}

impl SyntaxToken {
    /// Replaces this token with `green`. Returns the replacement's handle in
    /// the new tree.
    pub fn replace_with(&self, green: GreenToken) -> Result<Self, SlotError> {
        if green.ptr_eq(self.green()) {
            trace!(kind = ?self.kind(), "edit is a no-op");
            return Ok(self.clone());
        }
        match self.parent().zip(self.slot_index()) {
            None => Ok(Self::new_detached(green)),
            Some((parent, index)) => {
                let new_parent = parent.replace_slot(index, green)?;
                Ok(new_parent.child_token(index).expect("replaced slot holds a token"))
            }
        }
    }
}
