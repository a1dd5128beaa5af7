//! Position- and parent-aware views over green nodes.
//!
//! A `SyntaxNode` is created on demand while descending from a root. It owns
//! its green node, its absolute offset and its parent, so links only ever
//! point upward and a handle keeps exactly its ancestor chain alive. Handles
//! are never cached: asking for the same slot twice builds two equal handles.

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use sapling_errors::Diagnostic;
use text_size::{TextRange, TextSize};
use triomphe::Arc;

use crate::walk::{Preorder, PreorderWithTokens, WalkEventWithTokens};
use crate::{GreenNode, GreenToken, GreenTrivia, NodeOrToken, Slot, SyntaxKind, TokenAtOffset};

pub type SyntaxSlot = Slot<SyntaxNode, SyntaxToken>;
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

#[derive(Clone)]
pub struct SyntaxNode {
    data: Arc<NodeData>,
}

struct NodeData {
    green: GreenNode,
    offset: TextSize,
    parent: Option<SyntaxNode>,
    slot: u32,
}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self { data: Arc::new(NodeData { green, offset: TextSize::new(0), parent: None, slot: 0 }) }
    }

    fn new_child(green: GreenNode, parent: &Self, offset: TextSize, slot: usize) -> Self {
        Self {
            data: Arc::new(NodeData {
                green,
                offset,
                parent: Some(parent.clone()),
                slot: slot as u32,
            }),
        }
    }

    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.green.kind()
    }

    pub fn width(&self) -> TextSize {
        self.data.green.width()
    }

    /// Absolute start offset in the source text.
    pub fn offset(&self) -> TextSize {
        self.data.offset
    }

    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset(), self.width())
    }

    pub fn parent(&self) -> Option<&Self> {
        self.data.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.data.parent.is_none()
    }

    /// Index of this node among its parent's slots, `None` for a root.
    pub fn slot_index(&self) -> Option<usize> {
        self.data.parent.as_ref().map(|_| self.data.slot as usize)
    }

    /// Ancestors starting with this node itself.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), |node| node.parent().cloned())
    }

    pub fn root(&self) -> Self {
        let mut node = self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node.clone()
    }

    pub fn slot_count(&self) -> usize {
        self.data.green.slot_count()
    }

    /// Logical names of this kind's slots, in slot order.
    pub fn child_names(&self) -> Vec<&'static str> {
        self.kind().slot_names().collect()
    }

    /// Materializes the view of slot `index`.
    ///
    /// The child's offset is this node's offset plus the widths of all
    /// preceding slots.
    #[track_caller]
    pub fn child_in_bucket(&self, index: usize) -> SyntaxSlot {
        let green = self.green();
        let offset = self.offset() + green.slot_offset(index);
        match green.slot(index) {
            Slot::Node(node) => Slot::Node(Self::new_child(node.clone(), self, offset, index)),
            Slot::Token(token) => {
                Slot::Token(SyntaxToken::new_child(token.clone(), self, offset, index))
            }
            Slot::Absent => Slot::Absent,
        }
    }

    #[track_caller]
    pub fn child_node(&self, index: usize) -> Option<Self> {
        self.child_in_bucket(index).into_node()
    }

    #[track_caller]
    pub fn child_token(&self, index: usize) -> Option<SyntaxToken> {
        self.child_in_bucket(index).into_token()
    }

    /// All slots in order, absent ones included.
    pub fn children(&self) -> SyntaxSlots {
        SyntaxSlots { parent: self.clone(), front: 0, back: self.slot_count() }
    }

    /// Present slots in order.
    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + use<> {
        self.children().filter_map(Slot::into_element)
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = Self> + use<> {
        self.children().filter_map(Slot::into_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.children().filter_map(Slot::into_token)
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.children_with_tokens().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.children().rev().filter_map(Slot::into_element).find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    pub fn preorder_with_tokens(&self) -> PreorderWithTokens {
        PreorderWithTokens::new(self.clone())
    }

    /// Returns the token at the given offset, if any.
    pub fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        let range = self.text_range();
        if range.is_empty() || offset < range.start() || offset > range.end() {
            return TokenAtOffset::None;
        }

        let mut children = self.children_with_tokens().filter(|child| {
            let child_range = child.text_range();
            !child_range.is_empty() && child_range.start() <= offset && offset <= child_range.end()
        });

        let Some(left) = children.next() else { return TokenAtOffset::None };
        match children.next() {
            None => left.token_at_offset(offset),
            Some(right) => match (left.token_at_offset(offset), right.token_at_offset(offset)) {
                (TokenAtOffset::Single(left), TokenAtOffset::Single(right)) => {
                    TokenAtOffset::Between(left, right)
                }
                (left, _) => left,
            },
        }
    }

    /// Reconstructs the exact source text spanned by this node.
    pub fn text(&self) -> String {
        self.green().to_string()
    }

    /// Diagnostics attached anywhere in this subtree, positioned absolutely.
    ///
    /// Subtrees whose green node carries no diagnostics are skipped.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut walk = self.preorder_with_tokens();
        while let Some(event) = walk.next() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    if !node.green().contains_diagnostics() {
                        walk.skip_subtree();
                        continue;
                    }
                    let range = node.text_range();
                    diagnostics.extend(node.green().diagnostics().iter().map(|d| d.located(range)));
                }
                WalkEventWithTokens::Token(token) => {
                    let range = token.trimmed_range();
                    diagnostics
                        .extend(token.green().diagnostics().iter().map(|d| d.located(range)));
                }
                WalkEventWithTokens::LeaveNode(_) => {}
            }
        }
        diagnostics
    }

    /// An indented dump of kinds, ranges and token texts. Absent slots are
    /// shown by name.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_debug_tree(&mut out, 0);
        out
    }

    fn write_debug_tree(&self, out: &mut String, depth: usize) {
        let _ = writeln!(out, "{:indent$}{self:?}", "", indent = depth * 2);
        let layout = self.kind().slots();
        let indent = (depth + 1) * 2;
        for (index, slot) in self.children().enumerate() {
            match slot {
                Slot::Node(node) => node.write_debug_tree(out, depth + 1),
                Slot::Token(token) => {
                    let _ = writeln!(out, "{:indent$}{token:?}", "");
                }
                Slot::Absent => {
                    let name = layout.get(index).map_or("element", |spec| spec.name);
                    let _ = writeln!(out, "{:indent$}<absent {name}>", "");
                }
            }
        }
    }

    /// Whether both handles are the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Two handles are equal when they view the same green node at the same
/// offset under equal parents, however many times they were materialized.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.green().ptr_eq(other.green())
                && self.offset() == other.offset()
                && self.data.slot == other.data.slot
                && self.parent() == other.parent())
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.green().addr().hash(state);
        self.offset().hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green(), f)
    }
}

/// Iterator over every slot of a node.
#[derive(Clone)]
pub struct SyntaxSlots {
    parent: SyntaxNode,
    front: usize,
    back: usize,
}

impl Iterator for SyntaxSlots {
    type Item = SyntaxSlot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let slot = self.parent.child_in_bucket(self.front);
        self.front += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for SyntaxSlots {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.parent.child_in_bucket(self.back))
    }
}

impl ExactSizeIterator for SyntaxSlots {}

#[derive(Clone)]
pub struct SyntaxToken {
    green: GreenToken,
    offset: TextSize,
    parent: Option<SyntaxNode>,
    slot: u32,
}

impl SyntaxToken {
    /// A token that is not part of any tree yet, starting at offset zero.
    pub fn new_detached(green: GreenToken) -> Self {
        Self { green, offset: TextSize::new(0), parent: None, slot: 0 }
    }

    fn new_child(green: GreenToken, parent: &SyntaxNode, offset: TextSize, slot: usize) -> Self {
        Self { green, offset, parent: Some(parent.clone()), slot: slot as u32 }
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn width(&self) -> TextSize {
        self.green.width()
    }

    pub fn offset(&self) -> TextSize {
        self.offset
    }

    /// The text range including attached trivia.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.width())
    }

    /// The text range excluding trivia.
    pub fn trimmed_range(&self) -> TextRange {
        let range = self.text_range();
        TextRange::new(
            range.start() + self.green.leading().len(),
            range.end() - self.green.trailing().len(),
        )
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn text_trimmed(&self) -> &str {
        self.green.text_trimmed()
    }

    pub fn leading_trivia(&self) -> &GreenTrivia {
        self.green.leading()
    }

    pub fn trailing_trivia(&self) -> &GreenTrivia {
        self.green.trailing()
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn parent(&self) -> Option<&SyntaxNode> {
        self.parent.as_ref()
    }

    pub fn slot_index(&self) -> Option<usize> {
        self.parent.as_ref().map(|_| self.slot as usize)
    }

    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        std::iter::successors(self.parent.clone(), |node| node.parent().cloned())
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.green.ptr_eq(&other.green)
            && self.offset == other.offset
            && self.slot == other.slot
            && self.parent == other.parent
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())?;
        if self.is_missing() {
            f.write_str(" missing")?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn parent(&self) -> Option<&SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => token.parent(),
        }
    }

    fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        match self {
            NodeOrToken::Node(node) => node.token_at_offset(offset),
            NodeOrToken::Token(token) => TokenAtOffset::Single(token.clone()),
        }
    }
}

impl SyntaxSlot {
    pub fn kind(&self) -> Option<SyntaxKind> {
        match self {
            Slot::Node(node) => Some(node.kind()),
            Slot::Token(token) => Some(token.kind()),
            Slot::Absent => None,
        }
    }

    /// The green value behind this slot, for handing back to the modifier.
    pub fn to_green(&self) -> Slot<GreenNode, GreenToken> {
        match self {
            Slot::Node(node) => Slot::Node(node.green().clone()),
            Slot::Token(token) => Slot::Token(token.green().clone()),
            Slot::Absent => Slot::Absent,
        }
    }
}
