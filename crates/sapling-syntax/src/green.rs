//! Position-free, parent-free, immutable nodes.
//!
//! Green values are reference counted and never mutated after construction,
//! so the same subtree can appear in any number of trees at once.

use std::fmt;

use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, Slot, SyntaxDiagnostic, SyntaxKind};

pub type GreenSlot = Slot<GreenNode, GreenToken>;

impl GreenSlot {
    pub fn width(&self) -> TextSize {
        match self {
            Slot::Node(node) => node.width(),
            Slot::Token(token) => token.width(),
            Slot::Absent => TextSize::new(0),
        }
    }

    pub fn kind(&self) -> Option<SyntaxKind> {
        match self {
            Slot::Node(node) => Some(node.kind()),
            Slot::Token(token) => Some(token.kind()),
            Slot::Absent => None,
        }
    }

    /// Identity comparison: two absent slots are identical, two present slots
    /// only when they share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Node(a), Slot::Node(b)) => a.ptr_eq(b),
            (Slot::Token(a), Slot::Token(b)) => a.ptr_eq(b),
            (Slot::Absent, Slot::Absent) => true,
            _ => false,
        }
    }

    pub fn contains_diagnostics(&self) -> bool {
        match self {
            Slot::Node(node) => node.contains_diagnostics(),
            Slot::Token(token) => !token.diagnostics().is_empty(),
            Slot::Absent => false,
        }
    }

    /// Address of the shared allocation, `0` when absent.
    pub(crate) fn addr(&self) -> usize {
        match self {
            Slot::Node(node) => node.addr(),
            Slot::Token(token) => token.addr(),
            Slot::Absent => 0,
        }
    }
}

impl From<GreenNode> for GreenSlot {
    fn from(node: GreenNode) -> Self {
        Slot::Node(node)
    }
}

impl From<GreenToken> for GreenSlot {
    fn from(token: GreenToken) -> Self {
        Slot::Token(token)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

#[derive(PartialEq, Eq)]
struct GreenNodeData {
    kind: SyntaxKind,
    width: TextSize,
    contains_diagnostics: bool,
    diagnostics: Box<[SyntaxDiagnostic]>,
    children: Box<[GreenChild]>,
}

#[derive(PartialEq, Eq)]
struct GreenChild {
    rel_offset: TextSize,
    slot: GreenSlot,
}

impl GreenNode {
    /// Only the factory calls this; it checks the slots against the kind's
    /// layout first.
    pub(crate) fn new(
        kind: SyntaxKind,
        slots: Vec<GreenSlot>,
        diagnostics: Vec<SyntaxDiagnostic>,
    ) -> Self {
        let mut width = TextSize::new(0);
        let mut contains_diagnostics = !diagnostics.is_empty();
        let children = slots
            .into_iter()
            .map(|slot| {
                let rel_offset = width;
                width += slot.width();
                contains_diagnostics |= slot.contains_diagnostics();
                GreenChild { rel_offset, slot }
            })
            .collect();

        Self {
            data: Arc::new(GreenNodeData {
                kind,
                width,
                contains_diagnostics,
                diagnostics: diagnostics.into_boxed_slice(),
                children,
            }),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Total length of the source text this node spans.
    pub fn width(&self) -> TextSize {
        self.data.width
    }

    pub fn slot_count(&self) -> usize {
        self.data.children.len()
    }

    #[track_caller]
    pub fn slot(&self, index: usize) -> &GreenSlot {
        match self.data.children.get(index) {
            Some(child) => &child.slot,
            None => panic!(
                "slot {index} out of bounds for {:?} with {} slots",
                self.kind(),
                self.slot_count()
            ),
        }
    }

    /// Offset of slot `index` relative to the start of this node.
    #[track_caller]
    pub fn slot_offset(&self, index: usize) -> TextSize {
        match self.data.children.get(index) {
            Some(child) => child.rel_offset,
            None => panic!(
                "slot {index} out of bounds for {:?} with {} slots",
                self.kind(),
                self.slot_count()
            ),
        }
    }

    pub fn slots(&self) -> impl ExactSizeIterator<Item = &GreenSlot> + DoubleEndedIterator {
        self.data.children.iter().map(|child| &child.slot)
    }

    pub(crate) fn to_slots(&self) -> Vec<GreenSlot> {
        self.slots().cloned().collect()
    }

    /// Diagnostics attached to this node itself.
    pub fn diagnostics(&self) -> &[SyntaxDiagnostic] {
        &self.data.diagnostics
    }

    /// Whether this node or anything below it carries diagnostics.
    pub fn contains_diagnostics(&self) -> bool {
        self.data.contains_diagnostics
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.data).addr()
    }

    fn write_text(&self, f: &mut impl fmt::Write) -> fmt::Result {
        for slot in self.slots() {
            match slot {
                Slot::Node(node) => node.write_text(f)?,
                Slot::Token(token) => f.write_str(token.text())?,
                Slot::Absent => {}
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("width", &self.width())
            .field("slots", &self.slots().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    /// Leading trivia, token text and trailing trivia.
    text: Box<str>,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    diagnostics: Box<[SyntaxDiagnostic]>,
    missing: bool,
}

impl GreenToken {
    pub(crate) fn new(
        kind: SyntaxKind,
        text: Box<str>,
        leading: GreenTrivia,
        trailing: GreenTrivia,
        diagnostics: Vec<SyntaxDiagnostic>,
        missing: bool,
    ) -> Self {
        Self {
            data: Arc::new(GreenTokenData {
                kind,
                text,
                leading,
                trailing,
                diagnostics: diagnostics.into_boxed_slice(),
                missing,
            }),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// The full text, trivia included.
    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn text_trimmed(&self) -> &str {
        let start: usize = self.leading().len().into();
        let end: usize = (self.width() - self.trailing().len()).into();

        &self.data.text[start..end]
    }

    pub fn width(&self) -> TextSize {
        TextSize::new(self.data.text.len() as u32)
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.data.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.data.trailing
    }

    pub fn diagnostics(&self) -> &[SyntaxDiagnostic] {
        &self.data.diagnostics
    }

    /// Whether the parser synthesised this token because the source lacked it.
    pub fn is_missing(&self) -> bool {
        self.data.missing
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.data).addr()
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("missing", &self.is_missing())
            .finish()
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
