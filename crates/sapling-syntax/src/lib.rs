//! Lossless, structurally shared concrete syntax tree.
//!
//! Green nodes are immutable and position-free so that any subtree can be
//! shared between trees. Red handles add the absolute offset and the parent
//! on the way down. Edits rebuild only the path from the edited node to the
//! root and reuse everything else by reference.

/// Typed wrappers, one per node kind.
pub mod ast;
mod cache;
mod diagnostic;
mod error;
/// The single constructor of green nodes, plus typed convenience builders.
pub mod factory;
mod green;
mod modify;
mod red;
mod slot;
mod syntax_kind;
mod syntax_set;
mod trivia;
mod visit;
mod walk;

/// Interning front end for parsers.
pub use cache::{CacheStats, NodeCache};
/// Diagnostics carried by green values.
pub use diagnostic::SyntaxDiagnostic;
/// Rejected slot values.
pub use error::SlotError;
/// Position-free shared nodes.
pub use green::{GreenNode, GreenSlot, GreenToken};
/// Staged edits.
pub use modify::NodeModifier;
/// Position- and parent-aware handles.
pub use red::{SyntaxElement, SyntaxNode, SyntaxSlot, SyntaxSlots, SyntaxToken};
pub use slot::{NodeOrToken, Slot, TokenAtOffset};
/// Token and node kinds with their slot layouts.
pub use syntax_kind::{
    BINARY_OPERATORS, EXPRESSIONS, FUNCTION_ARGUMENTS, LITERALS, NAME_REFERENCES, NODES,
    STATEMENTS, SlotShape, SlotSpec, SyntaxKind,
};
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
/// Kind-dispatched traversal.
pub use visit::{SyntaxTransformer, SyntaxVisitor, TreeModifier};
pub use walk::{Preorder, PreorderWithTokens, WalkEvent, WalkEventWithTokens};
