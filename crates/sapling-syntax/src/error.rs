use crate::{SyntaxKind, SyntaxSet};

/// A slot value that does not fit the layout of the node it is put into.
///
/// The factory treats these as bugs in its caller and panics; the
/// modification API reports them so that tooling can reject a bad edit.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SlotError {
    #[error("{kind:?} is a token kind and has no slots")]
    NotANode { kind: SyntaxKind },
    #[error("{kind:?} expects {expected} slots, found {found}")]
    ArityMismatch { kind: SyntaxKind, expected: usize, found: usize },
    #[error("slot {index} is out of range for {kind:?} with {len} slots")]
    SlotOutOfRange { kind: SyntaxKind, index: usize, len: usize },
    #[error("slot `{slot}` of {kind:?} is required and cannot be absent")]
    RequiredSlotAbsent { kind: SyntaxKind, slot: &'static str },
    #[error("slot `{slot}` of {kind:?} expects one of {expected:?}, found {found:?}")]
    UnexpectedKind { kind: SyntaxKind, slot: &'static str, expected: SyntaxSet, found: SyntaxKind },
    #[error("slot `{slot}` of {kind:?} expects a {expected}, found a {found}")]
    ShapeMismatch {
        kind: SyntaxKind,
        slot: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{kind:?} is not a list")]
    NotAList { kind: SyntaxKind },
}
