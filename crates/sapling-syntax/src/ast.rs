//! Typed views over `SyntaxNode`s, one per node kind.
//!
//! A typed node is the same handle as the `SyntaxNode` it wraps; casting
//! checks the kind and accessors index into the kind's slot layout.

use std::fmt;
use std::marker::PhantomData;

use crate::{GreenSlot, NodeModifier, SyntaxKind, SyntaxNode, SyntaxToken};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(syntax: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;

    fn into_syntax(self) -> SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$attr:meta])* $name:ident => $kind:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }

            fn into_syntax(self) -> SyntaxNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

macro_rules! ast_enum {
    ($(#[$attr:meta])* $name:ident { $($variant:ident($ty:ident)),* $(,)? }) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($ty),)*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $(<$ty as AstNode>::can_cast(kind))||*
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                let kind = syntax.kind();
                $(
                    if <$ty as AstNode>::can_cast(kind) {
                        return <$ty as AstNode>::cast(syntax).map(Self::$variant);
                    }
                )*
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(it) => it.syntax(),)*
                }
            }

            fn into_syntax(self) -> SyntaxNode {
                match self {
                    $(Self::$variant(it) => it.into_syntax(),)*
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.syntax(), f)
            }
        }
    };
}

mod nodes;

pub use nodes::*;

#[track_caller]
fn required_token(node: &SyntaxNode, index: usize) -> SyntaxToken {
    node.child_token(index).expect("required token slot is present")
}

fn optional_token(node: &SyntaxNode, index: usize) -> Option<SyntaxToken> {
    node.child_token(index)
}

#[track_caller]
fn required_node<N: AstNode>(node: &SyntaxNode, index: usize) -> N {
    node.child_node(index)
        .and_then(N::cast)
        .expect("required node slot holds a node of its layout")
}

fn optional_node<N: AstNode>(node: &SyntaxNode, index: usize) -> Option<N> {
    node.child_node(index).and_then(N::cast)
}

fn token_slot(token: &SyntaxToken) -> GreenSlot {
    GreenSlot::Token(token.green().clone())
}

fn node_slot(node: &impl AstNode) -> GreenSlot {
    GreenSlot::Node(node.syntax().green().clone())
}

/// Stages a typed value. A value that still does not fit, such as a token of
/// the wrong kind, is a caller bug.
#[track_caller]
fn stage(modifier: &mut NodeModifier, index: usize, value: GreenSlot) {
    if let Err(err) = modifier.set(index, value) {
        panic!("{err}");
    }
}

/// A homogeneous `LIST` of typed elements.
pub struct NodeList<N> {
    syntax: SyntaxNode,
    _element: PhantomData<fn() -> N>,
}

impl<N: AstNode> NodeList<N> {
    pub fn len(&self) -> usize {
        self.syntax.slot_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<N> {
        if index < self.len() { optional_node(&self.syntax, index) } else { None }
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + use<N> {
        self.syntax.child_nodes().filter_map(N::cast)
    }

    pub fn modify(&self) -> NodeListModifier<N> {
        NodeListModifier { inner: self.syntax.modify(), _element: PhantomData }
    }
}

impl<N> AstNode for NodeList<N> {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::LIST
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        Self::can_cast(syntax.kind()).then(|| Self { syntax, _element: PhantomData })
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.syntax
    }

    fn into_syntax(self) -> SyntaxNode {
        self.syntax
    }
}

impl<N> Clone for NodeList<N> {
    fn clone(&self) -> Self {
        Self { syntax: self.syntax.clone(), _element: PhantomData }
    }
}

impl<N> PartialEq for NodeList<N> {
    fn eq(&self, other: &Self) -> bool {
        self.syntax == other.syntax
    }
}

impl<N> Eq for NodeList<N> {}

impl<N> fmt::Debug for NodeList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeList").field(&self.syntax).finish()
    }
}

impl<N> fmt::Display for NodeList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.syntax, f)
    }
}

pub struct NodeListModifier<N> {
    inner: NodeModifier,
    _element: PhantomData<fn() -> N>,
}

impl<N: AstNode> NodeListModifier<N> {
    #[track_caller]
    pub fn push(mut self, element: &N) -> Self {
        if let Err(err) = self.inner.push(element.syntax().green().clone()) {
            panic!("{err}");
        }
        self
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn insert(mut self, index: usize, element: &N) -> Self {
        if let Err(err) = self.inner.insert(index, element.syntax().green().clone()) {
            panic!("{err}");
        }
        self
    }

    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(mut self, index: usize) -> Self {
        if let Err(err) = self.inner.remove(index) {
            panic!("{err}");
        }
        self
    }

    pub fn apply(self) -> NodeList<N> {
        NodeList { syntax: self.inner.apply(), _element: PhantomData }
    }
}
