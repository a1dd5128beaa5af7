//! Small sum types shared by the green and red layers.

use std::fmt;

/// The content of one child slot: a node, a token, or nothing.
///
/// `Absent` marks optional syntax that did not occur in the source. It keeps
/// its slot index so that slot positions are stable per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot<N, T> {
    Node(N),
    Token(T),
    Absent,
}

impl<N, T> Slot<N, T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn into_node(self) -> Option<N> {
        match self {
            Slot::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Slot::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            Slot::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            Slot::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Slot<&N, &T> {
        match self {
            Slot::Node(node) => Slot::Node(node),
            Slot::Token(token) => Slot::Token(token),
            Slot::Absent => Slot::Absent,
        }
    }

    /// Drops the absent state, keeping present elements.
    pub fn into_element(self) -> Option<NodeOrToken<N, T>> {
        match self {
            Slot::Node(node) => Some(NodeOrToken::Node(node)),
            Slot::Token(token) => Some(NodeOrToken::Token(token)),
            Slot::Absent => None,
        }
    }
}

impl<N, T> From<NodeOrToken<N, T>> for Slot<N, T> {
    fn from(element: NodeOrToken<N, T>) -> Self {
        match element {
            NodeOrToken::Node(node) => Slot::Node(node),
            NodeOrToken::Token(token) => Slot::Token(token),
        }
    }
}

impl<N, T> From<Option<NodeOrToken<N, T>>> for Slot<N, T> {
    fn from(element: Option<NodeOrToken<N, T>>) -> Self {
        element.map_or(Slot::Absent, Slot::from)
    }
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    pub fn map<F: Fn(T) -> U, U>(self, f: F) -> TokenAtOffset<U> {
        match self {
            TokenAtOffset::None => TokenAtOffset::None,
            TokenAtOffset::Single(it) => TokenAtOffset::Single(f(it)),
            TokenAtOffset::Between(l, r) => TokenAtOffset::Between(f(l), f(r)),
        }
    }

    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, _) => Some(left),
        }
    }
}

impl<T> Iterator for TokenAtOffset<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::None) {
            Self::None => None,
            Self::Single(node) => Some(node),
            Self::Between(left, right) => {
                *self = Self::Single(right);
                Some(left)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::None => (0, Some(0)),
            Self::Single(_) => (1, Some(1)),
            Self::Between(_, _) => (2, Some(2)),
        }
    }
}

impl<T> ExactSizeIterator for TokenAtOffset<T> {}
