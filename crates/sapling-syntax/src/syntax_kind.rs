use crate::SyntaxSet;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    COMMA,
    COLON,
    SEMICOLON,
    ELLIPSIS,
    OPEN_PAREN,
    CLOSE_PAREN,
    EQUAL,
    PLUS,
    MINUS,
    ASTERISK,
    SLASH,

    RETURN_KEYWORD,
    IDENTIFIER,
    DECIMAL_INTEGER_LITERAL,
    STRING_LITERAL,
    EOF,

    MODULE_PART,
    RETURN_STATEMENT,
    EXPRESSION_STATEMENT,
    FUNCTION_CALL_EXPRESSION,
    POSITIONAL_ARGUMENT,
    NAMED_ARGUMENT,
    REST_ARGUMENT,
    BINARY_EXPRESSION,
    BRACED_EXPRESSION,
    SIMPLE_NAME_REFERENCE,
    QUALIFIED_NAME_REFERENCE,
    BASIC_LITERAL,
    LIST,
}

use SyntaxKind::*;

pub const EXPRESSIONS: SyntaxSet = SyntaxSet::new([
    FUNCTION_CALL_EXPRESSION,
    BINARY_EXPRESSION,
    BRACED_EXPRESSION,
    SIMPLE_NAME_REFERENCE,
    QUALIFIED_NAME_REFERENCE,
    BASIC_LITERAL,
]);
pub const FUNCTION_ARGUMENTS: SyntaxSet =
    SyntaxSet::new([POSITIONAL_ARGUMENT, NAMED_ARGUMENT, REST_ARGUMENT]);
pub const STATEMENTS: SyntaxSet = SyntaxSet::new([RETURN_STATEMENT, EXPRESSION_STATEMENT]);
pub const NAME_REFERENCES: SyntaxSet =
    SyntaxSet::new([SIMPLE_NAME_REFERENCE, QUALIFIED_NAME_REFERENCE]);
pub const BINARY_OPERATORS: SyntaxSet = SyntaxSet::new([PLUS, MINUS, ASTERISK, SLASH]);
pub const LITERALS: SyntaxSet = SyntaxSet::new([DECIMAL_INTEGER_LITERAL, STRING_LITERAL]);
pub const NODES: SyntaxSet = EXPRESSIONS
    .union(&FUNCTION_ARGUMENTS)
    .union(&STATEMENTS)
    .union(&SyntaxSet::new([MODULE_PART, LIST]));

impl SyntaxKind {
    pub const fn is_token(self) -> bool {
        (self as u16) < (MODULE_PART as u16)
    }

    pub const fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Fixed text of punctuation and keyword tokens.
    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            COMMA => ",",
            COLON => ":",
            SEMICOLON => ";",
            ELLIPSIS => "...",
            OPEN_PAREN => "(",
            CLOSE_PAREN => ")",
            EQUAL => "=",
            PLUS => "+",
            MINUS => "-",
            ASTERISK => "*",
            SLASH => "/",
            RETURN_KEYWORD => "return",
            _ => return None,
        })
    }

    /// The slot layout of a node kind.
    ///
    /// Token kinds and `LIST` have no declared slots; a list's length is only
    /// known per instance.
    pub const fn slots(self) -> &'static [SlotSpec] {
        match self {
            MODULE_PART => layouts::MODULE_PART,
            RETURN_STATEMENT => layouts::RETURN_STATEMENT,
            EXPRESSION_STATEMENT => layouts::EXPRESSION_STATEMENT,
            FUNCTION_CALL_EXPRESSION => layouts::FUNCTION_CALL_EXPRESSION,
            POSITIONAL_ARGUMENT => layouts::POSITIONAL_ARGUMENT,
            NAMED_ARGUMENT => layouts::NAMED_ARGUMENT,
            REST_ARGUMENT => layouts::REST_ARGUMENT,
            BINARY_EXPRESSION => layouts::BINARY_EXPRESSION,
            BRACED_EXPRESSION => layouts::BRACED_EXPRESSION,
            SIMPLE_NAME_REFERENCE => layouts::SIMPLE_NAME_REFERENCE,
            QUALIFIED_NAME_REFERENCE => layouts::QUALIFIED_NAME_REFERENCE,
            BASIC_LITERAL => layouts::BASIC_LITERAL,
            _ => &[],
        }
    }

    /// Number of slots every node of this kind has, `None` for lists.
    pub const fn arity(self) -> Option<usize> {
        match self {
            LIST => None,
            _ => Some(self.slots().len()),
        }
    }

    pub fn slot_names(self) -> impl ExactSizeIterator<Item = &'static str> {
        self.slots().iter().map(|slot| slot.name)
    }
}

mod layouts {
    use super::*;

    pub(super) const MODULE_PART: &[SlotSpec] =
        &[SlotSpec::list("statements", STATEMENTS), SlotSpec::token("eofToken", EOF)];
    pub(super) const RETURN_STATEMENT: &[SlotSpec] = &[
        SlotSpec::token("returnKeyword", RETURN_KEYWORD),
        SlotSpec::optional_node("expression", EXPRESSIONS),
        SlotSpec::token("semicolonToken", SEMICOLON),
    ];
    pub(super) const EXPRESSION_STATEMENT: &[SlotSpec] = &[
        SlotSpec::node("expression", EXPRESSIONS),
        SlotSpec::token("semicolonToken", SEMICOLON),
    ];
    pub(super) const FUNCTION_CALL_EXPRESSION: &[SlotSpec] = &[
        SlotSpec::node("functionName", NAME_REFERENCES),
        SlotSpec::token("openParenToken", OPEN_PAREN),
        SlotSpec::list("arguments", FUNCTION_ARGUMENTS),
        SlotSpec::token("closeParenToken", CLOSE_PAREN),
    ];
    pub(super) const POSITIONAL_ARGUMENT: &[SlotSpec] = &[
        SlotSpec::optional_token("leadingComma", COMMA),
        SlotSpec::node("expression", EXPRESSIONS),
    ];
    pub(super) const NAMED_ARGUMENT: &[SlotSpec] = &[
        SlotSpec::optional_token("leadingComma", COMMA),
        SlotSpec::node("argumentName", SyntaxSet::new([SyntaxKind::SIMPLE_NAME_REFERENCE])),
        SlotSpec::token("equalsToken", EQUAL),
        SlotSpec::node("expression", EXPRESSIONS),
    ];
    pub(super) const REST_ARGUMENT: &[SlotSpec] = &[
        SlotSpec::token("leadingComma", COMMA),
        SlotSpec::token("ellipsis", ELLIPSIS),
        SlotSpec::node("expression", EXPRESSIONS),
    ];
    pub(super) const BINARY_EXPRESSION: &[SlotSpec] = &[
        SlotSpec::node("lhsExpr", EXPRESSIONS),
        SlotSpec::token_of("operator", BINARY_OPERATORS),
        SlotSpec::node("rhsExpr", EXPRESSIONS),
    ];
    pub(super) const BRACED_EXPRESSION: &[SlotSpec] = &[
        SlotSpec::token("openParen", OPEN_PAREN),
        SlotSpec::node("expression", EXPRESSIONS),
        SlotSpec::token("closeParen", CLOSE_PAREN),
    ];
    pub(super) const SIMPLE_NAME_REFERENCE: &[SlotSpec] = &[SlotSpec::token("name", IDENTIFIER)];
    pub(super) const QUALIFIED_NAME_REFERENCE: &[SlotSpec] = &[
        SlotSpec::token("modulePrefix", IDENTIFIER),
        SlotSpec::token("colon", COLON),
        SlotSpec::token("identifier", IDENTIFIER),
    ];
    pub(super) const BASIC_LITERAL: &[SlotSpec] = &[SlotSpec::token_of("literalToken", LITERALS)];
}

/// What a slot may hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotShape {
    /// A token whose kind is in the set.
    Token(SyntaxSet),
    /// A node whose kind is in the set.
    Node(SyntaxSet),
    /// A `LIST` node whose elements' kinds are in the set.
    List(SyntaxSet),
}

/// A named, fixed-index child position of a node kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub shape: SlotShape,
    pub optional: bool,
}

impl SlotSpec {
    const fn token(name: &'static str, kind: SyntaxKind) -> Self {
        Self::token_of(name, SyntaxSet::new([kind]))
    }

    const fn token_of(name: &'static str, kinds: SyntaxSet) -> Self {
        Self { name, shape: SlotShape::Token(kinds), optional: false }
    }

    const fn optional_token(name: &'static str, kind: SyntaxKind) -> Self {
        Self { name, shape: SlotShape::Token(SyntaxSet::new([kind])), optional: true }
    }

    const fn node(name: &'static str, kinds: SyntaxSet) -> Self {
        Self { name, shape: SlotShape::Node(kinds), optional: false }
    }

    const fn optional_node(name: &'static str, kinds: SyntaxSet) -> Self {
        Self { name, shape: SlotShape::Node(kinds), optional: true }
    }

    const fn list(name: &'static str, kinds: SyntaxSet) -> Self {
        Self { name, shape: SlotShape::List(kinds), optional: false }
    }

    /// Element layout of a list that is not held by any slot.
    pub(crate) const ANY_LIST_ELEMENT: Self =
        Self { name: "element", shape: SlotShape::Node(NODES), optional: false };

    /// The layout of an element inside a list slot.
    pub(crate) const fn list_element(self) -> Option<Self> {
        match self.shape {
            SlotShape::List(kinds) => {
                Some(Self { name: self.name, shape: SlotShape::Node(kinds), optional: false })
            }
            _ => None,
        }
    }
}
