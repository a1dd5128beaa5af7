//! The single place where green nodes come into existence.
//!
//! Every constructor checks its slots against the kind's layout and panics
//! when they do not fit: a mismatch is a bug in the parser or in the
//! modification engine, never a property of the source text.

use text_size::TextSize;

use crate::ast::{
    AstNode, BasicLiteral, BinaryExpression, BracedExpression, Expression, ExpressionStatement,
    FunctionArgument, FunctionCallExpression, ModulePart, NameReference, NamedArgument, NodeList,
    PositionalArgument, QualifiedNameReference, RestArgument, ReturnStatement,
    SimpleNameReference, Statement,
};
use crate::SyntaxKind::LIST;
use crate::{
    GreenNode, GreenSlot, GreenToken, GreenTrivia, Slot, SlotError, SlotShape, SlotSpec,
    SyntaxDiagnostic, SyntaxKind, SyntaxNode, SyntaxSet, SyntaxToken, TriviaPiece, TriviaPieceKind,
};

/// Checks a complete slot vector against the layout of `kind`.
pub(crate) fn check_slots(kind: SyntaxKind, slots: &[GreenSlot]) -> Result<(), SlotError> {
    if kind.is_token() {
        return Err(SlotError::NotANode { kind });
    }

    if kind == LIST {
        return slots
            .iter()
            .try_for_each(|slot| check_slot(kind, SlotSpec::ANY_LIST_ELEMENT, slot));
    }

    let layout = kind.slots();
    if layout.len() != slots.len() {
        return Err(SlotError::ArityMismatch { kind, expected: layout.len(), found: slots.len() });
    }
    layout.iter().zip(slots).try_for_each(|(&spec, slot)| check_slot(kind, spec, slot))
}

/// Checks one slot value against its spec.
pub(crate) fn check_slot(
    kind: SyntaxKind,
    spec: SlotSpec,
    slot: &GreenSlot,
) -> Result<(), SlotError> {
    let unexpected = |expected: SyntaxSet, found: SyntaxKind| {
        if expected.contains(found) {
            Ok(())
        } else {
            Err(SlotError::UnexpectedKind { kind, slot: spec.name, expected, found })
        }
    };
    let shape_mismatch = |expected, found| -> Result<(), SlotError> {
        Err(SlotError::ShapeMismatch { kind, slot: spec.name, expected, found })
    };

    match (spec.shape, slot) {
        (_, Slot::Absent) if spec.optional => Ok(()),
        (_, Slot::Absent) => Err(SlotError::RequiredSlotAbsent { kind, slot: spec.name }),
        (SlotShape::Token(kinds), Slot::Token(token)) => unexpected(kinds, token.kind()),
        (SlotShape::Node(kinds), Slot::Node(node)) => unexpected(kinds, node.kind()),
        (SlotShape::List(kinds), Slot::Node(node)) => {
            unexpected(SyntaxSet::new([LIST]), node.kind())?;
            node.slots().try_for_each(|element| match element {
                Slot::Node(element) => unexpected(kinds, element.kind()),
                Slot::Token(_) => shape_mismatch("node", "token"),
                Slot::Absent => Err(SlotError::RequiredSlotAbsent { kind: LIST, slot: spec.name }),
            })
        }
        (SlotShape::Token(_), Slot::Node(_)) => shape_mismatch("token", "node"),
        (SlotShape::Node(_) | SlotShape::List(_), Slot::Token(_)) => {
            shape_mismatch("node", "token")
        }
    }
}

/// Builds a node of `kind` from its slots.
///
/// # Panics
///
/// Panics when the slots do not match the layout of `kind`.
#[track_caller]
pub fn create_node(kind: SyntaxKind, slots: Vec<GreenSlot>) -> GreenNode {
    create_node_with_diagnostics(kind, slots, Vec::new())
}

#[track_caller]
pub fn create_node_with_diagnostics(
    kind: SyntaxKind,
    slots: Vec<GreenSlot>,
    diagnostics: Vec<SyntaxDiagnostic>,
) -> GreenNode {
    match try_create_node(kind, slots, diagnostics) {
        Ok(node) => node,
        Err(err) => panic!("cannot create {kind:?}: {err}"),
    }
}

/// Like [`create_node_with_diagnostics`], but hands a misfit back to the
/// caller instead of panicking.
pub(crate) fn try_create_node(
    kind: SyntaxKind,
    slots: Vec<GreenSlot>,
    diagnostics: Vec<SyntaxDiagnostic>,
) -> Result<GreenNode, SlotError> {
    check_slots(kind, &slots)?;
    Ok(GreenNode::new(kind, slots, diagnostics))
}

/// A `LIST` node holding `elements` in order.
pub fn create_list(elements: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    create_node(LIST, elements.into_iter().map(Slot::Node).collect())
}

#[track_caller]
pub fn create_green_token(kind: SyntaxKind, text: &str) -> GreenToken {
    create_green_token_with_diagnostics(kind, text, Vec::new())
}

#[track_caller]
pub fn create_green_token_with_diagnostics(
    kind: SyntaxKind,
    text: &str,
    diagnostics: Vec<SyntaxDiagnostic>,
) -> GreenToken {
    assert!(kind.is_token(), "{kind:?} is not a token kind");
    GreenToken::new(
        kind,
        text.into(),
        GreenTrivia::empty(),
        GreenTrivia::empty(),
        diagnostics,
        false,
    )
}

/// A token with trivia pieces on either side; the full text is the
/// concatenation of all pieces and `text`.
#[track_caller]
pub fn create_green_token_with_trivia(
    kind: SyntaxKind,
    leading: &[(TriviaPieceKind, &str)],
    text: &str,
    trailing: &[(TriviaPieceKind, &str)],
) -> GreenToken {
    assert!(kind.is_token(), "{kind:?} is not a token kind");

    let mut full_text = String::new();
    let leading = push_trivia(&mut full_text, leading);
    full_text.push_str(text);
    let trailing = push_trivia(&mut full_text, trailing);

    GreenToken::new(kind, full_text.into(), leading, trailing, Vec::new(), false)
}

fn push_trivia(full_text: &mut String, pieces: &[(TriviaPieceKind, &str)]) -> GreenTrivia {
    let pieces: Vec<_> = pieces
        .iter()
        .map(|&(kind, text)| {
            full_text.push_str(text);
            TriviaPiece::new(kind, TextSize::of(text))
        })
        .collect();
    GreenTrivia::new(&pieces)
}

/// A zero-width token standing in for one the source lacks.
#[track_caller]
pub fn create_missing_green_token(kind: SyntaxKind, diagnostic: SyntaxDiagnostic) -> GreenToken {
    assert!(kind.is_token(), "{kind:?} is not a token kind");
    GreenToken::new(
        kind,
        "".into(),
        GreenTrivia::empty(),
        GreenTrivia::empty(),
        vec![diagnostic],
        true,
    )
}

/// A detached token, for handing to typed constructors and modifiers.
#[track_caller]
pub fn create_token(kind: SyntaxKind, text: &str) -> SyntaxToken {
    SyntaxToken::new_detached(create_green_token(kind, text))
}

/// A detached punctuation or keyword token with its fixed text.
#[track_caller]
pub fn create_fixed_token(kind: SyntaxKind) -> SyntaxToken {
    match kind.fixed_text() {
        Some(text) => create_token(kind, text),
        None => panic!("{kind:?} has no fixed text"),
    }
}

#[track_caller]
pub fn create_token_with_trivia(
    kind: SyntaxKind,
    leading: &[(TriviaPieceKind, &str)],
    text: &str,
    trailing: &[(TriviaPieceKind, &str)],
) -> SyntaxToken {
    SyntaxToken::new_detached(create_green_token_with_trivia(kind, leading, text, trailing))
}

#[track_caller]
pub fn create_missing_token(kind: SyntaxKind, diagnostic: SyntaxDiagnostic) -> SyntaxToken {
    SyntaxToken::new_detached(create_missing_green_token(kind, diagnostic))
}

fn token(token: &SyntaxToken) -> GreenSlot {
    Slot::Token(token.green().clone())
}

fn optional_token(token: Option<&SyntaxToken>) -> GreenSlot {
    token.map_or(Slot::Absent, self::token)
}

fn node<N: AstNode>(node: &N) -> GreenSlot {
    Slot::Node(node.syntax().green().clone())
}

fn optional_node<N: AstNode>(node: Option<&N>) -> GreenSlot {
    node.map_or(Slot::Absent, self::node)
}

#[track_caller]
fn root<N: AstNode>(kind: SyntaxKind, slots: Vec<GreenSlot>) -> N {
    let syntax = SyntaxNode::new_root(create_node(kind, slots));
    N::cast(syntax).expect("created node has the requested kind")
}

#[track_caller]
pub fn create_module_part(statements: &NodeList<Statement>, eof: &SyntaxToken) -> ModulePart {
    root(SyntaxKind::MODULE_PART, vec![node(statements), token(eof)])
}

#[track_caller]
pub fn create_return_statement(
    return_keyword: &SyntaxToken,
    expression: Option<&Expression>,
    semicolon: &SyntaxToken,
) -> ReturnStatement {
    root(
        SyntaxKind::RETURN_STATEMENT,
        vec![token(return_keyword), optional_node(expression), token(semicolon)],
    )
}

#[track_caller]
pub fn create_expression_statement(
    expression: &Expression,
    semicolon: &SyntaxToken,
) -> ExpressionStatement {
    root(SyntaxKind::EXPRESSION_STATEMENT, vec![node(expression), token(semicolon)])
}

#[track_caller]
pub fn create_function_call_expression(
    function_name: &NameReference,
    open_paren: &SyntaxToken,
    arguments: &NodeList<FunctionArgument>,
    close_paren: &SyntaxToken,
) -> FunctionCallExpression {
    root(
        SyntaxKind::FUNCTION_CALL_EXPRESSION,
        vec![node(function_name), token(open_paren), node(arguments), token(close_paren)],
    )
}

#[track_caller]
pub fn create_positional_argument(
    leading_comma: Option<&SyntaxToken>,
    expression: &Expression,
) -> PositionalArgument {
    root(SyntaxKind::POSITIONAL_ARGUMENT, vec![optional_token(leading_comma), node(expression)])
}

#[track_caller]
pub fn create_named_argument(
    leading_comma: Option<&SyntaxToken>,
    argument_name: &SimpleNameReference,
    equals: &SyntaxToken,
    expression: &Expression,
) -> NamedArgument {
    root(
        SyntaxKind::NAMED_ARGUMENT,
        vec![optional_token(leading_comma), node(argument_name), token(equals), node(expression)],
    )
}

#[track_caller]
pub fn create_rest_argument(
    leading_comma: &SyntaxToken,
    ellipsis: &SyntaxToken,
    expression: &Expression,
) -> RestArgument {
    root(SyntaxKind::REST_ARGUMENT, vec![token(leading_comma), token(ellipsis), node(expression)])
}

#[track_caller]
pub fn create_binary_expression(
    lhs: &Expression,
    operator: &SyntaxToken,
    rhs: &Expression,
) -> BinaryExpression {
    root(SyntaxKind::BINARY_EXPRESSION, vec![node(lhs), token(operator), node(rhs)])
}

#[track_caller]
pub fn create_braced_expression(
    open_paren: &SyntaxToken,
    expression: &Expression,
    close_paren: &SyntaxToken,
) -> BracedExpression {
    root(
        SyntaxKind::BRACED_EXPRESSION,
        vec![token(open_paren), node(expression), token(close_paren)],
    )
}

#[track_caller]
pub fn create_simple_name_reference(name: &SyntaxToken) -> SimpleNameReference {
    root(SyntaxKind::SIMPLE_NAME_REFERENCE, vec![token(name)])
}

#[track_caller]
pub fn create_qualified_name_reference(
    module_prefix: &SyntaxToken,
    colon: &SyntaxToken,
    identifier: &SyntaxToken,
) -> QualifiedNameReference {
    root(
        SyntaxKind::QUALIFIED_NAME_REFERENCE,
        vec![token(module_prefix), token(colon), token(identifier)],
    )
}

#[track_caller]
pub fn create_basic_literal(literal: &SyntaxToken) -> BasicLiteral {
    root(SyntaxKind::BASIC_LITERAL, vec![token(literal)])
}

/// A detached typed list of `elements`.
pub fn create_node_list<N: AstNode>(elements: &[N]) -> NodeList<N> {
    let green = create_list(elements.iter().map(|element| element.syntax().green().clone()));
    NodeList::cast(SyntaxNode::new_root(green)).expect("created node is a list")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::FUNCTION_ARGUMENTS;
    use crate::SyntaxKind::*;

    fn identifier(text: &str) -> GreenSlot {
        Slot::Token(create_green_token(IDENTIFIER, text))
    }

    fn name_ref(text: &str) -> GreenSlot {
        Slot::Node(create_node(SIMPLE_NAME_REFERENCE, vec![identifier(text)]))
    }

    #[rstest]
    #[case::token_kind(COMMA, vec![], SlotError::NotANode { kind: COMMA })]
    #[case::too_few(
        REST_ARGUMENT,
        vec![Slot::Token(create_green_token(COMMA, ","))],
        SlotError::ArityMismatch { kind: REST_ARGUMENT, expected: 3, found: 1 },
    )]
    #[case::required_absent(
        SIMPLE_NAME_REFERENCE,
        vec![Slot::Absent],
        SlotError::RequiredSlotAbsent { kind: SIMPLE_NAME_REFERENCE, slot: "name" },
    )]
    #[case::node_for_token(
        SIMPLE_NAME_REFERENCE,
        vec![name_ref("x")],
        SlotError::ShapeMismatch {
            kind: SIMPLE_NAME_REFERENCE,
            slot: "name",
            expected: "token",
            found: "node",
        },
    )]
    #[case::wrong_token_kind(
        SIMPLE_NAME_REFERENCE,
        vec![Slot::Token(create_green_token(COMMA, ","))],
        SlotError::UnexpectedKind {
            kind: SIMPLE_NAME_REFERENCE,
            slot: "name",
            expected: SyntaxSet::new([IDENTIFIER]),
            found: COMMA,
        },
    )]
    fn rejected_layouts(
        #[case] kind: SyntaxKind,
        #[case] slots: Vec<GreenSlot>,
        #[case] expected: SlotError,
    ) {
        assert_eq!(check_slots(kind, &slots), Err(expected));
    }

    #[test]
    fn optional_slots_accept_absent() {
        let slots = vec![Slot::Absent, name_ref("x")];
        assert_eq!(check_slots(POSITIONAL_ARGUMENT, &slots), Ok(()));
    }

    #[test]
    fn list_slot_checks_element_kinds() {
        let arguments = create_list([create_node(
            POSITIONAL_ARGUMENT,
            vec![Slot::Absent, name_ref("x")],
        )]);
        let callee = name_ref("f");
        let slots = vec![
            callee.clone(),
            Slot::Token(create_green_token(OPEN_PAREN, "(")),
            Slot::Node(arguments),
            Slot::Token(create_green_token(CLOSE_PAREN, ")")),
        ];
        assert_eq!(check_slots(FUNCTION_CALL_EXPRESSION, &slots), Ok(()));

        let statements = create_list([create_node(
            EXPRESSION_STATEMENT,
            vec![name_ref("x"), Slot::Token(create_green_token(SEMICOLON, ";"))],
        )]);
        let slots = vec![
            callee,
            Slot::Token(create_green_token(OPEN_PAREN, "(")),
            Slot::Node(statements),
            Slot::Token(create_green_token(CLOSE_PAREN, ")")),
        ];
        assert_eq!(
            check_slots(FUNCTION_CALL_EXPRESSION, &slots),
            Err(SlotError::UnexpectedKind {
                kind: FUNCTION_CALL_EXPRESSION,
                slot: "arguments",
                expected: FUNCTION_ARGUMENTS,
                found: EXPRESSION_STATEMENT,
            })
        );
    }

    #[test]
    #[should_panic(expected = "cannot create REST_ARGUMENT: REST_ARGUMENT expects 3 slots, found 2")]
    fn arity_mismatch_panics() {
        create_node(
            REST_ARGUMENT,
            vec![Slot::Token(create_green_token(COMMA, ",")), name_ref("x")],
        );
    }

    #[test]
    fn token_with_trivia() {
        let token = create_green_token_with_trivia(
            RETURN_KEYWORD,
            &[(TriviaPieceKind::Newline, "\n"), (TriviaPieceKind::Whitespace, "  ")],
            "return",
            &[(TriviaPieceKind::Whitespace, " ")],
        );
        assert_eq!(token.text(), "\n  return ");
        assert_eq!(token.text_trimmed(), "return");
        assert_eq!(token.leading().pieces().len(), 2);
        assert_eq!(token.trailing().len(), TextSize::new(1));
    }

    #[test]
    fn missing_token_is_zero_width() {
        let token = create_missing_token(
            SEMICOLON,
            SyntaxDiagnostic::error("E0001", "expected `;`"),
        );
        assert!(token.is_missing());
        assert_eq!(token.width(), TextSize::new(0));
        assert_eq!(token.green().diagnostics().len(), 1);
    }

    #[test]
    fn typed_constructors() {
        let name = create_simple_name_reference(&create_token(IDENTIFIER, "x"));
        let rest = create_rest_argument(
            &create_fixed_token(COMMA),
            &create_fixed_token(ELLIPSIS),
            &name.into(),
        );
        assert_eq!(rest.syntax().text(), ",...x");
        assert!(rest.syntax().is_root());
    }
}
