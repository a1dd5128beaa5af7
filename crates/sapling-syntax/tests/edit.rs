use rstest::rstest;
use sapling_syntax::SyntaxKind::*;
use sapling_syntax::ast::*;
use sapling_syntax::factory::*;
use sapling_syntax::{
    GreenSlot, GreenToken, NodeCache, Slot, SlotError, SyntaxDiagnostic, SyntaxNode, SyntaxToken,
    TreeModifier,
};
use text_size::TextSize;

fn name(text: &str) -> Expression {
    create_simple_name_reference(&create_token(IDENTIFIER, text)).into()
}

fn rest_argument() -> RestArgument {
    create_rest_argument(&create_fixed_token(COMMA), &create_fixed_token(ELLIPSIS), &name("x"))
}

/// `f(a, b, ...xs)` wrapped in a statement list, deep enough to have
/// siblings off the edited spine at every level.
fn module() -> ModulePart {
    let arguments = create_node_list::<FunctionArgument>(&[
        create_positional_argument(None, &name("a")).into(),
        create_positional_argument(Some(&create_fixed_token(COMMA)), &name("b")).into(),
        create_rest_argument(&create_fixed_token(COMMA), &create_fixed_token(ELLIPSIS), &name("xs"))
            .into(),
    ]);
    let call = create_function_call_expression(
        &create_simple_name_reference(&create_token(IDENTIFIER, "f")).into(),
        &create_fixed_token(OPEN_PAREN),
        &arguments,
        &create_fixed_token(CLOSE_PAREN),
    );
    let first = create_expression_statement(&call.into(), &create_fixed_token(SEMICOLON));
    let second = create_return_statement(
        &create_token(RETURN_KEYWORD, "return "),
        Some(&name("r")),
        &create_fixed_token(SEMICOLON),
    );
    let statements = create_node_list::<Statement>(&[first.into(), second.into()]);
    create_module_part(&statements, &create_token(EOF, ""))
}

fn rest_in(module: &ModulePart) -> RestArgument {
    let Some(Statement::Expression(statement)) = module.statements().get(0) else {
        panic!("first statement is an expression statement")
    };
    let Expression::FunctionCall(call) = statement.expression() else {
        panic!("statement holds a call")
    };
    let Some(FunctionArgument::Rest(rest)) = call.arguments().get(2) else {
        panic!("third argument is a rest argument")
    };
    rest
}

#[test]
fn rest_argument_end_to_end() {
    let rest = rest_argument();
    let syntax = rest.syntax();

    let ellipsis = syntax.child_in_bucket(1).into_token().unwrap();
    assert_eq!(ellipsis.kind(), ELLIPSIS);
    assert_eq!(ellipsis.text(), "...");
    assert_eq!(syntax.child_names(), ["leadingComma", "ellipsis", "expression"]);

    let edited = rest.modify().with_expression(&name("y")).apply();

    assert_eq!(edited.expression().to_string(), "y");
    assert!(edited.leading_comma().green().ptr_eq(rest.leading_comma().green()));
    assert!(edited.ellipsis().green().ptr_eq(rest.ellipsis().green()));
    assert!(!edited.syntax().green().ptr_eq(rest.syntax().green()));
    assert_eq!(edited.to_string(), ",...y");
}

#[test]
fn identical_edit_is_free() {
    let rest = rest_argument();

    let edited = rest
        .modify()
        .with_leading_comma(&rest.leading_comma())
        .with_expression(&rest.expression())
        .apply();
    assert!(edited.syntax().ptr_eq(rest.syntax()));

    let same = rest.syntax().replace_slot(1, rest.syntax().green().slot(1).clone()).unwrap();
    assert!(same.ptr_eq(rest.syntax()));
}

#[test]
fn replace_all_slots_at_once() {
    let rest = rest_argument();
    let (comma, ellipsis, expression) = (rest.leading_comma(), rest.ellipsis(), rest.expression());

    let same = rest.replace_all(&comma, &ellipsis, &expression).unwrap();
    assert!(same.syntax().ptr_eq(rest.syntax()));

    let spaced = create_token(COMMA, ", ");
    let edited = rest.replace_all(&spaced, &ellipsis, &name("ys")).unwrap();
    assert_eq!(edited.to_string(), ", ...ys");
    assert!(edited.ellipsis().green().ptr_eq(ellipsis.green()));

    let err = rest.replace_all(&ellipsis, &ellipsis, &expression).unwrap_err();
    assert!(matches!(err, SlotError::UnexpectedKind { slot: "leadingComma", found: ELLIPSIS, .. }));
}

#[test]
fn value_equal_edit_is_not_free() {
    let rest = rest_argument();
    let edited = rest.modify().with_ellipsis(&create_fixed_token(ELLIPSIS)).apply();

    assert!(!edited.syntax().ptr_eq(rest.syntax()));
    assert_eq!(edited.to_string(), rest.to_string());
}

#[test]
fn deep_edit_shares_off_spine_subtrees() {
    let module = module();
    let rest = rest_in(&module);
    let edited = rest.modify().with_expression(&name("ys")).apply();
    let new_root = edited.syntax().root();

    assert_eq!(new_root.text(), "f(a,b,...ys);return r;");
    assert_eq!(module.syntax().text(), "f(a,b,...xs);return r;");

    // Walk the old and new spines in lockstep: every slot that is not on the
    // path to the edit must be the very same green value.
    let spine: Vec<_> = edited.syntax().ancestors().skip(1).map(|node| node.kind()).collect();
    assert_eq!(spine, [LIST, FUNCTION_CALL_EXPRESSION, EXPRESSION_STATEMENT, LIST, MODULE_PART]);

    let mut old = module.syntax().clone();
    let mut new = new_root.clone();
    let path: Vec<usize> = {
        let mut path: Vec<_> =
            edited.syntax().ancestors().filter_map(|node| node.slot_index()).collect();
        path.reverse();
        path
    };
    assert_eq!(path, [0, 0, 0, 2, 2]);

    for &index in &path {
        assert!(!old.green().ptr_eq(new.green()));
        for slot in 0..old.slot_count() {
            if slot != index {
                assert!(
                    old.green().slot(slot).ptr_eq(new.green().slot(slot)),
                    "{:?} slot {slot} was rebuilt",
                    old.kind()
                );
            }
        }
        old = old.child_node(index).unwrap();
        new = new.child_node(index).unwrap();
    }
}

#[test]
fn offsets_after_edit() {
    let module = module();
    let rest = rest_in(&module);
    let edited = rest.modify().with_expression(&name("longer")).apply();

    let root = edited.syntax().root();
    let statements = root.child_node(0).unwrap();
    let second = statements.child_node(1).unwrap();
    assert_eq!(second.offset(), TextSize::new(17));
    assert_eq!(second.text(), "return r;");
    assert_eq!(edited.syntax().offset(), TextSize::new(5));
}

#[test]
fn stale_handles_stay_readable() {
    let module = module();
    let rest = rest_in(&module);
    let call_before = rest.syntax().parent().unwrap().parent().unwrap().clone();

    let edited = rest.modify().with_expression(&name("ys")).apply();

    assert_eq!(call_before.kind(), FUNCTION_CALL_EXPRESSION);
    assert_eq!(call_before.text(), "f(a,b,...xs)");
    assert_eq!(rest.expression().to_string(), "xs");
    assert_eq!(rest.syntax().root().text(), "f(a,b,...xs);return r;");
    assert!(rest.syntax().root().ptr_eq(module.syntax()));

    let call_after = edited.syntax().parent().unwrap().parent().unwrap();
    assert_eq!(call_after.text(), "f(a,b,...ys)");
    assert_eq!(call_before.offset(), call_after.offset());
    assert_ne!(&call_before, call_after);
}

#[test]
fn staged_edits_rebuild_once() {
    let module = module();
    let call = rest_in(&module).syntax().parent().unwrap().parent().unwrap().clone();
    let call = FunctionCallExpression::cast(call).unwrap();

    let edited = call
        .modify()
        .with_function_name(&create_simple_name_reference(&create_token(IDENTIFIER, "g")).into())
        .with_close_paren_token(&create_token(CLOSE_PAREN, " )"))
        .apply();

    assert_eq!(edited.to_string(), "g(a,b,...xs )");
    assert!(edited.open_paren_token().green().ptr_eq(call.open_paren_token().green()));
    assert!(edited.arguments().syntax().green().ptr_eq(call.arguments().syntax().green()));
}

#[test]
fn list_edits() {
    let module = module();
    let arguments = rest_in(&module).syntax().parent().unwrap().clone();
    let arguments = NodeList::<FunctionArgument>::cast(arguments).unwrap();

    let extra: FunctionArgument =
        create_positional_argument(Some(&create_fixed_token(COMMA)), &name("c")).into();
    let edited = arguments.modify().insert(2, &extra).remove(0).apply();

    assert_eq!(edited.syntax().root().text(), "f(,b,c,...xs);return r;");
    assert_eq!(edited.len(), 3);
    let moved = edited.get(0).unwrap();
    assert!(moved.syntax().green().ptr_eq(arguments.get(1).unwrap().syntax().green()));
}

#[rstest]
#[case::out_of_range(
    7,
    GreenSlot::Absent,
    SlotError::SlotOutOfRange { kind: REST_ARGUMENT, index: 7, len: 3 },
)]
#[case::required_absent(
    2,
    GreenSlot::Absent,
    SlotError::RequiredSlotAbsent { kind: REST_ARGUMENT, slot: "expression" },
)]
#[case::token_for_node(
    2,
    Slot::Token(create_green_token(IDENTIFIER, "y")),
    SlotError::ShapeMismatch {
        kind: REST_ARGUMENT,
        slot: "expression",
        expected: "node",
        found: "token",
    },
)]
#[case::wrong_node_kind(
    2,
    Slot::Node(rest_argument().syntax().green().clone()),
    SlotError::UnexpectedKind {
        kind: REST_ARGUMENT,
        slot: "expression",
        expected: sapling_syntax::EXPRESSIONS,
        found: REST_ARGUMENT,
    },
)]
fn invalid_replacements_are_reported(
    #[case] index: usize,
    #[case] value: GreenSlot,
    #[case] expected: SlotError,
) {
    let rest = rest_argument();
    assert_eq!(rest.syntax().replace_slot(index, value), Err(expected));
}

#[test]
fn slot_error_messages() {
    let rest = rest_argument();
    let err = rest.syntax().replace_slot(0, GreenSlot::Absent).unwrap_err();
    assert_eq!(
        err.to_string(),
        "slot `leadingComma` of REST_ARGUMENT is required and cannot be absent"
    );
}

#[test]
fn optional_slot_can_be_cleared() {
    let argument = create_positional_argument(Some(&create_fixed_token(COMMA)), &name("a"));
    let cleared = argument.syntax().replace_slot(0, GreenSlot::Absent).unwrap();

    assert!(cleared.child_in_bucket(0).is_absent());
    assert_eq!(cleared.text(), "a");
}

#[test]
fn replace_with_whole_node() {
    let module = module();
    let rest = rest_in(&module);
    let name = rest.expression();

    let literal = create_basic_literal(&create_token(DECIMAL_INTEGER_LITERAL, "42"));
    let replaced = name.syntax().replace_with(literal.syntax().green().clone()).unwrap();

    assert_eq!(replaced.kind(), BASIC_LITERAL);
    assert_eq!(replaced.root().text(), "f(a,b,...42);return r;");

    let err = name.syntax().replace_with(rest_argument().syntax().green().clone()).unwrap_err();
    assert!(matches!(err, SlotError::UnexpectedKind { found: REST_ARGUMENT, .. }));
}

#[test]
fn token_replace_with() {
    let module = module();
    let keyword = module.syntax().first_token().unwrap();
    assert_eq!(keyword.text(), "f");

    let renamed = keyword.replace_with(create_green_token(IDENTIFIER, "print")).unwrap();
    assert_eq!(renamed.parent().unwrap().kind(), SIMPLE_NAME_REFERENCE);
    assert_eq!(renamed.ancestors().last().unwrap().text(), "print(a,b,...xs);return r;");

    let err = keyword.replace_with(create_green_token(COMMA, ",")).unwrap_err();
    assert!(matches!(err, SlotError::UnexpectedKind { slot: "name", .. }));
}

#[test]
fn rebuilt_spine_drops_own_diagnostics() {
    let flagged = create_node_with_diagnostics(
        POSITIONAL_ARGUMENT,
        vec![Slot::Absent, Slot::Node(name("a").syntax().green().clone())],
        vec![SyntaxDiagnostic::warning("W0002", "unused argument")],
    );
    let keep = create_node_with_diagnostics(
        POSITIONAL_ARGUMENT,
        vec![
            Slot::Token(create_green_token(COMMA, ",")),
            Slot::Node(name("b").syntax().green().clone()),
        ],
        vec![SyntaxDiagnostic::warning("W0003", "shadowed argument")],
    );
    let list = SyntaxNode::new_root(create_list([flagged, keep]));
    assert_eq!(list.diagnostics().len(), 2);

    let first = list.child_node(0).unwrap();
    let expression = first.child_node(1).unwrap();
    let edited = expression.replace_with(name("z").syntax().green().clone()).unwrap();

    let diagnostics = edited.root().diagnostics();
    let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, ["W0003"]);
}

#[test]
fn cache_feeds_the_factory() {
    let cache = NodeCache::new();
    let x = || {
        cache.node(SIMPLE_NAME_REFERENCE, vec![Slot::Token(cache.token(IDENTIFIER, "x"))])
    };
    let list = SyntaxNode::new_root(create_list([
        cache.node(POSITIONAL_ARGUMENT, vec![Slot::Absent, Slot::Node(x())]),
        cache.node(
            POSITIONAL_ARGUMENT,
            vec![Slot::Token(cache.token(COMMA, ",")), Slot::Node(x())],
        ),
    ]));

    let a = list.child_node(0).unwrap().child_node(1).unwrap();
    let b = list.child_node(1).unwrap().child_node(1).unwrap();
    assert!(a.green().ptr_eq(b.green()));
    assert_ne!(a.offset(), b.offset());
    assert_eq!(cache.stats().hits, 2);
}

struct Uppercase;

impl TreeModifier for Uppercase {
    fn modify_token(&mut self, token: &SyntaxToken) -> GreenToken {
        if token.kind() == IDENTIFIER && token.text() == "r" {
            create_green_token(IDENTIFIER, "R")
        } else {
            token.green().clone()
        }
    }
}

#[test]
fn tree_modifier_on_a_subtree() {
    let module = module();
    let statements = module.statements();
    let second = statements.get(1).unwrap();

    let rewritten = second.syntax().rewrite(&mut Uppercase).unwrap();
    assert_eq!(rewritten.text(), "return R;");
    assert_eq!(rewritten.root().text(), "f(a,b,...xs);return R;");

    let first_before = module.statements().syntax().green().slot(0).clone();
    let first_after = rewritten.parent().unwrap().green().slot(0).clone();
    assert!(first_before.ptr_eq(&first_after));
}
