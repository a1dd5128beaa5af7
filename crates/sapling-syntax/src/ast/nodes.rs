use std::fmt;

use super::{
    AstNode, NodeList, node_slot, optional_node, optional_token, required_node, required_token,
    stage, token_slot,
};
use crate::{GreenSlot, NodeModifier, SlotError, SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(ModulePart => MODULE_PART);
ast_node!(ReturnStatement => RETURN_STATEMENT);
ast_node!(ExpressionStatement => EXPRESSION_STATEMENT);
ast_node!(FunctionCallExpression => FUNCTION_CALL_EXPRESSION);
ast_node!(PositionalArgument => POSITIONAL_ARGUMENT);
ast_node!(NamedArgument => NAMED_ARGUMENT);
ast_node!(
    /// `, ...expression` inside an argument list.
    RestArgument => REST_ARGUMENT
);
ast_node!(BinaryExpression => BINARY_EXPRESSION);
ast_node!(BracedExpression => BRACED_EXPRESSION);
ast_node!(SimpleNameReference => SIMPLE_NAME_REFERENCE);
ast_node!(
    /// `module:name`.
    QualifiedNameReference => QUALIFIED_NAME_REFERENCE
);
ast_node!(BasicLiteral => BASIC_LITERAL);
ast_node!(
    /// A `LIST` whose element type is not known statically.
    SyntaxList => LIST
);

ast_enum!(Expression {
    FunctionCall(FunctionCallExpression),
    Binary(BinaryExpression),
    Braced(BracedExpression),
    SimpleName(SimpleNameReference),
    QualifiedName(QualifiedNameReference),
    Literal(BasicLiteral),
});

ast_enum!(FunctionArgument {
    Positional(PositionalArgument),
    Named(NamedArgument),
    Rest(RestArgument),
});

ast_enum!(Statement { Return(ReturnStatement), Expression(ExpressionStatement) });

ast_enum!(NameReference { Simple(SimpleNameReference), Qualified(QualifiedNameReference) });

impl From<NameReference> for Expression {
    fn from(name: NameReference) -> Self {
        match name {
            NameReference::Simple(name) => Self::SimpleName(name),
            NameReference::Qualified(name) => Self::QualifiedName(name),
        }
    }
}

/// Every node kind, for dispatching on the kind tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnyNode {
    ModulePart(ModulePart),
    ReturnStatement(ReturnStatement),
    ExpressionStatement(ExpressionStatement),
    FunctionCallExpression(FunctionCallExpression),
    PositionalArgument(PositionalArgument),
    NamedArgument(NamedArgument),
    RestArgument(RestArgument),
    BinaryExpression(BinaryExpression),
    BracedExpression(BracedExpression),
    SimpleNameReference(SimpleNameReference),
    QualifiedNameReference(QualifiedNameReference),
    BasicLiteral(BasicLiteral),
    List(SyntaxList),
}

impl AnyNode {
    pub fn new(syntax: SyntaxNode) -> Self {
        use SyntaxKind::*;

        match syntax.kind() {
            MODULE_PART => Self::ModulePart(ModulePart(syntax)),
            RETURN_STATEMENT => Self::ReturnStatement(ReturnStatement(syntax)),
            EXPRESSION_STATEMENT => Self::ExpressionStatement(ExpressionStatement(syntax)),
            FUNCTION_CALL_EXPRESSION => {
                Self::FunctionCallExpression(FunctionCallExpression(syntax))
            }
            POSITIONAL_ARGUMENT => Self::PositionalArgument(PositionalArgument(syntax)),
            NAMED_ARGUMENT => Self::NamedArgument(NamedArgument(syntax)),
            REST_ARGUMENT => Self::RestArgument(RestArgument(syntax)),
            BINARY_EXPRESSION => Self::BinaryExpression(BinaryExpression(syntax)),
            BRACED_EXPRESSION => Self::BracedExpression(BracedExpression(syntax)),
            SIMPLE_NAME_REFERENCE => Self::SimpleNameReference(SimpleNameReference(syntax)),
            QUALIFIED_NAME_REFERENCE => {
                Self::QualifiedNameReference(QualifiedNameReference(syntax))
            }
            BASIC_LITERAL => Self::BasicLiteral(BasicLiteral(syntax)),
            LIST => Self::List(SyntaxList(syntax)),
            kind @ (COMMA | COLON | SEMICOLON | ELLIPSIS | OPEN_PAREN | CLOSE_PAREN | EQUAL
            | PLUS | MINUS | ASTERISK | SLASH | RETURN_KEYWORD | IDENTIFIER
            | DECIMAL_INTEGER_LITERAL | STRING_LITERAL | EOF) => {
                unreachable!("{kind:?} is a token kind")
            }
        }
    }
}

impl ModulePart {
    pub fn statements(&self) -> NodeList<Statement> {
        required_node(&self.0, 0)
    }

    pub fn eof_token(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn modify(&self) -> ModulePartModifier {
        ModulePartModifier(self.0.modify())
    }
}

pub struct ModulePartModifier(NodeModifier);

impl ModulePartModifier {
    #[track_caller]
    pub fn with_statements(mut self, statements: &NodeList<Statement>) -> Self {
        stage(&mut self.0, 0, node_slot(statements));
        self
    }

    #[track_caller]
    pub fn with_eof_token(mut self, eof: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(eof));
        self
    }

    pub fn apply(self) -> ModulePart {
        ModulePart(self.0.apply())
    }
}

impl ReturnStatement {
    pub fn return_keyword(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn expression(&self) -> Option<Expression> {
        optional_node(&self.0, 1)
    }

    pub fn semicolon_token(&self) -> SyntaxToken {
        required_token(&self.0, 2)
    }

    pub fn modify(&self) -> ReturnStatementModifier {
        ReturnStatementModifier(self.0.modify())
    }
}

pub struct ReturnStatementModifier(NodeModifier);

impl ReturnStatementModifier {
    #[track_caller]
    pub fn with_return_keyword(mut self, keyword: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(keyword));
        self
    }

    /// `None` removes the returned expression.
    #[track_caller]
    pub fn with_expression(mut self, expression: Option<&Expression>) -> Self {
        stage(&mut self.0, 1, expression.map_or(GreenSlot::Absent, node_slot));
        self
    }

    #[track_caller]
    pub fn with_semicolon_token(mut self, semicolon: &SyntaxToken) -> Self {
        stage(&mut self.0, 2, token_slot(semicolon));
        self
    }

    pub fn apply(self) -> ReturnStatement {
        ReturnStatement(self.0.apply())
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Expression {
        required_node(&self.0, 0)
    }

    pub fn semicolon_token(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn modify(&self) -> ExpressionStatementModifier {
        ExpressionStatementModifier(self.0.modify())
    }
}

pub struct ExpressionStatementModifier(NodeModifier);

impl ExpressionStatementModifier {
    #[track_caller]
    pub fn with_expression(mut self, expression: &Expression) -> Self {
        stage(&mut self.0, 0, node_slot(expression));
        self
    }

    #[track_caller]
    pub fn with_semicolon_token(mut self, semicolon: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(semicolon));
        self
    }

    pub fn apply(self) -> ExpressionStatement {
        ExpressionStatement(self.0.apply())
    }
}

impl FunctionCallExpression {
    pub fn function_name(&self) -> NameReference {
        required_node(&self.0, 0)
    }

    pub fn open_paren_token(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn arguments(&self) -> NodeList<FunctionArgument> {
        required_node(&self.0, 2)
    }

    pub fn close_paren_token(&self) -> SyntaxToken {
        required_token(&self.0, 3)
    }

    pub fn modify(&self) -> FunctionCallExpressionModifier {
        FunctionCallExpressionModifier(self.0.modify())
    }
}

pub struct FunctionCallExpressionModifier(NodeModifier);

impl FunctionCallExpressionModifier {
    #[track_caller]
    pub fn with_function_name(mut self, name: &NameReference) -> Self {
        stage(&mut self.0, 0, node_slot(name));
        self
    }

    #[track_caller]
    pub fn with_open_paren_token(mut self, open_paren: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(open_paren));
        self
    }

    #[track_caller]
    pub fn with_arguments(mut self, arguments: &NodeList<FunctionArgument>) -> Self {
        stage(&mut self.0, 2, node_slot(arguments));
        self
    }

    #[track_caller]
    pub fn with_close_paren_token(mut self, close_paren: &SyntaxToken) -> Self {
        stage(&mut self.0, 3, token_slot(close_paren));
        self
    }

    pub fn apply(self) -> FunctionCallExpression {
        FunctionCallExpression(self.0.apply())
    }
}

impl PositionalArgument {
    pub fn leading_comma(&self) -> Option<SyntaxToken> {
        optional_token(&self.0, 0)
    }

    pub fn expression(&self) -> Expression {
        required_node(&self.0, 1)
    }

    pub fn modify(&self) -> PositionalArgumentModifier {
        PositionalArgumentModifier(self.0.modify())
    }
}

pub struct PositionalArgumentModifier(NodeModifier);

impl PositionalArgumentModifier {
    #[track_caller]
    pub fn with_leading_comma(mut self, comma: Option<&SyntaxToken>) -> Self {
        stage(&mut self.0, 0, comma.map_or(GreenSlot::Absent, token_slot));
        self
    }

    #[track_caller]
    pub fn with_expression(mut self, expression: &Expression) -> Self {
        stage(&mut self.0, 1, node_slot(expression));
        self
    }

    pub fn apply(self) -> PositionalArgument {
        PositionalArgument(self.0.apply())
    }
}

impl NamedArgument {
    pub fn leading_comma(&self) -> Option<SyntaxToken> {
        optional_token(&self.0, 0)
    }

    pub fn argument_name(&self) -> SimpleNameReference {
        required_node(&self.0, 1)
    }

    pub fn equals_token(&self) -> SyntaxToken {
        required_token(&self.0, 2)
    }

    pub fn expression(&self) -> Expression {
        required_node(&self.0, 3)
    }

    pub fn modify(&self) -> NamedArgumentModifier {
        NamedArgumentModifier(self.0.modify())
    }
}

pub struct NamedArgumentModifier(NodeModifier);

impl NamedArgumentModifier {
    #[track_caller]
    pub fn with_leading_comma(mut self, comma: Option<&SyntaxToken>) -> Self {
        stage(&mut self.0, 0, comma.map_or(GreenSlot::Absent, token_slot));
        self
    }

    #[track_caller]
    pub fn with_argument_name(mut self, name: &SimpleNameReference) -> Self {
        stage(&mut self.0, 1, node_slot(name));
        self
    }

    #[track_caller]
    pub fn with_equals_token(mut self, equals: &SyntaxToken) -> Self {
        stage(&mut self.0, 2, token_slot(equals));
        self
    }

    #[track_caller]
    pub fn with_expression(mut self, expression: &Expression) -> Self {
        stage(&mut self.0, 3, node_slot(expression));
        self
    }

    pub fn apply(self) -> NamedArgument {
        NamedArgument(self.0.apply())
    }
}

impl RestArgument {
    pub fn leading_comma(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn ellipsis(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn expression(&self) -> Expression {
        required_node(&self.0, 2)
    }

    pub fn modify(&self) -> RestArgumentModifier {
        RestArgumentModifier(self.0.modify())
    }

    /// Replaces all three slots in one rebuild. Returns this very argument
    /// when every value is the one already in place.
    pub fn replace_all(
        &self,
        leading_comma: &SyntaxToken,
        ellipsis: &SyntaxToken,
        expression: &Expression,
    ) -> Result<Self, SlotError> {
        let edited = self.0.replace_slots([
            (0, token_slot(leading_comma)),
            (1, token_slot(ellipsis)),
            (2, node_slot(expression)),
        ])?;
        Ok(Self(edited))
    }
}

/// Staged edit of a [`RestArgument`]. Slots that are not set keep their
/// current value by reference.
pub struct RestArgumentModifier(NodeModifier);

impl RestArgumentModifier {
    #[track_caller]
    pub fn with_leading_comma(mut self, comma: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(comma));
        self
    }

    #[track_caller]
    pub fn with_ellipsis(mut self, ellipsis: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(ellipsis));
        self
    }

    #[track_caller]
    pub fn with_expression(mut self, expression: &Expression) -> Self {
        stage(&mut self.0, 2, node_slot(expression));
        self
    }

    /// Returns the edited argument in the rebuilt tree, or this very
    /// argument when nothing changed.
    pub fn apply(self) -> RestArgument {
        RestArgument(self.0.apply())
    }
}

impl BinaryExpression {
    pub fn lhs_expr(&self) -> Expression {
        required_node(&self.0, 0)
    }

    pub fn operator(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn rhs_expr(&self) -> Expression {
        required_node(&self.0, 2)
    }

    pub fn modify(&self) -> BinaryExpressionModifier {
        BinaryExpressionModifier(self.0.modify())
    }
}

pub struct BinaryExpressionModifier(NodeModifier);

impl BinaryExpressionModifier {
    #[track_caller]
    pub fn with_lhs_expr(mut self, lhs: &Expression) -> Self {
        stage(&mut self.0, 0, node_slot(lhs));
        self
    }

    #[track_caller]
    pub fn with_operator(mut self, operator: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(operator));
        self
    }

    #[track_caller]
    pub fn with_rhs_expr(mut self, rhs: &Expression) -> Self {
        stage(&mut self.0, 2, node_slot(rhs));
        self
    }

    pub fn apply(self) -> BinaryExpression {
        BinaryExpression(self.0.apply())
    }
}

impl BracedExpression {
    pub fn open_paren(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn expression(&self) -> Expression {
        required_node(&self.0, 1)
    }

    pub fn close_paren(&self) -> SyntaxToken {
        required_token(&self.0, 2)
    }

    pub fn modify(&self) -> BracedExpressionModifier {
        BracedExpressionModifier(self.0.modify())
    }
}

pub struct BracedExpressionModifier(NodeModifier);

impl BracedExpressionModifier {
    #[track_caller]
    pub fn with_open_paren(mut self, open_paren: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(open_paren));
        self
    }

    #[track_caller]
    pub fn with_expression(mut self, expression: &Expression) -> Self {
        stage(&mut self.0, 1, node_slot(expression));
        self
    }

    #[track_caller]
    pub fn with_close_paren(mut self, close_paren: &SyntaxToken) -> Self {
        stage(&mut self.0, 2, token_slot(close_paren));
        self
    }

    pub fn apply(self) -> BracedExpression {
        BracedExpression(self.0.apply())
    }
}

impl SimpleNameReference {
    pub fn name(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn modify(&self) -> SimpleNameReferenceModifier {
        SimpleNameReferenceModifier(self.0.modify())
    }
}

pub struct SimpleNameReferenceModifier(NodeModifier);

impl SimpleNameReferenceModifier {
    #[track_caller]
    pub fn with_name(mut self, name: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(name));
        self
    }

    pub fn apply(self) -> SimpleNameReference {
        SimpleNameReference(self.0.apply())
    }
}

impl QualifiedNameReference {
    pub fn module_prefix(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn colon(&self) -> SyntaxToken {
        required_token(&self.0, 1)
    }

    pub fn identifier(&self) -> SyntaxToken {
        required_token(&self.0, 2)
    }

    pub fn modify(&self) -> QualifiedNameReferenceModifier {
        QualifiedNameReferenceModifier(self.0.modify())
    }
}

pub struct QualifiedNameReferenceModifier(NodeModifier);

impl QualifiedNameReferenceModifier {
    #[track_caller]
    pub fn with_module_prefix(mut self, prefix: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(prefix));
        self
    }

    #[track_caller]
    pub fn with_colon(mut self, colon: &SyntaxToken) -> Self {
        stage(&mut self.0, 1, token_slot(colon));
        self
    }

    #[track_caller]
    pub fn with_identifier(mut self, identifier: &SyntaxToken) -> Self {
        stage(&mut self.0, 2, token_slot(identifier));
        self
    }

    pub fn apply(self) -> QualifiedNameReference {
        QualifiedNameReference(self.0.apply())
    }
}

impl BasicLiteral {
    pub fn literal_token(&self) -> SyntaxToken {
        required_token(&self.0, 0)
    }

    pub fn modify(&self) -> BasicLiteralModifier {
        BasicLiteralModifier(self.0.modify())
    }
}

pub struct BasicLiteralModifier(NodeModifier);

impl BasicLiteralModifier {
    #[track_caller]
    pub fn with_literal_token(mut self, literal: &SyntaxToken) -> Self {
        stage(&mut self.0, 0, token_slot(literal));
        self
    }

    pub fn apply(self) -> BasicLiteral {
        BasicLiteral(self.0.apply())
    }
}

impl SyntaxList {
    pub fn len(&self) -> usize {
        self.0.slot_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn elements(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.child_nodes()
    }
}

impl fmt::Display for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.syntax(), f)
    }
}

impl AnyNode {
    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::ModulePart(it) => it.syntax(),
            Self::ReturnStatement(it) => it.syntax(),
            Self::ExpressionStatement(it) => it.syntax(),
            Self::FunctionCallExpression(it) => it.syntax(),
            Self::PositionalArgument(it) => it.syntax(),
            Self::NamedArgument(it) => it.syntax(),
            Self::RestArgument(it) => it.syntax(),
            Self::BinaryExpression(it) => it.syntax(),
            Self::BracedExpression(it) => it.syntax(),
            Self::SimpleNameReference(it) => it.syntax(),
            Self::QualifiedNameReference(it) => it.syntax(),
            Self::BasicLiteral(it) => it.syntax(),
            Self::List(it) => it.syntax(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::factory::*;

    fn name(text: &str) -> Expression {
        create_simple_name_reference(&create_token(IDENTIFIER, text)).into()
    }

    #[test]
    fn enums_cast_by_kind() {
        let expression = name("x");
        assert!(matches!(expression, Expression::SimpleName(_)));
        assert!(FunctionArgument::cast(expression.syntax().clone()).is_none());
        assert!(Expression::can_cast(BASIC_LITERAL));
        assert!(!Expression::can_cast(REST_ARGUMENT));
    }

    #[test]
    fn return_statement_without_expression() {
        let statement = create_return_statement(
            &create_fixed_token(RETURN_KEYWORD),
            None,
            &create_fixed_token(SEMICOLON),
        );
        assert!(statement.expression().is_none());
        assert_eq!(statement.semicolon_token().text(), ";");

        let edited = statement.modify().with_expression(Some(&name("x"))).apply();
        assert_eq!(edited.to_string(), "returnx;");
        assert!(edited.return_keyword().green().ptr_eq(statement.return_keyword().green()));
    }

    #[test]
    fn node_list_access() {
        let arguments = create_node_list::<FunctionArgument>(&[
            create_positional_argument(None, &name("a")).into(),
            create_rest_argument(
                &create_fixed_token(COMMA),
                &create_fixed_token(ELLIPSIS),
                &name("b"),
            )
            .into(),
        ]);
        assert_eq!(arguments.len(), 2);
        assert!(matches!(arguments.get(1), Some(FunctionArgument::Rest(_))));
        assert!(arguments.get(2).is_none());
        assert_eq!(arguments.iter().count(), 2);

        let arguments = arguments.modify().remove(0).apply();
        assert_eq!(arguments.to_string(), ",...b");
    }

    #[test]
    #[should_panic(expected = "slot `ellipsis` of REST_ARGUMENT expects one of {ELLIPSIS}, found COMMA")]
    fn typed_modifier_rejects_wrong_token_kind() {
        let rest = create_rest_argument(
            &create_fixed_token(COMMA),
            &create_fixed_token(ELLIPSIS),
            &name("x"),
        );
        let _ = rest.modify().with_ellipsis(&create_fixed_token(COMMA));
    }
}
