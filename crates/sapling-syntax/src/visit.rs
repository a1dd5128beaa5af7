//! Kind-dispatched traversal.
//!
//! `accept` and `apply` match on the kind tag and call the method for that
//! kind. The set of kinds is closed, so adding one means adding a method to
//! each trait here; adding a consumer needs no change to the tree.

use crate::ast::{
    AnyNode, AstNode, BasicLiteral, BinaryExpression, BracedExpression, ExpressionStatement,
    FunctionCallExpression, ModulePart, NamedArgument, PositionalArgument, QualifiedNameReference,
    RestArgument, ReturnStatement, SimpleNameReference, SyntaxList,
};
use crate::{
    GreenNode, GreenSlot, GreenToken, NodeOrToken, Slot, SlotError, SyntaxNode, SyntaxToken,
    factory,
};

/// A read-only walk. Every method defaults to visiting the node's children
/// in slot order.
pub trait SyntaxVisitor {
    fn visit_module_part(&mut self, node: &ModulePart) {
        self.visit_children(node.syntax());
    }

    fn visit_return_statement(&mut self, node: &ReturnStatement) {
        self.visit_children(node.syntax());
    }

    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {
        self.visit_children(node.syntax());
    }

    fn visit_function_call_expression(&mut self, node: &FunctionCallExpression) {
        self.visit_children(node.syntax());
    }

    fn visit_positional_argument(&mut self, node: &PositionalArgument) {
        self.visit_children(node.syntax());
    }

    fn visit_named_argument(&mut self, node: &NamedArgument) {
        self.visit_children(node.syntax());
    }

    fn visit_rest_argument(&mut self, node: &RestArgument) {
        self.visit_children(node.syntax());
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression) {
        self.visit_children(node.syntax());
    }

    fn visit_braced_expression(&mut self, node: &BracedExpression) {
        self.visit_children(node.syntax());
    }

    fn visit_simple_name_reference(&mut self, node: &SimpleNameReference) {
        self.visit_children(node.syntax());
    }

    fn visit_qualified_name_reference(&mut self, node: &QualifiedNameReference) {
        self.visit_children(node.syntax());
    }

    fn visit_basic_literal(&mut self, node: &BasicLiteral) {
        self.visit_children(node.syntax());
    }

    fn visit_list(&mut self, node: &SyntaxList) {
        self.visit_children(node.syntax());
    }

    fn visit_token(&mut self, _token: &SyntaxToken) {}

    fn visit_children(&mut self, node: &SyntaxNode) {
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(node) => node.accept(self),
                NodeOrToken::Token(token) => self.visit_token(&token),
            }
        }
    }
}

/// A fold of the tree into `Output`. Every node method defaults to
/// [`transform_syntax_node`](Self::transform_syntax_node).
pub trait SyntaxTransformer {
    type Output;

    fn transform_syntax_node(&mut self, node: &SyntaxNode) -> Self::Output;

    fn transform_token(&mut self, token: &SyntaxToken) -> Self::Output;

    fn transform_module_part(&mut self, node: &ModulePart) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_return_statement(&mut self, node: &ReturnStatement) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_expression_statement(&mut self, node: &ExpressionStatement) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_function_call_expression(
        &mut self,
        node: &FunctionCallExpression,
    ) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_positional_argument(&mut self, node: &PositionalArgument) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_named_argument(&mut self, node: &NamedArgument) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_rest_argument(&mut self, node: &RestArgument) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_binary_expression(&mut self, node: &BinaryExpression) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_braced_expression(&mut self, node: &BracedExpression) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_simple_name_reference(&mut self, node: &SimpleNameReference) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_qualified_name_reference(
        &mut self,
        node: &QualifiedNameReference,
    ) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_basic_literal(&mut self, node: &BasicLiteral) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }

    fn transform_list(&mut self, node: &SyntaxList) -> Self::Output {
        self.transform_syntax_node(node.syntax())
    }
}

/// A transformer that rebuilds the tree bottom-up.
///
/// Override `modify_node` or `modify_token` to change parts of the tree and
/// fall back to `modify_children` for the rest. A node whose children all
/// come back as the same allocations is reused as is, so an untouched
/// subtree costs no allocation. A rebuilt node whose new children do not fit
/// its layout stops the rewrite with a [`SlotError`].
pub trait TreeModifier {
    fn modify_node(&mut self, node: &SyntaxNode) -> Result<GreenNode, SlotError> {
        self.modify_children(node)
    }

    fn modify_token(&mut self, token: &SyntaxToken) -> GreenToken {
        token.green().clone()
    }

    fn modify_children(&mut self, node: &SyntaxNode) -> Result<GreenNode, SlotError> {
        let slots = node
            .children()
            .map(|slot| {
                Ok(match slot {
                    Slot::Node(child) => Slot::Node(self.modify_node(&child)?),
                    Slot::Token(token) => Slot::Token(self.modify_token(&token)),
                    Slot::Absent => Slot::Absent,
                })
            })
            .collect::<Result<Vec<GreenSlot>, SlotError>>()?;

        let green = node.green();
        if green.slots().zip(&slots).all(|(old, new)| old.ptr_eq(new)) {
            return Ok(green.clone());
        }
        factory::try_create_node(node.kind(), slots, Vec::new())
    }
}

impl SyntaxNode {
    pub fn accept<V: SyntaxVisitor + ?Sized>(&self, visitor: &mut V) {
        match AnyNode::new(self.clone()) {
            AnyNode::ModulePart(it) => visitor.visit_module_part(&it),
            AnyNode::ReturnStatement(it) => visitor.visit_return_statement(&it),
            AnyNode::ExpressionStatement(it) => visitor.visit_expression_statement(&it),
            AnyNode::FunctionCallExpression(it) => visitor.visit_function_call_expression(&it),
            AnyNode::PositionalArgument(it) => visitor.visit_positional_argument(&it),
            AnyNode::NamedArgument(it) => visitor.visit_named_argument(&it),
            AnyNode::RestArgument(it) => visitor.visit_rest_argument(&it),
            AnyNode::BinaryExpression(it) => visitor.visit_binary_expression(&it),
            AnyNode::BracedExpression(it) => visitor.visit_braced_expression(&it),
            AnyNode::SimpleNameReference(it) => visitor.visit_simple_name_reference(&it),
            AnyNode::QualifiedNameReference(it) => visitor.visit_qualified_name_reference(&it),
            AnyNode::BasicLiteral(it) => visitor.visit_basic_literal(&it),
            AnyNode::List(it) => visitor.visit_list(&it),
        }
    }

    pub fn apply<T: SyntaxTransformer + ?Sized>(&self, transformer: &mut T) -> T::Output {
        match AnyNode::new(self.clone()) {
            AnyNode::ModulePart(it) => transformer.transform_module_part(&it),
            AnyNode::ReturnStatement(it) => transformer.transform_return_statement(&it),
            AnyNode::ExpressionStatement(it) => transformer.transform_expression_statement(&it),
            AnyNode::FunctionCallExpression(it) => {
                transformer.transform_function_call_expression(&it)
            }
            AnyNode::PositionalArgument(it) => transformer.transform_positional_argument(&it),
            AnyNode::NamedArgument(it) => transformer.transform_named_argument(&it),
            AnyNode::RestArgument(it) => transformer.transform_rest_argument(&it),
            AnyNode::BinaryExpression(it) => transformer.transform_binary_expression(&it),
            AnyNode::BracedExpression(it) => transformer.transform_braced_expression(&it),
            AnyNode::SimpleNameReference(it) => transformer.transform_simple_name_reference(&it),
            AnyNode::QualifiedNameReference(it) => {
                transformer.transform_qualified_name_reference(&it)
            }
            AnyNode::BasicLiteral(it) => transformer.transform_basic_literal(&it),
            AnyNode::List(it) => transformer.transform_list(&it),
        }
    }

    /// Runs `modifier` over this subtree and splices the result into the
    /// tree. Returns the rewritten node's handle in the new tree.
    pub fn rewrite<M: TreeModifier + ?Sized>(&self, modifier: &mut M) -> Result<Self, SlotError> {
        let green = modifier.modify_node(self)?;
        self.replace_with(green)
    }
}

impl SyntaxToken {
    pub fn accept<V: SyntaxVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_token(self);
    }

    pub fn apply<T: SyntaxTransformer + ?Sized>(&self, transformer: &mut T) -> T::Output {
        transformer.transform_token(self)
    }
}
