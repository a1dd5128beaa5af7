use crate::red::SyntaxSlots;
use crate::{Slot, SyntaxNode, SyntaxToken};

/// Preorder traversal over nodes.
pub struct Preorder {
    inner: PreorderWithTokens,
}

impl Preorder {
    #[inline]
    pub(crate) fn new(start: SyntaxNode) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }

    /// Skips the subtree of the node that was just entered.
    #[inline]
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|event| match event {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    Enter(SyntaxNode),
    Leave(SyntaxNode),
}

/// Preorder traversal over nodes and present tokens. Absent slots produce no
/// events.
pub struct PreorderWithTokens {
    stack: Vec<(SyntaxNode, SyntaxSlots)>,
    root: Option<SyntaxNode>,
}

impl PreorderWithTokens {
    #[inline]
    pub(crate) fn new(start: SyntaxNode) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }

    /// Skips the subtree of the node that was just entered. Its `LeaveNode`
    /// event is not produced.
    #[inline]
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEventWithTokens;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.stack.push((root.clone(), root.children()));
            return Some(WalkEventWithTokens::EnterNode(root));
        }

        loop {
            let (_, active_node) = self.stack.last_mut()?;
            match active_node.next() {
                Some(Slot::Node(child)) => {
                    self.stack.push((child.clone(), child.children()));
                    return Some(WalkEventWithTokens::EnterNode(child));
                }
                Some(Slot::Token(child)) => return Some(WalkEventWithTokens::Token(child)),
                Some(Slot::Absent) => continue,
                None => {
                    let (exited_node, _) =
                        self.stack.pop().expect("should have an exited-from node");
                    return Some(WalkEventWithTokens::LeaveNode(exited_node));
                }
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkEventWithTokens {
    EnterNode(SyntaxNode),
    LeaveNode(SyntaxNode),
    Token(SyntaxToken),
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::factory;

    fn return_statement() -> SyntaxNode {
        let literal = factory::create_node(
            BASIC_LITERAL,
            vec![Slot::Token(factory::create_green_token(DECIMAL_INTEGER_LITERAL, "1"))],
        );
        SyntaxNode::new_root(factory::create_node(
            RETURN_STATEMENT,
            vec![
                Slot::Token(factory::create_green_token(RETURN_KEYWORD, "return ")),
                Slot::Node(literal),
                Slot::Token(factory::create_green_token(SEMICOLON, ";")),
            ],
        ))
    }

    fn render(events: impl Iterator<Item = WalkEventWithTokens>) -> String {
        events
            .map(|event| match event {
                WalkEventWithTokens::EnterNode(node) => format!("enter {:?}\n", node.kind()),
                WalkEventWithTokens::LeaveNode(node) => format!("leave {:?}\n", node.kind()),
                WalkEventWithTokens::Token(token) => format!("token {:?}\n", token.text()),
            })
            .collect()
    }

    #[test]
    fn preorder_with_tokens() {
        expect![[r#"
            enter RETURN_STATEMENT
            token "return "
            enter BASIC_LITERAL
            token "1"
            leave BASIC_LITERAL
            token ";"
            leave RETURN_STATEMENT
        "#]]
        .assert_eq(&render(return_statement().preorder_with_tokens()));
    }

    #[test]
    fn skip_subtree_drops_leave_event() {
        let mut walk = return_statement().preorder();
        let mut kinds = Vec::new();
        while let Some(event) = walk.next() {
            if let WalkEvent::Enter(node) = event {
                kinds.push(node.kind());
                if node.kind() == BASIC_LITERAL {
                    walk.skip_subtree();
                }
            }
        }
        assert_eq!(kinds, [RETURN_STATEMENT, BASIC_LITERAL]);
    }

    #[test]
    fn absent_slots_are_skipped() {
        let node = SyntaxNode::new_root(factory::create_node(
            RETURN_STATEMENT,
            vec![
                Slot::Token(factory::create_green_token(RETURN_KEYWORD, "return")),
                Slot::Absent,
                Slot::Token(factory::create_green_token(SEMICOLON, ";")),
            ],
        ));
        expect![[r#"
            enter RETURN_STATEMENT
            token "return"
            token ";"
            leave RETURN_STATEMENT
        "#]]
        .assert_eq(&render(node.preorder_with_tokens()));
    }
}
