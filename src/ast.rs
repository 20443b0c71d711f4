use crate::token::{Literal as LiteralValue, Token};

// Expression tree. Every node owns its children, so the tree is finite and acyclic.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(Binary),
    Grouping(Grouping),
    Literal(Literal),
    Unary(Unary),
}

/// `left operator right`, left-associative at every binary level
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Parenthesized sub-expression
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    pub inner: Box<Expr>,
}

/// `None` is the `nil` literal
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Option<LiteralValue>,
}

/// Prefix `!` or `-`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub operand: Box<Expr>,
}

/// A traversal over expressions, one method per node variant.
///
/// New passes (printing, evaluation, analysis) implement this trait instead
/// of touching the node definitions.
pub trait ExprVisitor {
    type Output;

    fn visit_binary(&mut self, expr: &Binary) -> Self::Output;
    fn visit_grouping(&mut self, expr: &Grouping) -> Self::Output;
    fn visit_literal(&mut self, expr: &Literal) -> Self::Output;
    fn visit_unary(&mut self, expr: &Unary) -> Self::Output;
}

impl Expr {
    /// Dispatch to the visitor method matching this node's variant
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary(expr) => visitor.visit_binary(expr),
            Expr::Grouping(expr) => visitor.visit_grouping(expr),
            Expr::Literal(expr) => visitor.visit_literal(expr),
            Expr::Unary(expr) => visitor.visit_unary(expr),
        }
    }

    // Constructors

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary(Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Grouping {
            inner: Box::new(inner),
        })
    }

    pub fn literal(value: Option<LiteralValue>) -> Self {
        Expr::Literal(Literal { value })
    }

    pub fn nil() -> Self {
        Self::literal(None)
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary(Unary {
            operator,
            operand: Box::new(operand),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    // Counts nodes by variant
    #[derive(Default)]
    struct NodeCounter {
        binary: usize,
        grouping: usize,
        literal: usize,
        unary: usize,
    }

    impl ExprVisitor for NodeCounter {
        type Output = ();

        fn visit_binary(&mut self, expr: &Binary) {
            self.binary += 1;
            expr.left.accept(self);
            expr.right.accept(self);
        }

        fn visit_grouping(&mut self, expr: &Grouping) {
            self.grouping += 1;
            expr.inner.accept(self);
        }

        fn visit_literal(&mut self, _expr: &Literal) {
            self.literal += 1;
        }

        fn visit_unary(&mut self, expr: &Unary) {
            self.unary += 1;
            expr.operand.accept(self);
        }
    }

    // Reports tree depth
    struct Depth;

    impl ExprVisitor for Depth {
        type Output = usize;

        fn visit_binary(&mut self, expr: &Binary) -> usize {
            1 + expr.left.accept(self).max(expr.right.accept(self))
        }

        fn visit_grouping(&mut self, expr: &Grouping) -> usize {
            1 + expr.inner.accept(self)
        }

        fn visit_literal(&mut self, _expr: &Literal) -> usize {
            1
        }

        fn visit_unary(&mut self, expr: &Unary) -> usize {
            1 + expr.operand.accept(self)
        }
    }

    fn number(n: f64) -> Expr {
        Expr::literal(Some(LiteralValue::Number(n)))
    }

    fn sample() -> Expr {
        // -(1 + 2) * nil
        let plus = Token::new(TokenKind::Plus, "+", None, 1);
        let minus = Token::new(TokenKind::Minus, "-", None, 1);
        let star = Token::new(TokenKind::Star, "*", None, 1);
        Expr::binary(
            Expr::unary(
                minus,
                Expr::grouping(Expr::binary(number(1.0), plus, number(2.0))),
            ),
            star,
            Expr::nil(),
        )
    }

    #[test]
    fn test_accept_dispatches_per_variant() {
        let mut counter = NodeCounter::default();
        sample().accept(&mut counter);

        assert_eq!(counter.binary, 2);
        assert_eq!(counter.grouping, 1);
        assert_eq!(counter.literal, 3);
        assert_eq!(counter.unary, 1);
    }

    #[test]
    fn test_visitor_output_type() {
        assert_eq!(sample().accept(&mut Depth), 5);
        assert_eq!(Expr::nil().accept(&mut Depth), 1);
    }

    #[test]
    fn test_nil_literal_has_no_value() {
        match Expr::nil() {
            Expr::Literal(Literal { value }) => assert!(value.is_none()),
            other => panic!("Expected literal, found {:?}", other),
        }
    }
}
