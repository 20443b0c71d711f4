use crate::ast::{Binary, Expr, ExprVisitor, Grouping, Literal, Unary};

/// Debug renderer producing fully-parenthesized prefix form,
/// e.g. `(+ (- 1) (group 2))`.
#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::new();
        out.push('(');
        out.push_str(name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_binary(&mut self, expr: &Binary) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.left, &*expr.right])
    }

    fn visit_grouping(&mut self, expr: &Grouping) -> String {
        self.parenthesize("group", &[&*expr.inner])
    }

    fn visit_literal(&mut self, expr: &Literal) -> String {
        match &expr.value {
            Some(value) => value.to_string(),
            None => "nil".to_string(),
        }
    }

    fn visit_unary(&mut self, expr: &Unary) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.operand])
    }
}
