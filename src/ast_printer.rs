use crate::expr::Expr;

/// Renders expressions in a fully parenthesised prefix form, e.g.
/// `-123 * (45.67)` ⇒ `(* (- 123) (Group 45.67))`.
pub struct Ast;

impl Ast {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => self.parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),

            Expr::Unary { operator, right } => self.parenthesize(&operator.lexeme, &[right.as_ref()]),

            Expr::Grouping(inner) => self.parenthesize("Group", &[inner.as_ref()]),

            Expr::Literal(literal) => literal.to_string(),

            Expr::Variable(name) => name.lexeme.clone(),

            Expr::Assign { name, value } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut parts: Vec<&Expr> = vec![callee.as_ref()];
                parts.extend(arguments.iter());

                self.parenthesize("call", &parts)
            }
        }
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::from("(");
        out.push_str(name);

        for expr in exprs {
            out.push(' ');
            out.push_str(&self.print(expr));
        }

        out.push(')');
        out
    }
}
