use crate::expr::{BinaryOpTy, Expr, Literal};

/// Bottom-up additive-identity elimination: `x + 0` and `0 + x` collapse to
/// `x`. The pass is pure (the input tree is untouched), total, and
/// idempotent; subtrees with nothing to rewrite are rebuilt unchanged.
pub fn optimize(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(left, op, right) => {
            let left = optimize(left);
            let right = optimize(right);
            if op.ty == BinaryOpTy::Add {
                if matches!(right, Expr::Literal(Literal::Number(0))) {
                    return left;
                }
                if matches!(left, Expr::Literal(Literal::Number(0))) {
                    return right;
                }
            }
            Expr::Binary(Box::new(left), *op, Box::new(right))
        }
        other => other.clone(),
    }
}
