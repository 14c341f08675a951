use proptest::prelude::*;

use petitlang::expr::{BinaryOp, BinaryOpTy, Expr, Literal};
use petitlang::interpreter;
use petitlang::optimizer::optimize;
use petitlang::parser;

fn arb_op() -> impl Strategy<Value = BinaryOpTy> {
    prop_oneof![
        Just(BinaryOpTy::Add),
        Just(BinaryOpTy::Sub),
        Just(BinaryOpTy::Mul),
        Just(BinaryOpTy::Div),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = (-100i64..=100).prop_map(|n| Expr::Literal(Literal::Number(n)));
    leaf.prop_recursive(6, 48, 2, |inner| {
        (inner.clone(), arb_op(), inner).prop_map(|(left, ty, right)| {
            Expr::Binary(
                Box::new(left),
                BinaryOp {
                    ty,
                    line: 1,
                    col: 1,
                },
                Box::new(right),
            )
        })
    })
}

proptest! {
    #[test]
    fn optimizing_twice_changes_nothing(expr in arb_expr()) {
        let once = optimize(&expr);
        let twice = optimize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn optimizing_preserves_the_result(expr in arb_expr()) {
        let optimized = optimize(&expr);
        match (interpreter::evaluate(&expr), interpreter::evaluate(&optimized)) {
            (Ok(before), Ok(after)) => prop_assert_eq!(before, after),
            // A division by zero survives optimization on both sides.
            (Err(_), Err(_)) => {}
            (before, after) => {
                prop_assert!(false, "results diverge: {:?} vs {:?}", before, after)
            }
        }
    }

    #[test]
    fn adding_zero_is_eliminated(expr in arb_expr()) {
        let zero = || Box::new(Expr::Literal(Literal::Number(0)));
        let add = |left: Box<Expr>, right: Box<Expr>| {
            Expr::Binary(left, BinaryOp { ty: BinaryOpTy::Add, line: 1, col: 1 }, right)
        };
        let expected = optimize(&expr);
        prop_assert_eq!(optimize(&add(Box::new(expr.clone()), zero())), expected.clone());
        prop_assert_eq!(optimize(&add(zero(), Box::new(expr))), expected);
    }

    #[test]
    fn parsed_precedence_matches_integer_arithmetic(
        a in 0i64..1000,
        b in 0i64..1000,
        c in 0i64..1000,
        e in 0i64..1000,
        d in 1i64..1000,
    ) {
        let source = format!("{} + {} * {} - {} / {}", a, b, c, e, d);
        let expr = parser::parse_expression(&source).unwrap();
        prop_assert_eq!(interpreter::evaluate(&expr).unwrap(), a + b * c - e / d);
    }
}
