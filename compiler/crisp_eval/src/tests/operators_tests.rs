//! Tests for the operator registry, applied to already evaluated operands.

use crate::operators::{binary_spec, chain_spec, evaluate_binary, evaluate_chain, Domain};
use crate::EvalErrorKind;
use crisp_ir::{Arity, BinaryOp, ChainOp, StringInterner, Value};

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::int).collect()
}

fn bools(bs: &[bool]) -> Vec<Value> {
    bs.iter().copied().map(Value::bool).collect()
}

mod registry {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_operator_has_a_registry_entry() {
        for op in ChainOp::ALL {
            let spec = chain_spec(op);
            assert_eq!(spec.symbol, op.as_symbol());
            assert_eq!(spec.arity, Arity::Chain);
        }
        for op in BinaryOp::ALL {
            let spec = binary_spec(op);
            assert_eq!(spec.symbol, op.as_symbol());
            assert_eq!(spec.arity, Arity::Binary);
        }
    }

    #[test]
    fn domains() {
        assert_eq!(chain_spec(ChainOp::Add).domain, Domain::Int);
        assert_eq!(chain_spec(ChainOp::Or).domain, Domain::Bool);
        assert_eq!(binary_spec(BinaryOp::IsEqual).domain, Domain::Any);
        assert_eq!(binary_spec(BinaryOp::IsLessThan).domain, Domain::Int);
    }
}

mod chain_ops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add() {
        assert_eq!(evaluate_chain(ChainOp::Add, &ints(&[1, 2, 3])), Ok(Value::int(6)));
        assert_eq!(evaluate_chain(ChainOp::Add, &ints(&[1, 2])), Ok(Value::int(3)));
    }

    #[test]
    fn sub_is_left_associative() {
        assert_eq!(evaluate_chain(ChainOp::Sub, &ints(&[10, 3, 2])), Ok(Value::int(5)));
        assert_eq!(evaluate_chain(ChainOp::Sub, &ints(&[1, 2])), Ok(Value::int(-1)));
    }

    #[test]
    fn mul() {
        assert_eq!(evaluate_chain(ChainOp::Mul, &ints(&[2, 3, 4])), Ok(Value::int(24)));
    }

    #[test]
    fn modulo_truncates_toward_zero() {
        assert_eq!(evaluate_chain(ChainOp::Mod, &ints(&[7, 2])), Ok(Value::int(1)));
        assert_eq!(evaluate_chain(ChainOp::Mod, &ints(&[7, -2])), Ok(Value::int(1)));
        assert_eq!(evaluate_chain(ChainOp::Mod, &ints(&[-7, 2])), Ok(Value::int(-1)));
        assert_eq!(evaluate_chain(ChainOp::Mod, &ints(&[17, 10, 4])), Ok(Value::int(3)));
    }

    #[test]
    fn modulo_by_zero() {
        let err = evaluate_chain(ChainOp::Mod, &ints(&[1, 0])).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    }

    #[test]
    fn integer_overflow_wraps() {
        assert_eq!(
            evaluate_chain(ChainOp::Add, &ints(&[i64::MAX, 1])),
            Ok(Value::int(i64::MIN))
        );
        assert_eq!(
            evaluate_chain(ChainOp::Sub, &ints(&[i64::MIN, 1])),
            Ok(Value::int(i64::MAX))
        );
        assert_eq!(
            evaluate_chain(ChainOp::Mul, &ints(&[i64::MAX, 2])),
            Ok(Value::int(-2))
        );
        assert_eq!(
            evaluate_chain(ChainOp::Mod, &ints(&[i64::MIN, -1])),
            Ok(Value::int(0))
        );
    }

    #[test]
    fn logical() {
        assert_eq!(
            evaluate_chain(ChainOp::And, &bools(&[true, true, false])),
            Ok(Value::bool(false))
        );
        assert_eq!(
            evaluate_chain(ChainOp::And, &bools(&[true, true])),
            Ok(Value::bool(true))
        );
        assert_eq!(
            evaluate_chain(ChainOp::Or, &bools(&[false, false, true])),
            Ok(Value::bool(true))
        );
        assert_eq!(
            evaluate_chain(ChainOp::Or, &bools(&[false, false])),
            Ok(Value::bool(false))
        );
    }

    #[test]
    fn single_operand_is_identity() {
        for op in ChainOp::ALL {
            assert_eq!(evaluate_chain(op, &ints(&[7])), Ok(Value::int(7)));
        }
        // Not checked against the domain.
        let interner = StringInterner::new();
        let sym = Value::symbol(interner.intern("s"));
        assert_eq!(
            evaluate_chain(ChainOp::Add, std::slice::from_ref(&sym)),
            Ok(sym)
        );
    }

    #[test]
    fn zero_operands_is_malformed() {
        let err = evaluate_chain(ChainOp::Sub, &[]).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::MalformedOperator { operator: "-" });
    }

    #[test]
    fn type_mismatch_lists_operand_types() {
        let err = evaluate_chain(ChainOp::Add, &[Value::int(1), Value::bool(true)]).unwrap_err();
        match err.kind {
            EvalErrorKind::TypeMismatch {
                operator,
                operand_types,
            } => {
                assert_eq!(operator, "+");
                assert_eq!(operand_types.as_slice(), &["int", "bool"]);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }

        let err = evaluate_chain(ChainOp::And, &[Value::int(1), Value::bool(true)]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { operator: "and", .. }));
    }

    #[test]
    fn type_mismatch_message() {
        let err = evaluate_chain(ChainOp::Mul, &[Value::char('a'), Value::Nil]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch: `*` cannot be applied to (char, nil)"
        );
    }
}

mod binary_ops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_is_structural() {
        let eq = |l: Value, r: Value| evaluate_binary(BinaryOp::IsEqual, &l, &r);
        assert_eq!(eq(Value::int(3), Value::int(3)), Ok(Value::bool(true)));
        assert_eq!(eq(Value::int(3), Value::int(4)), Ok(Value::bool(false)));
        assert_eq!(eq(Value::int(1), Value::bool(true)), Ok(Value::bool(false)));
        assert_eq!(eq(Value::char('a'), Value::char('a')), Ok(Value::bool(true)));
        assert_eq!(eq(Value::Nil, Value::Nil), Ok(Value::bool(true)));
        assert_eq!(
            eq(
                Value::list([Value::int(1), Value::int(2)]),
                Value::list([Value::int(1), Value::int(2)])
            ),
            Ok(Value::bool(true))
        );
    }

    #[test]
    fn equality_of_symbols() {
        let interner = StringInterner::new();
        let a = Value::symbol(interner.intern("a"));
        let a2 = Value::symbol(interner.intern("a"));
        let b = Value::symbol(interner.intern("b"));
        assert_eq!(evaluate_binary(BinaryOp::IsEqual, &a, &a2), Ok(Value::bool(true)));
        assert_eq!(evaluate_binary(BinaryOp::IsEqual, &a, &b), Ok(Value::bool(false)));
    }

    #[test]
    fn comparisons() {
        let cmp = |op, l, r| evaluate_binary(op, &Value::int(l), &Value::int(r));
        assert_eq!(cmp(BinaryOp::IsGreaterThan, 5, 3), Ok(Value::bool(true)));
        assert_eq!(cmp(BinaryOp::IsGreaterThan, 3, 3), Ok(Value::bool(false)));
        assert_eq!(cmp(BinaryOp::IsLessThan, -5, 3), Ok(Value::bool(true)));
        assert_eq!(cmp(BinaryOp::IsGreaterEqual, 3, 3), Ok(Value::bool(true)));
        assert_eq!(cmp(BinaryOp::IsGreaterEqual, 2, 3), Ok(Value::bool(false)));
        assert_eq!(cmp(BinaryOp::IsLessEqual, 3, 3), Ok(Value::bool(true)));
        assert_eq!(cmp(BinaryOp::IsLessEqual, 4, 3), Ok(Value::bool(false)));
    }

    #[test]
    fn comparison_rejects_non_int() {
        for op in &BinaryOp::ALL[1..] {
            let err = evaluate_binary(*op, &Value::bool(true), &Value::int(1)).unwrap_err();
            assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
        }
        let err = evaluate_binary(BinaryOp::IsLessThan, &Value::char('a'), &Value::char('b'))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch: `<` cannot be applied to (char, char)"
        );
    }
}
