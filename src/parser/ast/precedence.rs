//! Operator precedence tables for ES|QL expressions.
//!
//! Binding powers follow the precedence levels of the ES|QL grammar:
//! `NOT` binds at 4, `AND` at 2 and `OR` at 1 for boolean expressions;
//! unary signs bind at 3, multiplicative operators at 2 and additive
//! operators at 1 for arithmetic. Each infix right binding power is one
//! above its left binding power, which makes every operator left
//! associative.

use crate::SyntaxKind;

use super::{ArithmeticOp, BooleanOp};

/// Binding power of the operand of prefix `NOT`.
pub(crate) const BOOLEAN_NOT_BP: u8 = 4;

/// Binding power of the operand of a unary sign.
pub(crate) const UNARY_SIGN_BP: u8 = 3;

#[derive(Debug, Clone, Copy)]
struct InfixEntry<Op> {
    l_bp: u8,
    r_bp: u8,
    op: Op,
}

const BOOLEAN_TABLE: &[(SyntaxKind, InfixEntry<BooleanOp>)] = &[
    (
        SyntaxKind::K_AND,
        InfixEntry {
            l_bp: 2,
            r_bp: 3,
            op: BooleanOp::And,
        },
    ),
    (
        SyntaxKind::K_OR,
        InfixEntry {
            l_bp: 1,
            r_bp: 2,
            op: BooleanOp::Or,
        },
    ),
];

const ARITHMETIC_TABLE: &[(SyntaxKind, InfixEntry<ArithmeticOp>)] = &[
    (
        SyntaxKind::T_ASTERISK,
        InfixEntry {
            l_bp: 2,
            r_bp: 3,
            op: ArithmeticOp::Mul,
        },
    ),
    (
        SyntaxKind::T_SLASH,
        InfixEntry {
            l_bp: 2,
            r_bp: 3,
            op: ArithmeticOp::Div,
        },
    ),
    (
        SyntaxKind::T_PERCENT,
        InfixEntry {
            l_bp: 2,
            r_bp: 3,
            op: ArithmeticOp::Mod,
        },
    ),
    (
        SyntaxKind::T_PLUS,
        InfixEntry {
            l_bp: 1,
            r_bp: 2,
            op: ArithmeticOp::Add,
        },
    ),
    (
        SyntaxKind::T_MINUS,
        InfixEntry {
            l_bp: 1,
            r_bp: 2,
            op: ArithmeticOp::Sub,
        },
    ),
];

fn lookup<Op: Copy>(
    table: &[(SyntaxKind, InfixEntry<Op>)],
    kind: SyntaxKind,
) -> Option<(u8, u8, Op)> {
    table
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.l_bp, entry.r_bp, entry.op)))
}

/// Lookup the binding powers and [`BooleanOp`] for a boolean connective.
pub(crate) fn boolean_binding_power(kind: SyntaxKind) -> Option<(u8, u8, BooleanOp)> {
    lookup(BOOLEAN_TABLE, kind)
}

/// Lookup the binding powers and [`ArithmeticOp`] for an arithmetic operator.
pub(crate) fn arithmetic_binding_power(kind: SyntaxKind) -> Option<(u8, u8, ArithmeticOp)> {
    lookup(ARITHMETIC_TABLE, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn and_binds_tighter_than_or() {
        let (and_l, _, _) = boolean_binding_power(SyntaxKind::K_AND)
            .unwrap_or_else(|| panic!("AND missing from table"));
        let (or_l, _, _) = boolean_binding_power(SyntaxKind::K_OR)
            .unwrap_or_else(|| panic!("OR missing from table"));
        assert!(and_l > or_l);
        assert!(BOOLEAN_NOT_BP > and_l);
    }

    #[rstest]
    #[case(SyntaxKind::T_ASTERISK, ArithmeticOp::Mul)]
    #[case(SyntaxKind::T_PERCENT, ArithmeticOp::Mod)]
    #[case(SyntaxKind::T_MINUS, ArithmeticOp::Sub)]
    fn arithmetic_operators_are_left_associative(
        #[case] kind: SyntaxKind,
        #[case] op: ArithmeticOp,
    ) {
        let (l_bp, r_bp, found) = arithmetic_binding_power(kind)
            .unwrap_or_else(|| panic!("{kind:?} missing from table"));
        assert_eq!(found, op);
        assert!(r_bp > l_bp);
        assert!(UNARY_SIGN_BP > l_bp);
    }

    #[rstest]
    fn comparison_is_not_an_infix_operator() {
        assert!(arithmetic_binding_power(SyntaxKind::T_COMPARISON_OPERATOR).is_none());
        assert!(boolean_binding_power(SyntaxKind::T_COMPARISON_OPERATOR).is_none());
    }
}
