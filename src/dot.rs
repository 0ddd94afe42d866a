//! The dot-product operator.
//!
//! [`dot`] rewrites the dot product of two expressions into a normalized equivalent: it
//! distributes over sums in either operand, pulls every scalar factor of both operands out
//! into a single coefficient, and stores the remaining vector aggregates in canonical order,
//! so that `dot(u, v)` and `dot(v, u)` return structurally identical expressions.

use crate::builder::{MultBuilder, SumBuilder};
use crate::expr::{Expr, Primary};

/// Returns `true` for the factors that stay inside the dot application: vector functions and
/// their indexed components. Every other factor is a scalar and is pulled out in front.
fn is_vector_factor(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Primary(Primary::VectorFunction(_)) | Expr::Primary(Primary::Component(_)),
    )
}

/// Splits a sum-free operand into its vector aggregate and the scalar factors it contributes
/// to the pulled-out coefficient.
///
/// More than one vector factor on a side is combined by raw multiplication into a single
/// aggregate, which is never decomposed again. An operand with no vector factors at all
/// participates whole: its entire factor product becomes the aggregate and it contributes no
/// scalar factors.
fn separate(operand: &Expr) -> (Expr, Vec<Expr>) {
    let (vector, scalar): (Vec<Expr>, Vec<Expr>) = operand
        .clone()
        .into_factors()
        .into_iter()
        .partition(is_vector_factor);

    if vector.is_empty() {
        (Expr::Mul(scalar).downgrade(), Vec::new())
    } else {
        (Expr::Mul(vector).downgrade(), scalar)
    }
}

/// Returns a normalized expression representing the bilinear dot product of `lhs` and `rhs`.
///
/// The returned expression contains [`Expr::Dot`] nodes only where they are irreducible: both
/// children are aggregates with no remaining sum structure, stored in canonical order. Building
/// the [`Expr::Dot`] variant directly produces the raw, unevaluated node instead.
pub fn dot(lhs: &Expr, rhs: &Expr) -> Expr {
    // bilinearity over sums, left operand first
    if let Expr::Add(terms) = lhs {
        let mut sum = SumBuilder::default();
        for term in terms {
            sum.add(dot(term, rhs));
        }
        return sum.into();
    }

    if let Expr::Add(terms) = rhs {
        let mut sum = SumBuilder::default();
        for term in terms {
            sum.add(dot(lhs, term));
        }
        return sum.into();
    }

    let (mut first, first_scalars) = separate(lhs);
    let (mut second, second_scalars) = separate(rhs);

    // one canonical operand order, so the dot product is structurally symmetric
    if first.to_string() > second.to_string() {
        std::mem::swap(&mut first, &mut second);
    }

    let mut result = MultBuilder::default();
    for factor in first_scalars {
        result.mult(factor);
    }
    for factor in second_scalars {
        result.mult(factor);
    }
    result.mult(Expr::Dot(Box::new(first), Box::new(second)));
    result.into()
}
