//! Helpers to assemble sums and products while applying the trivial identities.
//!
//! The expression operators in [`expr`](crate::expr) do no simplification: `0 + x` stays a
//! two-term sum. The operator engines instead accumulate their results through these builders,
//! which drop zero addends, collapse a product with a zero factor, skip unity factors, combine
//! numeric factors, and splice nested sums / products flat, so that engine output obeys the
//! same canonical form as user-built input.

use crate::consts::ZERO;
use crate::expr::{Expr, Primary};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is a cheap syntactic check and
/// is not mathematically rigorous.
pub(crate) fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Integer(i)) => i.is_zero(),
        Expr::Primary(Primary::Float(f)) => f.is_zero(),
        Expr::Add(terms) => terms.iter().all(is_trivially_zero),
        Expr::Mul(factors) => factors.iter().any(is_trivially_zero),
        Expr::Exp(base, exponent) => is_trivially_zero(base) && !is_trivially_zero(exponent),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one. This is a cheap syntactic check and
/// is not mathematically rigorous.
pub(crate) fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Integer(i)) => *i == 1,
        Expr::Primary(Primary::Float(f)) => *f == 1,
        Expr::Mul(factors) => factors.iter().all(is_trivially_unity),
        Expr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        Expr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Returns `true` if `factor` is a numeric atom of the same type as `num`, so the two can be
/// multiplied through immediately.
fn same_numeric_type(factor: &Expr, num: &Primary) -> bool {
    matches!(
        (factor, num),
        (Expr::Primary(Primary::Integer(_)), Primary::Integer(_))
            | (Expr::Primary(Primary::Float(_)), Primary::Float(_)),
    )
}

/// Builds a product of expressions. A trivially-zero factor collapses the whole product to
/// zero; trivially-unity factors are skipped; numeric factors of the same type are multiplied
/// through; nested products are spliced flat.
#[derive(Default)]
pub(crate) struct MultBuilder(Vec<Expr>);

impl MultBuilder {
    pub(crate) fn mult(&mut self, e: Expr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![ZERO.clone()];
            return;
        }

        if is_trivially_unity(&e) {
            return;
        }

        match e {
            Expr::Mul(factors) => {
                for factor in factors {
                    self.mult(factor);
                }
            },
            Expr::Primary(num) if matches!(num, Primary::Integer(_) | Primary::Float(_)) => {
                match self.0.iter().position(|factor| same_numeric_type(factor, &num)) {
                    Some(idx) => {
                        let combined = match self.0.swap_remove(idx) {
                            Expr::Primary(existing) => existing * num,
                            _ => unreachable!(),
                        };
                        if !is_trivially_unity(&combined) {
                            self.0.push(combined);
                        }
                    },
                    None => self.0.push(Expr::Primary(num)),
                }
            },
            e => self.0.push(e),
        }
    }
}

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::Mul(value.0).downgrade()
    }
}

/// Builds a sum of expressions. Trivially-zero addends are dropped; nested sums are spliced
/// flat.
#[derive(Default)]
pub(crate) struct SumBuilder(Vec<Expr>);

impl SumBuilder {
    pub(crate) fn add(&mut self, e: Expr) {
        if is_trivially_zero(&e) {
            return;
        }

        match e {
            Expr::Add(terms) => self.0.extend(terms),
            e => self.0.push(e),
        }
    }
}

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::Add(value.0).downgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Scalar;
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::from(Scalar::new(name))
    }

    #[test]
    fn product_collapses_on_zero() {
        let mut product = MultBuilder::default();
        product.mult(sym("x"));
        product.mult(Expr::from(0));
        product.mult(sym("y"));
        assert_eq!(Expr::from(product), Expr::from(0));
    }

    #[test]
    fn product_skips_unity_and_flattens() {
        let mut product = MultBuilder::default();
        product.mult(Expr::from(1));
        product.mult(sym("x") * sym("y"));
        product.mult(sym("z"));
        assert_eq!(
            Expr::from(product),
            Expr::Mul(vec![sym("x"), sym("y"), sym("z")]),
        );
    }

    #[test]
    fn empty_product_is_unity() {
        let product = MultBuilder::default();
        assert_eq!(Expr::from(product), Expr::from(1));
    }

    #[test]
    fn product_combines_numeric_factors() {
        let mut product = MultBuilder::default();
        product.mult(Expr::from(2));
        product.mult(sym("x"));
        product.mult(Expr::from(3));
        assert_eq!(
            Expr::from(product),
            Expr::Mul(vec![Expr::from(6), sym("x")]),
        );

        let mut cancelling = MultBuilder::default();
        cancelling.mult(Expr::from(-1));
        cancelling.mult(Expr::from(-1));
        cancelling.mult(sym("x"));
        assert_eq!(Expr::from(cancelling), sym("x"));
    }

    #[test]
    fn sum_drops_zeros_and_flattens() {
        let mut sum = SumBuilder::default();
        sum.add(Expr::from(0));
        sum.add(sym("x") + sym("y"));
        sum.add(sym("z"));
        assert_eq!(
            Expr::from(sum),
            Expr::Add(vec![sym("x"), sym("y"), sym("z")]),
        );
    }

    #[test]
    fn singleton_sum_downgrades() {
        let mut sum = SumBuilder::default();
        sum.add(sym("x"));
        sum.add(Expr::from(0));
        assert_eq!(Expr::from(sum), sym("x"));

        let empty = SumBuilder::default();
        assert_eq!(Expr::from(empty), Expr::from(0));
    }
}
