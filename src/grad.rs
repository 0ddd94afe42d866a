//! The gradient operator.
//!
//! [`grad`] rewrites the gradient of an expression into a normalized equivalent: it distributes
//! over sums, applies the product rule to products and the power rule to powers, and terminates
//! on atoms. Gradients of numbers and of [`Scalar`](crate::Scalar) constants vanish; gradients
//! of function-space atoms are irreducible and survive as [`Expr::Grad`] nodes.

use crate::builder::{MultBuilder, SumBuilder};
use crate::consts::ZERO;
use crate::expr::{Expr, Primary};
use crate::primitive::int;

/// `Grad(f + g) = Grad(f) + Grad(g)`
fn sum_rule(terms: &[Expr]) -> Expr {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(grad(term));
    }
    sum.into()
}

/// `Grad(f * g) = f * Grad(g) + g * Grad(f)`
///
/// An n-ary product is handled by a single binary split: `f` is the first factor and `g` the
/// product of all remaining factors, which the substrate's flattening has already collapsed
/// into one effective factor.
fn product_rule(factors: &[Expr]) -> Expr {
    let (left, rest) = match factors.split_first() {
        Some(split) => split,
        None => return ZERO.clone(),
    };
    let right = Expr::Mul(rest.to_vec()).downgrade();

    let d_left = grad(left);
    let d_right = grad(&right);

    let mut sum = SumBuilder::default();

    let mut lhs = MultBuilder::default();
    lhs.mult(left.clone());
    lhs.mult(d_right);
    sum.add(lhs.into());

    let mut rhs = MultBuilder::default();
    rhs.mult(right);
    rhs.mult(d_left);
    sum.add(rhs.into());

    sum.into()
}

/// `Grad(b^e) = e * Grad(b) * b^(e-1)`, distributed over the addends of `Grad(b)` when the
/// inner gradient is itself a sum.
///
/// The exponent is lowered symbolically, so it is not required to be numeric.
fn power_rule(base: &Expr, exponent: &Expr) -> Expr {
    let a = grad(base);
    let lowered = base
        .clone()
        .pow(exponent.clone() + Expr::Primary(Primary::Integer(int(-1))));

    if let Expr::Add(terms) = a {
        let mut sum = SumBuilder::default();
        for term in terms {
            let mut product = MultBuilder::default();
            product.mult(exponent.clone());
            product.mult(lowered.clone());
            product.mult(term);
            sum.add(product.into());
        }
        sum.into()
    } else {
        let mut product = MultBuilder::default();
        product.mult(exponent.clone());
        product.mult(a);
        product.mult(lowered);
        product.into()
    }
}

/// Returns a normalized expression representing the gradient of `expr`.
///
/// The returned expression contains [`Expr::Grad`] nodes only where they are irreducible, i.e.
/// applied directly to an atom that carries a non-zero gradient (a function-space symbol) or to
/// an opaque operator application. Building the [`Expr::Grad`] variant directly produces the
/// raw, unevaluated node instead and never re-enters evaluation.
pub fn grad(expr: &Expr) -> Expr {
    match expr {
        Expr::Add(terms) => sum_rule(terms),
        Expr::Mul(factors) => product_rule(factors),
        Expr::Exp(base, exponent) => power_rule(base, exponent),
        Expr::Primary(primary) if primary.is_number() => ZERO.clone(),
        expr => Expr::Grad(Box::new(expr.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Scalar;
    use crate::function::{FunctionSpace, ScalarFunction, VectorFunction};
    use pretty_assertions::assert_eq;

    fn scalar_functions() -> (Expr, Expr) {
        let space = FunctionSpace::scalar("V");
        let u = Expr::from(ScalarFunction::new("u", space.clone()).unwrap());
        let v = Expr::from(ScalarFunction::new("v", space).unwrap());
        (u, v)
    }

    fn sym(name: &str) -> Expr {
        Expr::from(Scalar::new(name))
    }

    #[test]
    fn constants_vanish() {
        assert_eq!(grad(&Expr::from(3)), Expr::from(0));
        assert_eq!(grad(&sym("alpha")), Expr::from(0));
    }

    #[test]
    fn distributes_over_sums() {
        let (u, v) = scalar_functions();

        assert_eq!(
            grad(&(u.clone() + v.clone())),
            grad(&u) + grad(&v),
        );
        assert_eq!(grad(&(u.clone() + Expr::from(3))), grad(&u));
        assert_eq!(grad(&(u.clone() + sym("alpha"))), grad(&u));
    }

    #[test]
    fn scalar_factors_pull_out() {
        let (u, _) = scalar_functions();

        assert_eq!(
            grad(&(Expr::from(3) * u.clone())),
            Expr::from(3) * grad(&u),
        );
        assert_eq!(
            grad(&(sym("alpha") * u.clone())),
            sym("alpha") * grad(&u),
        );
    }

    #[test]
    fn product_rule() {
        let (u, v) = scalar_functions();

        assert_eq!(
            grad(&(u.clone() * v.clone())),
            v.clone() * grad(&u) + u.clone() * grad(&v),
        );
    }

    #[test]
    fn quotient_rule() {
        let (u, v) = scalar_functions();

        assert_eq!(
            grad(&(u.clone() / v.clone())),
            v.clone().pow(Expr::from(-1)) * grad(&u)
                - u.clone() * v.clone().pow(Expr::from(-2)) * grad(&v),
        );
    }

    #[test]
    fn power_rule_integer_exponent() {
        let (u, _) = scalar_functions();

        assert_eq!(
            grad(&u.clone().pow(Expr::from(2))),
            Expr::from(2) * u.clone() * grad(&u),
        );
    }

    #[test]
    fn power_rule_symbolic_exponent() {
        let (u, _) = scalar_functions();
        let n = sym("n");

        assert_eq!(
            grad(&u.clone().pow(n.clone())),
            n.clone() * grad(&u) * u.clone().pow(n + Expr::from(-1)),
        );
    }

    #[test]
    fn power_rule_distributes_over_inner_gradient() {
        let (u, v) = scalar_functions();
        let base = u.clone() + v.clone();

        assert_eq!(
            grad(&base.clone().pow(Expr::from(2))),
            Expr::from(2) * base.clone() * grad(&u)
                + Expr::from(2) * base * grad(&v),
        );
    }

    #[test]
    fn function_atoms_are_irreducible() {
        let (u, _) = scalar_functions();
        assert_eq!(grad(&u), Expr::Grad(Box::new(u.clone())));

        let w = Expr::from(VectorFunction::new("w", FunctionSpace::vector("W")).unwrap());
        assert_eq!(grad(&w), Expr::Grad(Box::new(w.clone())));

        let component = VectorFunction::new("w", FunctionSpace::vector("W"))
            .unwrap()
            .index(&[Expr::from(0)])
            .unwrap();
        let component = Expr::from(component);
        assert_eq!(grad(&component), Expr::Grad(Box::new(component.clone())));
    }

    #[test]
    fn opaque_operator_applications_are_wrapped() {
        let (u, _) = scalar_functions();
        let inner = grad(&u);
        assert_eq!(grad(&inner), Expr::Grad(Box::new(inner.clone())));
    }

    #[test]
    fn construction_is_repeatable() {
        let (u, v) = scalar_functions();
        let expr = sym("alpha") * u.clone() * v.clone() + u.clone().pow(Expr::from(3));
        assert_eq!(grad(&expr), grad(&expr));
    }
}
