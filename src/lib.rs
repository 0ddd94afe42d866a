//! Symbolic gradient and dot-product operators over abstract function spaces.
//!
//! This crate manipulates expressions built from numbers, named [`Scalar`] constants, and typed
//! function symbols with the usual sum / product / power operators, and mechanically derives
//! normalized forms for two operators applied to them:
//!
//! - [`grad`], a unary linear differential operator. It distributes over sums, applies the
//!   product rule to products and the power rule to powers, vanishes on constants, and leaves
//!   an irreducible [`Expr::Grad`] node on the function symbols themselves.
//! - [`dot`], a bilinear form. It distributes over sums in either operand, pulls all scalar
//!   factors out into a single coefficient, and stores the remaining vector aggregates in one
//!   canonical order, so the result is structurally symmetric in its arguments.
//!
//! Neither operator knows anything about a concrete geometry: there are no coordinates, no
//! basis vectors, and no dimension. The engines only rewrite expressions into a normal form in
//! which `Grad` and `Dot` appear exactly where they are irreducible.
//!
//! Function symbols are declared against a [`FunctionSpace`], a nominal tag that fixes whether
//! its functions are scalar-valued or vector-valued. Declaring a [`ScalarFunction`] over a
//! vector space (or vice versa) is a construction-time [`Error`].
//!
//! # Examples
//!
//! Gradients of scalar functions:
//!
//! ```
//! use vform::{dot, grad, Expr, FunctionSpace, ScalarFunction};
//!
//! let space = FunctionSpace::scalar("V");
//! let u = Expr::from(ScalarFunction::new("u", space.clone())?);
//! let v = Expr::from(ScalarFunction::new("v", space)?);
//!
//! // the gradient distributes over sums and vanishes on constants
//! assert_eq!(
//!     grad(&(u.clone() + v.clone() + Expr::from(3))),
//!     grad(&u) + grad(&v),
//! );
//!
//! // the weak Laplacian, an irreducible dot of two gradients
//! let laplacian = dot(&grad(&u), &grad(&v));
//! assert_eq!(
//!     laplacian,
//!     Expr::Dot(
//!         Box::new(Expr::Grad(Box::new(u))),
//!         Box::new(Expr::Grad(Box::new(v))),
//!     ),
//! );
//! # Ok::<(), vform::Error>(())
//! ```
//!
//! Vector functions and bilinearity:
//!
//! ```
//! use vform::{dot, Expr, FunctionSpace, Scalar, VectorFunction};
//!
//! let space = FunctionSpace::vector("W");
//! let u = Expr::from(VectorFunction::new("u", space.clone())?);
//! let v = Expr::from(VectorFunction::new("v", space)?);
//! let alpha = Expr::from(Scalar::new("alpha"));
//!
//! assert_eq!(dot(&(alpha.clone() * u.clone()), &v), alpha * dot(&u, &v));
//! assert_eq!(dot(&u, &v), dot(&v, &u));
//! # Ok::<(), vform::Error>(())
//! ```

mod builder;

pub mod consts;
pub mod dot;
pub mod error;
pub mod expr;
pub mod function;
pub mod grad;
pub mod primitive;

pub use dot::dot;
pub use error::Error;
pub use expr::{Expr, Primary, Scalar};
pub use function::{Component, FunctionSpace, ScalarFunction, SpaceKind, VectorFunction};
pub use grad::grad;
