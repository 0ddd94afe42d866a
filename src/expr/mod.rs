//! The algebraic expression tree that the operator engines rewrite.
//!
//! Expressions are represented as a tree of [`Expr`] nodes that **flattens** out nested sums and
//! products: `x + (y + z)` is a single [`Expr::Add`] node with _three_ children, `x`, `y`, and
//! `z`. Flattening keeps every term of a sum (and every factor of a product) at the same level
//! of the tree, which is what the rewrite rules for the gradient and dot-product operators case
//! on.
//!
//! # Strict equality
//!
//! Determining whether two expressions are *semantically* equal is hard: `x^2 + 2x + 1` and
//! `(x + 1)^2` denote the same value but share no structure. This module instead implements
//! **strict equality**, a cheap structural subset of semantic equality:
//!
//! - Both expressions must be the same variant.
//! - Two [`Expr::Primary`] nodes must hold strictly equal atoms.
//! - Two [`Expr::Add`] or [`Expr::Mul`] nodes must have strictly equal terms / factors, in any
//!   order.
//! - [`Expr::Exp`], [`Expr::Grad`], and [`Expr::Dot`] nodes compare their children positionally.
//!
//! Strict equality never reports false positives: strictly equal expressions are always
//! semantically equal, while the converse does not hold. The [`PartialEq`] implementation for
//! [`Expr`] is strict equality, and it is the equality the operator engines are normalized
//! under: `dot(u, v)` and `dot(v, u)` return *strictly* equal expressions.

mod iter;

use crate::consts::ONE;
use crate::function::{Component, ScalarFunction, VectorFunction};
use crate::primitive::int;
use iter::ExprIter;
use rug::{Float, Integer};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An atomic named placeholder for a dimensionless numeric quantity.
///
/// Two scalars are equal iff their names are equal; the optional label only affects how the
/// scalar is rendered.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scalar {
    name: String,
    label: Option<String>,
}

impl Scalar {
    /// Creates a new scalar with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), label: None }
    }

    /// Creates a new scalar with the given name and display label.
    pub fn with_label(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: Some(label.into()) }
    }

    /// The name identifying this scalar.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label shown when this scalar is rendered, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::hash::Hash for Scalar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A single term / factor: a number, a scalar constant, or a function-space atom.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A named scalar constant, such as `alpha`.
    Scalar(Scalar),

    /// An element of a scalar-valued function space.
    ScalarFunction(ScalarFunction),

    /// An element of a vector-valued function space.
    VectorFunction(VectorFunction),

    /// One indexed component of a vector function.
    Component(Component),
}

/// [`Hash`] is implemented manually to allow hashing [`Primary::Float`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN` or `Infinity`)! Report any bugs that
/// cause this to happen.
impl std::hash::Hash for Primary {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => int.hash(state),
            Self::Float(float) => {
                // zero has no significand
                match float.get_significand() {
                    Some(significand) => significand.hash(state),
                    None => 0u32.hash(state),
                }
            },
            Self::Scalar(scalar) => scalar.hash(state),
            Self::ScalarFunction(func) => func.hash(state),
            Self::VectorFunction(func) => func.hash(state),
            Self::Component(component) => component.hash(state),
        }
    }
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN` or `Infinity`)! Report any bugs that
/// cause this to happen.
impl Eq for Primary {}

impl Primary {
    /// Returns true if this atom stands for a plain numeric quantity: a literal number or a
    /// named [`Scalar`] constant.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_) | Self::Scalar(_))
    }
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Scalar(scalar) => write!(f, "{}", scalar),
            Self::ScalarFunction(func) => write!(f, "{}", func),
            Self::VectorFunction(func) => write!(f, "{}", func),
            Self::Component(component) => write!(f, "{}", component),
        }
    }
}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Add`].
impl Add<Primary> for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                Expr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                Expr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => Expr::Add(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in an [`Expr::Mul`].
impl Mul<Primary> for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                Expr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                Expr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => Expr::Mul(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// A symbolic expression: an atom, or sums, products, powers, and operator applications built
/// over atoms.
///
/// Nested sums and products are kept flat: an [`Expr::Add`] never directly contains another
/// [`Expr::Add`] produced by this module's operators, and likewise for [`Expr::Mul`]. See the
/// [module-level documentation](self) for the equality semantics.
#[derive(Debug, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),

    /// A gradient application that no rewrite rule reduced further.
    ///
    /// Building this variant directly never triggers evaluation; use [`grad`](crate::grad) for
    /// the evaluating constructor.
    Grad(Box<Expr>),

    /// A dot-product application that no rewrite rule reduced further, with its operands stored
    /// in canonical order.
    ///
    /// Building this variant directly never triggers evaluation; use [`dot`](crate::dot) for
    /// the evaluating constructor.
    Dot(Box<Expr>, Box<Expr>),
}

/// Precedence of the operator a node represents, used to decide parenthesization when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Add,
    Mul,
    Exp,
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    if matches!(factor.cmp_precedence(self), Ordering::Less) {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if matches!(factor.cmp_precedence(self), Ordering::Less) {
                            write!(f, " * ({})", factor)?;
                        } else {
                            write!(f, " * {}", factor)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if matches!(base.cmp_precedence(self), Ordering::Less) {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if matches!(exp.cmp_precedence(self), Ordering::Less) {
                    write!(f, "({})", exp)?;
                } else {
                    write!(f, "{}", exp)?;
                }
                Ok(())
            },
            Self::Grad(arg) => write!(f, "Grad({})", arg),
            Self::Dot(lhs, rhs) => write!(f, "Dot({}, {})", lhs, rhs),
        }
    }
}

impl Expr {
    /// Returns the precedence of the expression, or [`None`] for atoms and operator
    /// applications, which bind tightest.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(_) | Self::Grad(_) | Self::Dot(_, _) => None,
            Self::Add(_) => Some(Precedence::Add),
            Self::Mul(_) => Some(Precedence::Mul),
            Self::Exp(_, _) => Some(Precedence::Exp),
        }
    }

    /// Compares the precedence of two expressions.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        }
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained
    /// integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Decomposes this expression into its addend list. A sum yields its terms; any other
    /// expression yields itself as the only term.
    pub fn into_terms(self) -> Vec<Expr> {
        match self {
            Self::Add(terms) => terms,
            expr => vec![expr],
        }
    }

    /// Decomposes this expression into its factor list. A product yields its factors; any other
    /// expression yields itself as the only factor.
    pub fn into_factors(self) -> Vec<Expr> {
        match self {
            Self::Mul(factors) => factors,
            expr => vec![expr],
        }
    }

    /// Returns this expression raised to the given power.
    ///
    /// The trivial exponents collapse: `b^1 = b` and `b^0 = 1`. Any other exponent produces an
    /// [`Expr::Exp`] node.
    pub fn pow(self, exponent: Expr) -> Self {
        if let Some(n) = exponent.as_integer() {
            if *n == 1 {
                return self;
            }
            if *n == 0 {
                return ONE.clone();
            }
        }

        Self::Exp(Box::new(self), Box::new(exponent))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the
    /// expression into the single term / factor, or an [`Expr::Primary`] containing the integer
    /// 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::Primary(Primary::Integer(int(0)))
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::Primary(Primary::Integer(int(1)))
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// Two expressions are strictly equal if they are the same variant, their atoms are equal, the
/// terms / factors of their sums / products are equal in any order, and the children of their
/// powers and operator applications are equal positionally.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            (Self::Grad(lhs), Self::Grad(rhs)) => lhs == rhs,
            (Self::Dot(lhs_a, lhs_b), Self::Dot(rhs_a, rhs_b)) => {
                lhs_a == rhs_a && lhs_b == rhs_b
            },
            _ => false,
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`Expr::Add`], in which case both are combined in
/// one list of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`Expr::Mul`], in which case both are combined in
/// one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

/// Subtracts `rhs` from this expression, represented as `lhs + -1 * rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

/// Divides this expression by `rhs`, represented as `lhs * rhs^-1`.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * Self::Exp(
            Box::new(rhs),
            Box::new(Self::Primary(Primary::Integer(int(-1)))),
        )
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        Self::Primary(primary)
    }
}

impl From<Integer> for Expr {
    fn from(n: Integer) -> Self {
        Self::Primary(Primary::Integer(n))
    }
}

impl From<Float> for Expr {
    fn from(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::Primary(Primary::Integer(int(n)))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::Primary(Primary::Integer(int(n)))
    }
}

impl From<u32> for Expr {
    fn from(n: u32) -> Self {
        Self::Primary(Primary::Integer(int(n)))
    }
}

impl From<Scalar> for Expr {
    fn from(scalar: Scalar) -> Self {
        Self::Primary(Primary::Scalar(scalar))
    }
}

impl From<ScalarFunction> for Expr {
    fn from(func: ScalarFunction) -> Self {
        Self::Primary(Primary::ScalarFunction(func))
    }
}

impl From<VectorFunction> for Expr {
    fn from(func: VectorFunction) -> Self {
        Self::Primary(Primary::VectorFunction(func))
    }
}

impl From<Component> for Expr {
    fn from(component: Component) -> Self {
        Self::Primary(Primary::Component(component))
    }
}
