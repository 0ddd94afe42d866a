//! Commonly used constants of the expression type, initialized lazily and cloned on use.

use crate::expr::{Expr, Primary};
use crate::primitive::int;
use once_cell::sync::Lazy;

/// The additive identity.
pub static ZERO: Lazy<Expr> = Lazy::new(|| Expr::Primary(Primary::Integer(int(0))));

/// The multiplicative identity.
pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::Primary(Primary::Integer(int(1))));
