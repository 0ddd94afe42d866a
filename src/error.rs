//! Errors raised when constructing domain values.

use crate::function::SpaceKind;
use std::fmt;

/// An error raised by one of the domain type constructors.
///
/// All errors are raised synchronously at the offending construction call. The operator engines
/// themselves never fail: an expression shape no rewrite rule matches degrades to an irreducible
/// operator node instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A function was declared over a space of the wrong kind, such as a scalar function over a
    /// space of vector-valued functions.
    SpaceMismatch {
        /// The name of the function being declared.
        name: String,

        /// The kind of space the constructor requires.
        expected: SpaceKind,

        /// The kind of space that was supplied.
        found: SpaceKind,
    },

    /// A vector function was indexed with the wrong number of indices.
    IndexArity {
        /// The number of indices that were supplied.
        found: usize,
    },

    /// The requested operation is not defined for function spaces.
    UnsupportedSpaceOp(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceMismatch { name, expected, found } => write!(
                f,
                "function `{}` must belong to a {} function space, but a {} space was supplied",
                name, expected, found,
            ),
            Self::IndexArity { found } => {
                write!(f, "expected exactly one index, but {} were supplied", found)
            },
            Self::UnsupportedSpaceOp(op) => write!(f, "{} is not supported", op),
        }
    }
}

impl std::error::Error for Error {}
