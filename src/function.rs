//! Function spaces and the typed function symbols that inhabit them.
//!
//! A [`FunctionSpace`] is a nominal tag: two spaces with the same name and kind are
//! interchangeable, and the space itself supports no algebra. [`ScalarFunction`]s and
//! [`VectorFunction`]s are atomic symbols tied to a space of the matching kind; a
//! [`VectorFunction`] can additionally be indexed to produce a [`Component`], an atom standing
//! for one scalar component of the vector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::expr::Expr;
use std::fmt;

/// The kind of values taken by the functions of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpaceKind {
    /// The functions of the space are scalar-valued.
    Scalar,

    /// The functions of the space are vector-valued.
    Vector,
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Vector => write!(f, "vector"),
        }
    }
}

/// An abstract space of functions, identified purely by its name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionSpace {
    name: String,
    kind: SpaceKind,
}

impl FunctionSpace {
    /// Creates a new space with the given name and kind.
    pub fn new(name: impl Into<String>, kind: SpaceKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// Creates a new space of scalar-valued functions.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, SpaceKind::Scalar)
    }

    /// Creates a new space of vector-valued functions.
    pub fn vector(name: impl Into<String>) -> Self {
        Self::new(name, SpaceKind::Vector)
    }

    /// The name identifying this space.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of values taken by the functions of this space.
    pub fn kind(&self) -> SpaceKind {
        self.kind
    }

    /// Combines two spaces into a product space.
    ///
    /// Spaces are nominal tags, not algebraic values; this always fails.
    pub fn product(&self, _other: &FunctionSpace) -> Result<FunctionSpace, Error> {
        Err(Error::UnsupportedSpaceOp("product of function spaces"))
    }
}

impl fmt::Display for FunctionSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An atomic symbol naming an element of a scalar-valued function space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarFunction {
    name: String,
    space: FunctionSpace,
}

impl ScalarFunction {
    /// Creates a new scalar function belonging to `space`.
    ///
    /// Fails unless `space` is a space of scalar-valued functions.
    pub fn new(name: impl Into<String>, space: FunctionSpace) -> Result<Self, Error> {
        let name = name.into();
        if space.kind() != SpaceKind::Scalar {
            return Err(Error::SpaceMismatch {
                name,
                expected: SpaceKind::Scalar,
                found: space.kind(),
            });
        }

        Ok(Self { name, space })
    }

    /// The name of this function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The space this function belongs to.
    pub fn space(&self) -> &FunctionSpace {
        &self.space
    }
}

impl fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An atomic symbol naming an element of a vector-valued function space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VectorFunction {
    name: String,
    space: FunctionSpace,
}

impl VectorFunction {
    /// Creates a new vector function belonging to `space`.
    ///
    /// Fails unless `space` is a space of vector-valued functions.
    pub fn new(name: impl Into<String>, space: FunctionSpace) -> Result<Self, Error> {
        let name = name.into();
        if space.kind() != SpaceKind::Vector {
            return Err(Error::SpaceMismatch {
                name,
                expected: SpaceKind::Vector,
                found: space.kind(),
            });
        }

        Ok(Self { name, space })
    }

    /// The name of this function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The space this function belongs to.
    pub fn space(&self) -> &FunctionSpace {
        &self.space
    }

    /// Returns the component of this function selected by the given indices.
    ///
    /// Exactly one index must be supplied.
    pub fn index(&self, indices: &[Expr]) -> Result<Component, Error> {
        match indices {
            [index] => Ok(Component {
                base: self.clone(),
                index: Box::new(index.clone()),
            }),
            _ => Err(Error::IndexArity { found: indices.len() }),
        }
    }
}

impl fmt::Display for VectorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One scalar component of a [`VectorFunction`], selected by an index expression.
///
/// A component's identity is the (base, index) pair: `u[0]` and `u[1]` are distinct atoms, and
/// both are distinct from `u` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    base: VectorFunction,
    index: Box<Expr>,
}

impl Component {
    /// The vector function this component is drawn from.
    pub fn base(&self) -> &VectorFunction {
        &self.base
    }

    /// The index expression selecting this component.
    pub fn index(&self) -> &Expr {
        &self.index
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.base, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spaces_are_nominal() {
        assert_eq!(FunctionSpace::scalar("V"), FunctionSpace::scalar("V"));
        assert_ne!(FunctionSpace::scalar("V"), FunctionSpace::scalar("W"));
        assert_ne!(FunctionSpace::scalar("V"), FunctionSpace::vector("V"));
    }

    #[test]
    fn space_product_is_unsupported() {
        let v = FunctionSpace::scalar("V");
        let w = FunctionSpace::vector("W");
        assert_eq!(
            v.product(&w),
            Err(Error::UnsupportedSpaceOp("product of function spaces")),
        );
    }

    #[test]
    fn scalar_function_requires_scalar_space() {
        let v = FunctionSpace::scalar("V");
        let w = FunctionSpace::vector("W");

        assert!(ScalarFunction::new("u", v).is_ok());
        assert_eq!(
            ScalarFunction::new("u", w),
            Err(Error::SpaceMismatch {
                name: "u".to_string(),
                expected: SpaceKind::Scalar,
                found: SpaceKind::Vector,
            }),
        );
    }

    #[test]
    fn vector_function_requires_vector_space() {
        let v = FunctionSpace::scalar("V");
        let w = FunctionSpace::vector("W");

        assert!(VectorFunction::new("u", w).is_ok());
        assert_eq!(
            VectorFunction::new("u", v),
            Err(Error::SpaceMismatch {
                name: "u".to_string(),
                expected: SpaceKind::Vector,
                found: SpaceKind::Scalar,
            }),
        );
    }

    #[test]
    fn indexing_takes_exactly_one_index() {
        let u = VectorFunction::new("u", FunctionSpace::vector("W")).unwrap();

        assert!(u.index(&[Expr::from(0)]).is_ok());
        assert_eq!(u.index(&[]), Err(Error::IndexArity { found: 0 }));
        assert_eq!(
            u.index(&[Expr::from(0), Expr::from(1)]),
            Err(Error::IndexArity { found: 2 }),
        );
    }

    #[test]
    fn component_identity_is_base_and_index() {
        let u = VectorFunction::new("u", FunctionSpace::vector("W")).unwrap();
        let v = VectorFunction::new("v", FunctionSpace::vector("W")).unwrap();

        assert_eq!(u.index(&[Expr::from(0)]), u.index(&[Expr::from(0)]));
        assert_ne!(u.index(&[Expr::from(0)]), u.index(&[Expr::from(1)]));
        assert_ne!(u.index(&[Expr::from(0)]), v.index(&[Expr::from(0)]));

        let component = u.index(&[Expr::from(0)]).unwrap();
        assert_ne!(Expr::from(component.clone()), Expr::from(u));
        assert_eq!(component.to_string(), "u[0]");
    }
}
