//! The multi-indexed coordinate store: a recursive tree of scalars addressed
//! by index tuples

use crate::error::{Error, Result};

/// A multi-indexed collection of scalars. A collection of dimension `d > 0`
/// owns `range` children of dimension `d - 1`; a collection of dimension 0 is
/// a single scalar. A tensor of arity `a` over an n-dimensional space stores
/// its coordinates in a `Coords` of dimension `a` and per-level range `n`,
/// which therefore holds `n^a` leaves.
///
/// Higher layers interact with the store almost exclusively through deep
/// addressing ([`Coords::get`] / [`Coords::get_mut`]) by a full index tuple;
/// one-level access ([`Coords::item`] / [`Coords::set_item`]) exists for the
/// recursive matrix unpacking, which assembles trees level by level.
#[derive(Debug, Clone, PartialEq)]
pub enum Coords {
    /// A single scalar: the leaf of the tree, dimension 0
    Scalar(f64),
    /// An ordered row of child collections, each of dimension one less than
    /// this node
    Vector { dimension: usize, items: Vec<Coords> },
}

impl Coords {
    /// Build a zero-initialized collection of the given dimension, with
    /// `range` children per level. Dimension 0 yields a single zero scalar
    pub fn zeros(dimension: usize, range: usize) -> Self {
        if dimension == 0 {
            return Coords::Scalar(0.0);
        }
        Coords::Vector {
            dimension,
            items: (0..range).map(|_| Self::zeros(dimension - 1, range)).collect(),
        }
    }

    /// The number of indices needed to address a scalar in this collection
    pub fn dimension(&self) -> usize {
        match self {
            Coords::Scalar(_) => 0,
            Coords::Vector { dimension, .. } => *dimension,
        }
    }

    /// Deep addressing: the scalar at `indices`. The tuple length must equal
    /// the collection's dimension, and each component must be within range
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        match self {
            Coords::Scalar(x) if indices.is_empty() => Ok(*x),
            Coords::Vector { dimension, items } if indices.len() == *dimension => {
                let i = indices[0];
                if i >= items.len() {
                    return Err(Error::IndexOutOfRange { index: i, range: items.len() });
                }
                items[i].get(&indices[1..])
            }
            _ => Err(Error::IndexLength {
                expected: self.dimension(),
                got: indices.len(),
            }),
        }
    }

    /// Deep addressing, mutably: a reference to the scalar at `indices`.
    /// Writing through the reference mutates the tree; all higher-level write
    /// operations go through here
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut f64> {
        // Read the dimension up front: the match borrows `self` mutably for
        // the returned reference, so the error arm cannot call methods on it
        let expected = self.dimension();
        match self {
            Coords::Scalar(x) if indices.is_empty() => Ok(x),
            Coords::Vector { dimension, items } if indices.len() == *dimension => {
                let i = indices[0];
                if i >= items.len() {
                    return Err(Error::IndexOutOfRange { index: i, range: items.len() });
                }
                items[i].get_mut(&indices[1..])
            }
            _ => Err(Error::IndexLength {
                expected,
                got: indices.len(),
            }),
        }
    }

    /// One-level read access: the `i`-th child collection. Scalars have no
    /// children
    pub fn item(&self, i: usize) -> Option<&Coords> {
        match self {
            Coords::Scalar(_) => None,
            Coords::Vector { items, .. } => items.get(i),
        }
    }

    /// One-level write access: replace the `i`-th child. The child's dimension
    /// must be exactly one less than this collection's, else the tree would no
    /// longer be addressable by fixed-length tuples
    pub fn set_item(&mut self, i: usize, child: Coords) -> Result<()> {
        match self {
            Coords::Scalar(_) => Err(Error::ChildDimension {
                parent: 0,
                child: child.dimension(),
            }),
            Coords::Vector { dimension, items } => {
                if child.dimension() + 1 != *dimension {
                    return Err(Error::ChildDimension {
                        parent: *dimension,
                        child: child.dimension(),
                    });
                }
                if i >= items.len() {
                    return Err(Error::IndexOutOfRange { index: i, range: items.len() });
                }
                items[i] = child;
                Ok(())
            }
        }
    }

    /// Multiply every scalar of the collection by `factor`, in place
    pub fn scale(&mut self, factor: f64) {
        match self {
            Coords::Scalar(x) => *x *= factor,
            Coords::Vector { items, .. } => {
                for item in items {
                    item.scale(factor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    simple_eqs! {
        scalar_dimension: Coords::zeros(0, 4).dimension() => 0,
        deep_dimension: Coords::zeros(3, 2).dimension() => 3,
        zero_initialized: Coords::zeros(2, 3).get(&[2, 1]) => Ok(0.0),
        scalar_get: Coords::Scalar(5.0).get(&[]) => Ok(5.0),
        tuple_too_short: Coords::zeros(2, 2).get(&[1]) =>
            Err(Error::IndexLength { expected: 2, got: 1 }),
        tuple_too_long: Coords::zeros(1, 2).get(&[0, 0]) =>
            Err(Error::IndexLength { expected: 1, got: 2 }),
        component_out_of_range: Coords::zeros(2, 2).get(&[0, 2]) =>
            Err(Error::IndexOutOfRange { index: 2, range: 2 }),
    }

    #[test]
    fn write_through_reference() {
        let mut c = Coords::zeros(2, 2);
        *c.get_mut(&[1, 0]).unwrap() = 7.5;
        assert_eq!(c.get(&[1, 0]), Ok(7.5));
        assert_eq!(c.get(&[0, 1]), Ok(0.0));
    }

    #[test]
    fn mutable_access_rejects_bad_tuples() {
        let mut c = Coords::zeros(2, 2);
        assert_eq!(
            c.get_mut(&[1]).err(),
            Some(Error::IndexLength { expected: 2, got: 1 })
        );
        assert_eq!(
            c.get_mut(&[0, 0, 0]).err(),
            Some(Error::IndexLength { expected: 2, got: 3 })
        );
        assert_eq!(
            c.get_mut(&[0, 2]).err(),
            Some(Error::IndexOutOfRange { index: 2, range: 2 })
        );
    }

    #[test]
    fn set_item_checks_child_dimension() {
        let mut c = Coords::zeros(2, 2);
        assert_eq!(
            c.set_item(0, Coords::zeros(2, 2)),
            Err(Error::ChildDimension { parent: 2, child: 2 })
        );
        assert_eq!(c.set_item(1, Coords::zeros(1, 2)), Ok(()));
        assert_eq!(c.item(1).map(Coords::dimension), Some(1));
        assert_eq!(Coords::Scalar(0.0).item(0), None);
    }

    #[test]
    fn scale_reaches_every_leaf() {
        let mut c = Coords::zeros(2, 2);
        *c.get_mut(&[0, 0]).unwrap() = 1.0;
        *c.get_mut(&[1, 1]).unwrap() = -2.0;
        c.scale(3.0);
        assert_eq!(c.get(&[0, 0]), Ok(3.0));
        assert_eq!(c.get(&[1, 1]), Ok(-6.0));
        assert_eq!(c.get(&[0, 1]), Ok(0.0));
    }
}
