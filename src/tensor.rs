//! The tensor abstraction: valence metadata plus a coordinate store, with the
//! operations of tensor algebra implemented by driving the index and
//! permutation generators over the store
//!
//! Index tuples are laid out covariant slots first: a tensor of valence (p,q)
//! is addressed by `q` covariant indices followed by `p` contravariant ones,
//! all in `0..n`.

use crate::coords::Coords;
use crate::error::{Error, Result};
use crate::{indices, perms};
use bitvec::prelude::*;
use num_integer::binomial;
use std::collections::HashMap;

/// A tensor of valence (p,q) over an n-dimensional real vector space: p
/// contravariant and q covariant index slots, coordinates held in a [`Coords`]
/// tree of dimension `p + q` and per-level range `n`.
///
/// Operations that combine two tensors never alias their stores; the in-place
/// operations ([`Tensor::scale`], [`Tensor::add`]) mutate the receiver and
/// return it for chaining, every other operation leaves its operands untouched
/// and returns a freshly allocated result.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    p: usize,
    q: usize,
    n: usize,
    arity: usize,
    coords: Coords,
}

impl Tensor {
    /// A zero tensor of valence (p,q) over a space of dimension n
    pub fn zeros(p: usize, q: usize, n: usize) -> Self {
        let arity = p + q;
        Tensor {
            p,
            q,
            n,
            arity,
            coords: Coords::zeros(arity, n),
        }
    }

    /// Build a tensor from a packed coordinate matrix, the inverse of
    /// [`Tensor::to_matrix`]. The matrix must have exactly the shape the
    /// packing rule produces for this valence and dimension
    pub fn from_matrix(matrix: &[Vec<f64>], p: usize, q: usize, n: usize) -> Result<Self> {
        let arity = p + q;
        let (rows, cols) = matrix_shape(arity, n);
        if matrix.len() != rows || matrix.iter().any(|row| row.len() != cols) {
            return Err(Error::MatrixShape {
                rows: matrix.len(),
                cols: matrix.first().map_or(0, |row| row.len()),
                expected_rows: rows,
                expected_cols: cols,
            });
        }
        Ok(Tensor {
            p,
            q,
            n,
            arity,
            coords: unpack(matrix, 0, 0, 0, arity, n)?,
        })
    }

    /// Number of contravariant slots
    pub fn p(&self) -> usize {
        self.p
    }

    /// Number of covariant slots
    pub fn q(&self) -> usize {
        self.q
    }

    /// Dimension of the underlying vector space
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of index slots, `p + q`
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The coordinate at an index tuple of length `arity`
    pub fn get(&self, idx: &[usize]) -> Result<f64> {
        self.coords.get(idx)
    }

    /// Mutable access to the coordinate at an index tuple of length `arity`
    pub fn get_mut(&mut self, idx: &[usize]) -> Result<&mut f64> {
        self.coords.get_mut(idx)
    }

    /// Evaluate the multilinear form defined by the tensor's coordinates on
    /// `arity` vectors of length `n`:
    /// the sum over every index tuple `i` of `coord(i) * prod_k vectors[k][i[k]]`
    pub fn apply(&self, vectors: &[&[f64]]) -> Result<f64> {
        if vectors.len() != self.arity || vectors.iter().any(|v| v.len() != self.n) {
            return Err(Error::VectorArguments {
                expected: self.arity,
                dim: self.n,
            });
        }
        let mut res = 0.0;
        for i in indices::generate_all(self.arity, self.n) {
            let mut term = self.coords.get(&i)?;
            for (k, v) in vectors.iter().enumerate() {
                term *= v[i[k]];
            }
            res += term;
        }
        Ok(res)
    }

    /// Expansion coefficients of an antisymmetric tensor in the canonical
    /// basis of the antisymmetric subspace, keyed by monotonic index tuple.
    /// For an antisymmetric tensor those coefficients are just its raw
    /// coordinates at strictly increasing tuples; the receiver is assumed
    /// antisymmetric, this is not checked
    pub fn decompose_antisymmetric(&self) -> Result<HashMap<Vec<usize>, f64>> {
        let mut res = HashMap::new();
        for i in indices::generate_monotonic(self.arity, self.n)? {
            let x = self.coords.get(&i)?;
            res.insert(i, x);
        }
        Ok(res)
    }

    /// Symmetrize over every index slot
    pub fn symmetrize(&self) -> Result<Tensor> {
        self.symmetrize_over(&bitvec![1; self.arity])
    }

    /// Symmetrize over the mask-true index slots: each coordinate of the
    /// result is the average of the receiver's coordinates over every
    /// permutation of the masked slots
    pub fn symmetrize_over(&self, mask: &BitSlice) -> Result<Tensor> {
        if mask.len() != self.arity {
            return Err(Error::MaskLength {
                expected: self.arity,
                got: mask.len(),
            });
        }
        let permutations = perms::generate(mask);
        let mut res = Tensor::zeros(self.p, self.q, self.n);
        for i in indices::generate_all(self.arity, self.n) {
            let mut sum = 0.0;
            for perm in &permutations {
                sum += self.coords.get(&perms::substitute(perm, &i))?;
            }
            *res.coords.get_mut(&i)? = sum;
        }
        res.scale(1.0 / factorial(mask.count_ones()) as f64);
        Ok(res)
    }

    /// Alternate (antisymmetrize) over every index slot
    pub fn alternate(&self) -> Result<Tensor> {
        self.alternate_over(&bitvec![1; self.arity])
    }

    /// Alternate over the mask-true index slots: each coordinate of the result
    /// is the signed average of the receiver's coordinates over every
    /// permutation of the masked slots, the sign being the permutation's
    /// parity.
    ///
    /// The result is antisymmetric in the masked slots, so the signed sum is
    /// computed once per monotonic tuple and then broadcast, with the right
    /// sign, to every permuted image of that tuple. Coordinates with a
    /// repeated value in the masked slots are never an image of a monotonic
    /// tuple and stay zero, as antisymmetry demands
    pub fn alternate_over(&self, mask: &BitSlice) -> Result<Tensor> {
        if mask.len() != self.arity {
            return Err(Error::MaskLength {
                expected: self.arity,
                got: mask.len(),
            });
        }
        let permutations = perms::generate(mask);
        let mut res = Tensor::zeros(self.p, self.q, self.n);
        for i in indices::generate_monotonic_over(mask, self.n)? {
            let mut sum = 0.0;
            for perm in &permutations {
                sum += perms::parity_over(perm, mask) as f64
                    * self.coords.get(&perms::substitute(perm, &i))?;
            }
            for perm in &permutations {
                let sign = perms::parity_over(perm, mask) as f64;
                *res.coords.get_mut(&perms::substitute(perm, &i))? = sign * sum;
            }
        }
        res.scale(1.0 / factorial(mask.count_ones()) as f64);
        Ok(res)
    }

    /// Tensor product. The result has valence (p + rhs.p, q + rhs.q); its
    /// index tuples are laid out with the receiver's covariant indices first,
    /// then `rhs`'s covariant ones, then the receiver's contravariant ones,
    /// then `rhs`'s contravariant ones. The matrix packing and the wedge
    /// product depend on this exact interleaving
    pub fn tensor_product(&self, rhs: &Tensor) -> Result<Tensor> {
        if self.n != rhs.n {
            return Err(self.mismatch(rhs));
        }
        let mut res = Tensor::zeros(self.p + rhs.p, self.q + rhs.q, self.n);
        for i in indices::generate_all(self.arity, self.n) {
            for j in indices::generate_all(rhs.arity, rhs.n) {
                let mut idx = Vec::with_capacity(self.arity + rhs.arity);
                idx.extend_from_slice(&i[..self.q]);
                idx.extend_from_slice(&j[..rhs.q]);
                idx.extend_from_slice(&i[self.q..]);
                idx.extend_from_slice(&j[rhs.q..]);
                *res.coords.get_mut(&idx)? = self.coords.get(&i)? * rhs.coords.get(&j)?;
            }
        }
        Ok(res)
    }

    /// Wedge (exterior) product: the alternation of the tensor product,
    /// scaled by `(a + b)! / (a! * b!)` where `a` and `b` are the operands'
    /// arities. Both operands are assumed antisymmetric already; this is not
    /// checked, and the result is meaningless otherwise
    pub fn wedge_product(&self, rhs: &Tensor) -> Result<Tensor> {
        if self.n != rhs.n {
            return Err(self.mismatch(rhs));
        }
        let product = self.tensor_product(rhs)?;
        let mut res = product.alternate()?;
        res.scale(binomial(self.arity + rhs.arity, self.arity) as f64);
        Ok(res)
    }

    /// Multiply every coordinate by `factor`, in place
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.coords.scale(factor);
        self
    }

    /// Elementwise coordinate sum, in place. Both tensors must have the same
    /// valence and space dimension
    pub fn add(&mut self, rhs: &Tensor) -> Result<&mut Self> {
        if self.n != rhs.n || self.p != rhs.p || self.q != rhs.q {
            return Err(self.mismatch(rhs));
        }
        for i in indices::generate_all(self.arity, self.n) {
            *self.coords.get_mut(&i)? += rhs.coords.get(&i)?;
        }
        Ok(self)
    }

    /// Pack the coordinates into a flat 2-D matrix, the inverse of
    /// [`Tensor::from_matrix`]. The index at recursion depth `d` varies along
    /// rows when `d == 0` or `d` is odd and not 1, along columns otherwise, with
    /// an offset stride of `n^(d/2)`, so row and column offsets double every
    /// two levels of depth
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        let (rows, cols) = matrix_shape(self.arity, self.n);
        let mut matrix = vec![vec![0.0; cols]; rows];
        pack(&self.coords, &mut matrix, 0, 0, 0, self.n);
        matrix
    }

    fn mismatch(&self, rhs: &Tensor) -> Error {
        Error::OperandMismatch {
            p: self.p,
            q: self.q,
            n: self.n,
            rhs_p: rhs.p,
            rhs_q: rhs.q,
            rhs_n: rhs.n,
        }
    }
}

/// Whether the index at recursion depth `d` varies along matrix rows (true)
/// or columns (false)
fn iterate_rows(depth: usize) -> bool {
    depth == 0 || (depth != 1 && depth % 2 != 0)
}

/// The matrix shape the packing rule produces for a tensor of the given arity:
/// one factor of n per row-iterating depth, one per column-iterating depth
fn matrix_shape(arity: usize, n: usize) -> (usize, usize) {
    let row_levels = (0..arity).filter(|&d| iterate_rows(d)).count();
    (
        n.pow(row_levels as u32),
        n.pow((arity - row_levels) as u32),
    )
}

/// Recursive packing walk, mirroring the store's tree: leaves land at the
/// accumulated (row, column) offsets
fn pack(
    node: &Coords,
    matrix: &mut [Vec<f64>],
    i_shift: usize,
    j_shift: usize,
    depth: usize,
    n: usize,
) {
    match node {
        Coords::Scalar(x) => matrix[i_shift][j_shift] = *x,
        Coords::Vector { items, .. } => {
            let stride = n.pow((depth / 2) as u32);
            for (i, child) in items.iter().enumerate() {
                if iterate_rows(depth) {
                    pack(child, matrix, i_shift + i * stride, j_shift, depth + 1, n);
                } else {
                    pack(child, matrix, i_shift, j_shift + i * stride, depth + 1, n);
                }
            }
        }
    }
}

/// Recursive unpacking walk, the exact inverse of [`pack`]: constructs scalars
/// at depth `arity` and assembles them level by level through the store's
/// one-level attachment
fn unpack(
    matrix: &[Vec<f64>],
    i_shift: usize,
    j_shift: usize,
    depth: usize,
    arity: usize,
    n: usize,
) -> Result<Coords> {
    if depth == arity {
        return Ok(Coords::Scalar(matrix[i_shift][j_shift]));
    }
    let mut v = Coords::zeros(arity - depth, n);
    let stride = n.pow((depth / 2) as u32);
    for i in 0..n {
        let child = if iterate_rows(depth) {
            unpack(matrix, i_shift + i * stride, j_shift, depth + 1, arity, n)?
        } else {
            unpack(matrix, i_shift, j_shift + i * stride, depth + 1, arity, n)?
        };
        v.set_item(i, child)?;
    }
    Ok(v)
}

/// Iterative factorial; arities are small so this never overflows in practice
pub(crate) fn factorial(k: usize) -> usize {
    (1..=k).product()
}
