/*!
# Tensor algebra over finite-dimensional real vector spaces

Represent a tensor of valence (p,q) over an n-dimensional vector space as a
multi-indexed collection of [`f64`] coordinates, and perform the operations of
tensor algebra on those coordinates: evaluation as a multilinear form,
symmetrization, alternation, tensor product, wedge product, scaling, addition,
and a bijective packing of the coordinate set into (and out of) a flat 2-D
matrix. The main type is [`Tensor`].

The crate is split into four layers, strictly bottom-up:

- [`coords`] stores the coordinates themselves, as a recursive multi-indexed
  tree ([`Coords`]) of depth `p + q` whose leaves are scalars. Higher layers
  only ever touch coordinates through deep addressing by index tuple.
- [`indices`] generates the index tuples the algebra iterates over:
  every tuple, strictly increasing (_monotonic_) tuples, and tuples monotonic
  only on a masked subset of positions.
- [`perms`] generates permutations of index positions, possibly restricted by
  a mask to a subset of permutable positions, computes their parity (sign),
  and applies them to relabel index tuples.
- [`tensor`] combines the three: each algebraic operation is a loop over
  generated index tuples (and, for the symmetry operations, over generated
  permutations of those tuples), reading and writing coordinates through the
  store.

Masks are [`bitvec`] bit-slices: a `true` bit marks a position that
participates in the operation (is permuted, or must grow monotonically), a
`false` bit marks a fixed position. Everything is computed eagerly and
synchronously; no operation aliases storage between two distinct tensors.

All fallible operations return [`Result`]. The single failure mode is an
invalid argument (wrong tuple length, wrong mask length, mismatched valence or
space dimension, insufficient range for a monotonic generation); validation
always happens before any mutation, so a failed call leaves its receiver
untouched.
*/

pub mod coords;
pub mod error;
pub mod indices;
pub mod perms;
pub mod tensor;

pub use coords::Coords;
pub use error::{Error, Result};
pub use tensor::Tensor;
