//! The crate-wide error type. Every failure in this crate is some form of
//! invalid argument, reported before any mutation takes place

use thiserror::Error;

/// An invalid argument passed to one of the tensor-algebra operations. Each
/// variant carries the quantities that disagreed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index tuple whose length does not match the dimension (number of
    /// indices) of the collection it addresses
    #[error("index tuple has {got} components, the collection expects {expected}")]
    IndexLength { expected: usize, got: usize },

    /// An index component that falls outside the per-level range of the
    /// collection it addresses
    #[error("index component {index} is out of range (must be < {range})")]
    IndexOutOfRange { index: usize, range: usize },

    /// An attempt to attach a child whose dimension is not exactly one less
    /// than the dimension of its parent
    #[error("cannot attach a child of dimension {child} under a parent of dimension {parent}")]
    ChildDimension { parent: usize, child: usize },

    /// Monotonic index generation asked for more strictly increasing
    /// components than the range can provide
    #[error("range {range} cannot hold {required} strictly increasing components")]
    RangeExhausted { range: usize, required: usize },

    /// A permutable-position mask whose length does not match the arity of the
    /// tensor it applies to
    #[error("mask has {got} positions, the tensor has arity {expected}")]
    MaskLength { expected: usize, got: usize },

    /// A multilinear-form evaluation given the wrong number of vectors, or a
    /// vector of the wrong length
    #[error("expected {expected} vectors of length {dim}")]
    VectorArguments { expected: usize, dim: usize },

    /// A binary tensor operation whose operands live over spaces of different
    /// dimensions or have incompatible valences
    #[error("operand mismatch: (p, q, n) = ({p}, {q}, {n}) vs ({rhs_p}, {rhs_q}, {rhs_n})")]
    OperandMismatch {
        p: usize,
        q: usize,
        n: usize,
        rhs_p: usize,
        rhs_q: usize,
        rhs_n: usize,
    },

    /// A coordinate matrix whose shape does not match what the packing rule
    /// requires for the given valence and space dimension
    #[error("matrix is {rows}x{cols}, packing a (p, q) tensor over dimension n requires {expected_rows}x{expected_cols}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
