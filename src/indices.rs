//! Generate the index tuples the tensor operations iterate over:
//! unconstrained, strictly increasing (monotonic), and monotonic on a masked
//! subset of positions only

use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Every tuple of `size` components, each in `0..range`, in lexicographic
/// order (position 0 varies slowest). Yields `range^size` tuples
pub fn generate_all(size: usize, range: usize) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    backtrack_all(&mut all, &mut vec![0; size], 0, range, false);
    all
}

/// Every strictly increasing tuple of `size` components in `0..range`, in
/// lexicographic order. Yields `C(range, size)` tuples; fails when the range
/// cannot hold `size` distinct increasing components
pub fn generate_monotonic(size: usize, range: usize) -> Result<Vec<Vec<usize>>> {
    if range < size {
        return Err(Error::RangeExhausted { range, required: size });
    }
    let mut all = Vec::new();
    backtrack_all(&mut all, &mut vec![0; size], 0, range, true);
    Ok(all)
}

/// Every tuple of `mask.len()` components in `0..range` that is strictly
/// increasing across the mask-true positions; mask-false positions range
/// freely over `0..range`. Fails when the range cannot hold as many distinct
/// increasing components as the mask requires
pub fn generate_monotonic_over(mask: &BitSlice, range: usize) -> Result<Vec<Vec<usize>>> {
    let required = mask.count_ones();
    if range < required {
        return Err(Error::RangeExhausted { range, required });
    }
    let mut all = Vec::new();
    backtrack_masked(&mut all, &mut vec![0; mask.len()], 0, range, mask, None);
    Ok(all)
}

/// Shared backtracking for the unconstrained and fully monotonic generators:
/// when `monotonic`, each position starts one past the previous choice
fn backtrack_all(
    all: &mut Vec<Vec<usize>>,
    cur: &mut Vec<usize>,
    pos: usize,
    range: usize,
    monotonic: bool,
) {
    if pos == cur.len() {
        all.push(cur.clone());
        return;
    }
    let from = if monotonic && pos > 0 { cur[pos - 1] + 1 } else { 0 };
    for i in from..range {
        cur[pos] = i;
        backtrack_all(all, cur, pos + 1, range, monotonic);
    }
}

/// Backtracking for the masked generator. `prev` is the last value chosen at a
/// mask-true position; it only advances at mask-true positions, so mask-false
/// positions in between do not constrain the ordering
fn backtrack_masked(
    all: &mut Vec<Vec<usize>>,
    cur: &mut Vec<usize>,
    pos: usize,
    range: usize,
    mask: &BitSlice,
    prev: Option<usize>,
) {
    if pos == cur.len() {
        all.push(cur.clone());
        return;
    }
    let from = match prev {
        Some(p) if mask[pos] => p + 1,
        _ => 0,
    };
    for i in from..range {
        cur[pos] = i;
        let next_prev = if mask[pos] { Some(i) } else { prev };
        backtrack_masked(all, cur, pos + 1, range, mask, next_prev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;
    use num_integer::binomial;

    simple_eqs! {
        all_cardinality: generate_all(3, 4).len() => 4usize.pow(3),
        all_empty_tuple: generate_all(0, 3) => vec![Vec::<usize>::new()],
        all_first_is_zeros: generate_all(2, 3)[0] => vec![0, 0],
        all_last_is_maxed: generate_all(2, 3)[8] => vec![2, 2],
        monotonic_cardinality: generate_monotonic(2, 4).unwrap().len() => binomial(4, 2),
        monotonic_pairs: generate_monotonic(2, 3).unwrap() =>
            vec![vec![0, 1], vec![0, 2], vec![1, 2]],
        monotonic_full_range: generate_monotonic(3, 3).unwrap() => vec![vec![0, 1, 2]],
        monotonic_infeasible: generate_monotonic(3, 2) =>
            Err(Error::RangeExhausted { range: 2, required: 3 }),
        masked_infeasible: generate_monotonic_over(bits![1, 1, 1], 2) =>
            Err(Error::RangeExhausted { range: 2, required: 3 }),
        masked_no_constraint: generate_monotonic_over(bits![0, 0], 2).unwrap().len() => 4,
    }

    #[test]
    fn all_tuples_distinct_and_in_range() {
        let tuples = generate_all(3, 3);
        for t in &tuples {
            assert_eq!(t.len(), 3);
            assert!(t.iter().all(|&x| x < 3));
        }
        for (a, i) in tuples.iter().zip(0..) {
            for b in &tuples[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn masked_increases_only_where_masked() {
        // Positions 0 and 2 must increase relative to each other; position 1
        // is free
        let tuples = generate_monotonic_over(bits![1, 0, 1], 3).unwrap();
        assert_eq!(tuples.len(), binomial(3, 2) * 3);
        for t in &tuples {
            assert!(t[0] < t[2]);
        }
        assert!(tuples.contains(&vec![0, 2, 1]));
        assert!(!tuples.contains(&vec![1, 0, 0]));
    }
}
