//! Generate permutations of index positions, compute their parity, and apply
//! them to relabel index tuples
//!
//! A permutation over `size` positions is an array `perm` of length `size`
//! where `perm[i]` is the position whose name ends up at position `i`. A mask
//! splits positions into permutable ones (mask-true, which exchange their
//! names between themselves) and fixed ones (mask-false, which always keep
//! their own name).

use bitvec::prelude::*;

/// All `size!` permutations of positions `0..size`
pub fn generate_all(size: usize) -> Vec<Vec<usize>> {
    generate(&bitvec![1; size])
}

/// All permutations restricted by `mask`: each mask-true position receives,
/// without repetition, the name of some mask-true position, and every
/// mask-false position maps to itself. Yields `count(mask)!` permutations
pub fn generate(mask: &BitSlice) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    let mut usable: BitVec = mask.to_bitvec();
    backtrack(&mut all, &mut vec![0; mask.len()], 0, &mut usable, mask);
    all
}

/// The sign of a permutation: +1 when its inversion count is even, -1 when
/// odd. An inversion is a pair of positions `j < i` with `perm[j] > perm[i]`
pub fn parity(perm: &[usize]) -> i32 {
    parity_over(perm, &bitvec![1; perm.len()])
}

/// The sign of the restriction of a permutation to the mask-true positions:
/// only inversions whose two positions are both mask-true are counted
pub fn parity_over(perm: &[usize], mask: &BitSlice) -> i32 {
    let mut inversions = 0;
    for i in 0..perm.len() {
        if !mask[i] {
            continue;
        }
        for j in 0..i {
            if mask[j] && perm[j] > perm[i] {
                inversions += 1;
            }
        }
    }
    if inversions % 2 == 0 {
        1
    } else {
        -1
    }
}

/// Relabel an index tuple through a permutation: the result holds, at each
/// position `i`, the component of `names` found at position `perm[i]`
pub fn substitute(perm: &[usize], names: &[usize]) -> Vec<usize> {
    perm.iter().map(|&p| names[p]).collect()
}

/// Backtracking over the permutable name pool: `usable` marks the mask-true
/// names not yet assigned at the current depth
fn backtrack(
    all: &mut Vec<Vec<usize>>,
    cur: &mut Vec<usize>,
    pos: usize,
    usable: &mut BitVec,
    mask: &BitSlice,
) {
    if pos == cur.len() {
        all.push(cur.clone());
        return;
    }
    if !mask[pos] {
        cur[pos] = pos;
        backtrack(all, cur, pos + 1, usable, mask);
        return;
    }
    for i in 0..cur.len() {
        if !usable[i] {
            continue;
        }
        cur[pos] = i;
        usable.set(i, false);
        backtrack(all, cur, pos + 1, usable, mask);
        usable.set(i, true);
    }
}
