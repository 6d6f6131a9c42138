//! Integration tests for the triangulated matrix store.
//!
//! These exercise the indexing math and the resize migration through the
//! public API, including randomized sweeps over matrix dimensions.

use colmat::{key_index, row_length, triangulate, untriangulate, CollisionMatrix};
use rand::prelude::*;
use std::collections::HashSet;

/// Every valid pair for a given effective count, honoring the diagonal
/// rule. Without self-pairs the key space is one larger than the indexing
/// dimension.
fn valid_pairs(effective_count: usize, self_intersect: bool) -> Vec<(usize, usize)> {
    let key_count = effective_count + usize::from(!self_intersect);
    let mut pairs = Vec::new();
    for a in 0..key_count {
        let start = if self_intersect { a } else { a + 1 };
        for b in start..key_count {
            pairs.push((a, b));
        }
    }
    pairs
}

#[test]
fn test_bijection_covers_packed_range() {
    for self_intersect in [false, true] {
        for n in 1..=24 {
            let indices: HashSet<usize> = valid_pairs(n, self_intersect)
                .into_iter()
                .map(|(a, b)| key_index(a, b, n, self_intersect))
                .collect();

            // No collisions, and exactly the packed range.
            assert_eq!(indices.len(), triangulate(n));
            assert!(indices.iter().all(|&i| i < triangulate(n)));
        }
    }
}

#[test]
fn test_symmetry() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let n = rng.gen_range(1..64);
        let self_intersect = rng.gen_bool(0.5);
        let key_count = n + usize::from(!self_intersect);

        let a = rng.gen_range(0..key_count);
        let b = rng.gen_range(0..key_count);
        if a == b && !self_intersect {
            continue;
        }

        assert_eq!(
            key_index(a, b, n, self_intersect),
            key_index(b, a, n, self_intersect)
        );
    }
}

#[test]
fn test_triangulate_untriangulate_round_trip() {
    for n in 0..=1000 {
        assert_eq!(untriangulate(triangulate(n)), n);
    }
}

#[test]
#[should_panic(expected = "requires self_intersect")]
fn test_self_pair_rejected_without_self_intersect() {
    let matrix = CollisionMatrix::<bool>::new(4, false);
    matrix.key_index(1, 1);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_out_of_range_key_rejected() {
    let matrix = CollisionMatrix::<bool>::new(4, false);
    matrix.key_index(0, 4);
}

#[test]
fn test_grow_preserves_all_pairs() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..50 {
        let self_intersect = rng.gen_bool(0.5);
        let min = if self_intersect { 1 } else { 2 };
        let key_count = rng.gen_range(min..12);
        let grown = rng.gen_range(key_count..key_count + 10);

        let mut matrix = CollisionMatrix::<u32>::new(key_count, self_intersect);
        let original: Vec<((usize, usize), u32)> = matrix
            .pairs()
            .map(|(pair, _)| (pair, rng.gen_range(0..1000)))
            .collect();
        for &((a, b), value) in &original {
            matrix.set(a, b, value);
        }

        matrix.set_size(grown);

        for ((a, b), value) in original {
            assert_eq!(*matrix.get(a, b), value, "pair ({a}, {b}) lost in grow");
        }
        // Pairs introduced by the growth default to zero.
        let introduced = matrix
            .pairs()
            .filter(|&((a, b), _)| a >= key_count || b >= key_count);
        for ((_, _), value) in introduced {
            assert_eq!(*value, 0);
        }
    }
}

#[test]
fn test_shrink_keeps_surviving_pairs() {
    let mut matrix = CollisionMatrix::<u32>::new(8, false);
    let mut expected = Vec::new();
    for (slot, ((a, b), _)) in matrix.clone().pairs().enumerate() {
        matrix.set(a, b, slot as u32 + 1);
        expected.push(((a, b), slot as u32 + 1));
    }

    matrix.set_size(5);

    assert_eq!(matrix.key_count(), 5);
    assert_eq!(matrix.len(), triangulate(4));
    for ((a, b), value) in expected {
        if a < 5 && b < 5 {
            assert_eq!(*matrix.get(a, b), value, "pair ({a}, {b}) lost in shrink");
        }
    }
}

#[test]
fn test_four_layers_without_self_pairs() {
    let mut matrix = CollisionMatrix::<bool>::new(4, false);

    assert_eq!(matrix.effective_count(), 3);
    assert_eq!(matrix.len(), triangulate(3));

    matrix.set(0, 1, true);
    matrix.set(2, 3, true);

    assert_eq!(matrix.key_index(0, 1), matrix.key_index(1, 0));
    assert!(matrix[(0, 1)]);
    assert!(!matrix[(1, 3)]);
}

#[test]
fn test_three_layers_with_self_pairs() {
    let matrix = CollisionMatrix::<bool>::new(3, true);

    assert_eq!(matrix.effective_count(), 3);
    assert_eq!(matrix.len(), triangulate(3));
    // The diagonal is addressable.
    assert!(matrix.key_index(1, 1) < matrix.len());
}

#[test]
fn test_enabling_self_pairs_keeps_off_diagonal_values() {
    let key_count = 6;
    let mut matrix = CollisionMatrix::<u32>::new(key_count, false);
    let original: Vec<((usize, usize), u32)> = matrix
        .pairs()
        .enumerate()
        .map(|(slot, (pair, _))| (pair, slot as u32 + 1))
        .collect();
    for &((a, b), value) in &original {
        matrix.set(a, b, value);
    }

    matrix.set_self_intersect(true);

    assert_eq!(matrix.key_count(), key_count);
    for ((a, b), value) in original {
        assert_eq!(*matrix.get(a, b), value, "pair ({a}, {b}) lost in toggle");
    }
    for a in 0..key_count {
        assert_eq!(*matrix.get(a, a), 0, "diagonal ({a}, {a}) not defaulted");
    }
}

#[test]
fn test_disabling_self_pairs_drops_only_diagonal() {
    let mut matrix = CollisionMatrix::<u32>::new(4, true);
    matrix.set(0, 0, 9);
    matrix.set(0, 1, 1);
    matrix.set(2, 3, 2);

    matrix.set_self_intersect(false);

    assert_eq!(*matrix.get(0, 1), 1);
    assert_eq!(*matrix.get(2, 3), 2);
    assert_eq!(matrix.len(), triangulate(3));
}

#[test]
fn test_copy_construction_matches_source() {
    let mut source = CollisionMatrix::<u32>::new(5, false);
    source.set(1, 4, 7);
    source.set(0, 2, 3);

    let copy = CollisionMatrix::from_matrix(&source);
    assert_eq!(copy, source);
}

#[test]
fn test_seeding_a_larger_matrix_from_a_smaller_one() {
    let mut source = CollisionMatrix::<u32>::new(3, false);
    source.set(0, 1, 5);
    source.set(1, 2, 6);

    let mut matrix = CollisionMatrix::<u32>::new(7, false);
    matrix.copy_from(source.storage(), source.key_count(), source.self_intersect());

    assert_eq!(*matrix.get(0, 1), 5);
    assert_eq!(*matrix.get(1, 2), 6);
    assert_eq!(*matrix.get(0, 6), 0);
}

#[test]
fn test_row_lengths_sum_to_storage_size() {
    for n in 1..=32 {
        let total: usize = (0..n).map(|a| row_length(n, a)).sum();
        assert_eq!(total, triangulate(n));
    }
}

#[test]
fn test_randomized_resize_chain_preserves_prefix() {
    // Walk a matrix through a chain of grows, shrinks and toggles; after
    // each step the pairs legal in both the step's start and end states
    // must carry over.
    let mut rng = StdRng::seed_from_u64(47);
    let mut matrix = CollisionMatrix::<u32>::new(6, false);

    for _ in 0..40 {
        let before: Vec<((usize, usize), u32)> = matrix
            .pairs()
            .map(|(pair, &value)| (pair, value))
            .collect();
        let was_self_intersect = matrix.self_intersect();

        let self_intersect = rng.gen_bool(0.3);
        let min = if self_intersect { 1 } else { 2 };
        let key_count = rng.gen_range(min..14);
        matrix.resize(key_count, self_intersect);

        for ((a, b), value) in before {
            let survives =
                a < key_count && b < key_count && (a != b || (self_intersect && was_self_intersect));
            if survives {
                assert_eq!(*matrix.get(a, b), value, "pair ({a}, {b}) lost in chain");
            }
        }

        // Fill with fresh values so the next step has data to carry.
        let pairs: Vec<(usize, usize)> = matrix.pairs().map(|(pair, _)| pair).collect();
        for (a, b) in pairs {
            matrix.set(a, b, rng.gen_range(1..1000));
        }
    }
}
