//! Packed triangular storage for symmetric pairwise relations.
//!
//! A [`CollisionMatrix`] stores one value per unordered pair of keys drawn
//! from a dense integer key space. Because the relation is symmetric, only
//! the upper triangle is kept, so `n` keys need `n * (n + 1) / 2` slots
//! instead of `n * n`. Whether the diagonal (a key paired with itself) is
//! representable is controlled per matrix with the `self_intersect` flag.
//!
//! # Example
//!
//! ```
//! use colmat::CollisionMatrix;
//!
//! // Four physics layers, self-collision excluded.
//! let mut matrix = CollisionMatrix::<bool>::new(4, false);
//!
//! matrix.set(0, 1, true);
//! matrix.set(2, 3, true);
//!
//! // The relation is symmetric: (1, 0) is the same cell as (0, 1).
//! assert!(matrix[(1, 0)]);
//! assert!(!matrix[(1, 3)]);
//!
//! // Growing keeps every pair that still exists.
//! matrix.set_size(6);
//! assert!(matrix[(0, 1)]);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of unordered pairs (self-pairs included) over `n` keys.
///
/// This is also the packed storage size for an effective key count of `n`.
#[inline]
pub fn triangulate(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Inverse of [`triangulate`], or `None` when `size` is not a triangular
/// number.
pub fn try_untriangulate(size: usize) -> Option<usize> {
    let mut n = (((8 * size + 1) as f64).sqrt() as usize).saturating_sub(1) / 2;
    // Float sqrt can land a row off in either direction near perfect squares.
    while triangulate(n + 1) <= size {
        n += 1;
    }
    while n > 0 && triangulate(n) > size {
        n -= 1;
    }
    if triangulate(n) == size {
        Some(n)
    } else {
        None
    }
}

/// Inverse of [`triangulate`].
///
/// # Panics
///
/// Panics when `size` is not a triangular number. Callers are expected to
/// only pass lengths produced by [`triangulate`]; untrusted input should go
/// through [`try_untriangulate`] or [`CollisionMatrix::from_parts`].
pub fn untriangulate(size: usize) -> usize {
    match try_untriangulate(size) {
        Some(n) => n,
        None => panic!("{size} is not a triangular number"),
    }
}

/// Normalize an unordered pair into `a <= b` order.
///
/// # Panics
///
/// Panics unless, after normalization, `a < length` and `b <= length`.
/// The upper bound is inclusive because row indices above the diagonal get
/// compacted by one when self-pairs are excluded.
#[inline]
pub fn reorder(a: usize, b: usize, length: usize) -> (usize, usize) {
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    assert!(a < length, "key {a} out of range for {length} effective keys");
    assert!(b <= length, "key {b} out of range for {length} effective keys");
    (a, b)
}

/// Packed storage index of the unordered pair `{a, b}`.
///
/// `effective_count` is the indexing dimension of the matrix: the key count
/// itself when self-pairs are stored, one less otherwise. The produced
/// indices for all valid pairs form a permutation of
/// `0..triangulate(effective_count)`.
///
/// # Panics
///
/// Panics on an out-of-range key, and on `a == b` when `self_intersect` is
/// false (the diagonal is not representable then).
pub fn key_index(a: usize, b: usize, effective_count: usize, self_intersect: bool) -> usize {
    let (a, mut b) = reorder(a, b, effective_count);
    if !self_intersect {
        assert!(a != b, "self pair ({a}, {a}) requires self_intersect");
        // The diagonal is skipped, so columns past it shift down by one.
        b -= 1;
    }

    b + effective_count * a - triangulate(a)
}

/// Number of packed slots in row `a` of a matrix with the given effective
/// key count.
#[inline]
pub fn row_length(effective_count: usize, a: usize) -> usize {
    effective_count - a
}

#[inline]
fn effective_count_of(key_count: usize, self_intersect: bool) -> usize {
    if self_intersect {
        key_count
    } else {
        key_count.saturating_sub(1)
    }
}

/// Error building a matrix from raw packed parts.
#[derive(Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// The packed storage is empty, so no pair is representable.
    Empty,
    /// The packed storage length is not a triangular number.
    NotTriangular(usize),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Empty => write!(f, "packed storage is empty"),
            MatrixError::NotTriangular(len) => {
                write!(f, "packed storage length {len} is not a triangular number")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Symmetric pairwise relation over keys `0..key_count`, stored as a packed
/// upper triangle.
///
/// Lookup and mutation are O(1); [`CollisionMatrix::set_size`] and
/// [`CollisionMatrix::resize`] reallocate and migrate every surviving pair.
/// The matrix is a plain value with no internal synchronization; sharing one
/// across threads is the owner's problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionMatrix<T> {
    /// Packed upper-triangular storage, `triangulate(effective_count)` long.
    storage: Vec<T>,
    /// Number of distinct keys.
    key_count: usize,
    /// Whether pairs of a key with itself are representable.
    self_intersect: bool,
}

impl<T: Clone + Default> CollisionMatrix<T> {
    /// Create a matrix over `key_count` keys with every pair at the default
    /// value.
    ///
    /// # Panics
    ///
    /// Panics when no pair would be representable: `key_count` must be at
    /// least 1 with self-pairs and at least 2 without.
    pub fn new(key_count: usize, self_intersect: bool) -> Self {
        let effective = effective_count_of(key_count, self_intersect);
        assert!(
            effective > 0,
            "key count {key_count} leaves no representable pairs"
        );

        Self {
            storage: vec![T::default(); triangulate(effective)],
            key_count,
            self_intersect,
        }
    }

    /// Create a matrix with the source's dimensions and values.
    ///
    /// Combined with [`CollisionMatrix::copy_from`] this also seeds a matrix
    /// of a different size: allocate with [`CollisionMatrix::new`], then copy
    /// the source in.
    pub fn from_matrix(source: &CollisionMatrix<T>) -> Self {
        let mut matrix = Self::new(source.key_count, source.self_intersect);
        matrix.copy_from(source.storage(), source.key_count, source.self_intersect);
        matrix
    }

    /// Resize to `key_count` keys, keeping the current self-intersect mode.
    ///
    /// See [`CollisionMatrix::resize`].
    pub fn set_size(&mut self, key_count: usize) {
        self.resize(key_count, self.self_intersect);
    }

    /// Switch whether self-pairs are representable, migrating stored values.
    ///
    /// Enabling introduces diagonal cells at the default value; disabling
    /// discards them. Off-diagonal pairs survive either way.
    pub fn set_self_intersect(&mut self, self_intersect: bool) {
        self.resize(self.key_count, self_intersect);
    }

    /// Resize the key space and/or toggle self-pairs.
    ///
    /// Every unordered pair representable in both the old and the new
    /// configuration keeps its value; newly introduced pairs take the
    /// default. A no-op request returns immediately. Callers never observe a
    /// partially migrated matrix.
    ///
    /// # Panics
    ///
    /// Panics when the new configuration leaves no representable pairs.
    pub fn resize(&mut self, key_count: usize, self_intersect: bool) {
        if key_count == self.key_count && self_intersect == self.self_intersect {
            return;
        }

        let effective = effective_count_of(key_count, self_intersect);
        assert!(
            effective > 0,
            "key count {key_count} leaves no representable pairs"
        );

        let prev_storage = std::mem::take(&mut self.storage);
        let prev_key_count = self.key_count;
        let prev_self_intersect = self.self_intersect;

        self.key_count = key_count;
        self.self_intersect = self_intersect;
        self.storage = vec![T::default(); triangulate(effective)];

        self.copy_from(&prev_storage, prev_key_count, prev_self_intersect);
    }

    /// Copy every pair representable both here and in `source` from the
    /// source's packed storage, leaving other pairs untouched.
    ///
    /// # Panics
    ///
    /// Panics when `source` is not a packed triangle of the claimed
    /// dimensions.
    pub fn copy_from(&mut self, source: &[T], source_key_count: usize, source_self_intersect: bool) {
        let source_effective = effective_count_of(source_key_count, source_self_intersect);
        assert_eq!(
            source.len(),
            triangulate(source_effective),
            "source storage does not match {source_key_count} keys"
        );

        let max = self.key_count.min(source_key_count);
        let effective = self.effective_count();
        let diagonal = self.self_intersect && source_self_intersect;

        for a in 0..max {
            let start = if diagonal { a } else { a + 1 };
            for b in start..max {
                let slot = key_index(a, b, effective, self.self_intersect);
                let source_slot = key_index(a, b, source_effective, source_self_intersect);
                self.storage[slot] = source[source_slot].clone();
            }
        }
    }

    /// Reset every pair to the default value, keeping the dimensions.
    pub fn reset(&mut self) {
        self.storage.fill(T::default());
    }
}

impl<T> CollisionMatrix<T> {
    /// Number of distinct keys.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Indexing dimension of the packed triangle: the key count with
    /// self-pairs, one less without.
    #[inline]
    pub fn effective_count(&self) -> usize {
        effective_count_of(self.key_count, self.self_intersect)
    }

    /// Whether self-pairs are representable.
    #[inline]
    pub fn self_intersect(&self) -> bool {
        self.self_intersect
    }

    /// Number of packed storage slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Read-only view of the packed storage, for bulk copies and
    /// serialization.
    #[inline]
    pub fn storage(&self) -> &[T] {
        &self.storage
    }

    /// Number of packed slots in row `a`.
    #[inline]
    pub fn row_length(&self, a: usize) -> usize {
        row_length(self.effective_count(), a)
    }

    /// Packed storage index of the unordered pair `{a, b}`.
    ///
    /// # Panics
    ///
    /// Panics when either key is out of range, or on a self-pair while
    /// self-pairs are excluded.
    pub fn key_index(&self, a: usize, b: usize) -> usize {
        assert!(
            a < self.key_count && b < self.key_count,
            "pair ({a}, {b}) out of range for {} keys",
            self.key_count
        );
        key_index(a, b, self.effective_count(), self.self_intersect)
    }

    /// Value stored for the unordered pair `{a, b}`.
    pub fn get(&self, a: usize, b: usize) -> &T {
        &self.storage[self.key_index(a, b)]
    }

    /// Mutable access to the value stored for the unordered pair `{a, b}`.
    pub fn get_mut(&mut self, a: usize, b: usize) -> &mut T {
        let slot = self.key_index(a, b);
        &mut self.storage[slot]
    }

    /// Store `value` for the unordered pair `{a, b}`.
    pub fn set(&mut self, a: usize, b: usize, value: T) {
        let slot = self.key_index(a, b);
        self.storage[slot] = value;
    }

    /// Iterate every representable pair as `((a, b), &value)` with `a <= b`.
    pub fn pairs(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let key_count = self.key_count;
        let diagonal = self.self_intersect;
        (0..key_count).flat_map(move |a| {
            let start = if diagonal { a } else { a + 1 };
            (start..key_count).map(move |b| ((a, b), self.get(a, b)))
        })
    }

    /// Rebuild a matrix from its packed parts, recovering the key count from
    /// the storage length.
    ///
    /// This is the validating entry point for untrusted input such as
    /// deserialized data; in-memory callers normally go through
    /// [`CollisionMatrix::new`].
    pub fn from_parts(storage: Vec<T>, self_intersect: bool) -> Result<Self, MatrixError> {
        if storage.is_empty() {
            return Err(MatrixError::Empty);
        }

        let effective = match try_untriangulate(storage.len()) {
            Some(n) => n,
            None => return Err(MatrixError::NotTriangular(storage.len())),
        };
        let key_count = effective + usize::from(!self_intersect);

        Ok(Self {
            storage,
            key_count,
            self_intersect,
        })
    }
}

impl<T> Index<(usize, usize)> for CollisionMatrix<T> {
    type Output = T;

    fn index(&self, (a, b): (usize, usize)) -> &T {
        self.get(a, b)
    }
}

impl<T> IndexMut<(usize, usize)> for CollisionMatrix<T> {
    fn index_mut(&mut self, (a, b): (usize, usize)) -> &mut T {
        self.get_mut(a, b)
    }
}
