//! # COLMAT - Collision Matrix Toolkit
//!
//! Packed symmetric relation matrices and supporting collections for game
//! tooling.
//!
//! The centerpiece is [`CollisionMatrix`]: an N-by-N symmetric relation
//! ("does layer A collide with layer B") stored as a packed upper triangle,
//! so lookups are O(1) and storage is half of the square matrix. Resizing
//! migrates every surviving pair, which is what lets an inspector add a
//! layer without wiping the matrix the designer just configured.
//!
//! ## Quick Start
//!
//! ```
//! use colmat::CollisionMatrix;
//!
//! // Four layers; a layer never collides with itself.
//! let mut matrix = CollisionMatrix::<bool>::new(4, false);
//!
//! matrix.set(0, 1, true);
//! matrix.set(2, 3, true);
//!
//! assert!(matrix[(1, 0)]);      // symmetric access
//! assert!(!matrix[(0, 3)]);     // unset pairs default
//!
//! matrix.set_size(5);           // add a layer, keep the configuration
//! assert!(matrix[(2, 3)]);
//! ```
//!
//! ## Core Concepts
//!
//! ### Packed triangles
//!
//! A matrix over `key_count` keys indexes through its `effective_count`:
//! the key count itself when self-pairs are stored, one less when the
//! diagonal is excluded. [`triangulate`] gives the storage size,
//! [`key_index`] the slot of a pair, and [`untriangulate`] recovers the
//! count from a storage length. The free functions are public for hosts
//! that draw or serialize the packed layout directly.
//!
//! ### Key names
//!
//! Matrices know keys as integers; a [`NameRegistry`] maps a marker type to
//! the display names of its keys, either as an explicit object or through
//! the documented process-wide instance.
//!
//! ### Supporting collections
//!
//! - [`LockableSet`] / [`LockableMap`]: defer mutations made during
//!   iteration and replay them on unlock.
//! - [`HashList`]: insertion order plus O(1) membership, duplicates
//!   rejected.
//! - [`CrossMap`]: a bijective pairing resolvable from either side.
//! - [`MultiMap`]: any number of values per key.
//!
//! ## Feature Flags
//!
//! | Feature | Adds |
//! |---------|------|
//! | `serde` | `Serialize`/`Deserialize` for every collection, with layout validation on load |
//! | `egui`  | `MatrixGrid`, a checkbox-grid widget for `CollisionMatrix<bool>` |

mod cross_map;
#[cfg(feature = "egui")]
mod grid;
mod hash_list;
mod lockable;
pub mod matrix;
mod names;
#[cfg(feature = "serde")]
mod serde_impl;

pub use cross_map::{CrossMap, MultiMap};
#[cfg(feature = "egui")]
pub use grid::MatrixGrid;
pub use hash_list::HashList;
pub use lockable::{LockState, LockableMap, LockableSet};
pub use matrix::{
    key_index, reorder, row_length, triangulate, try_untriangulate, untriangulate,
    CollisionMatrix, MatrixError,
};
pub use names::NameRegistry;
