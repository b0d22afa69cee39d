//! Arena-backed AVL tree index.
//!
//! Maps a bounded numeric id ([`MIN_KEY`]..=[`MAX_KEY`]) to a name. Nodes
//! live in an [`Arena`] and all "pointers" are `Option<u32>` slot indices;
//! the parent link is a plain index used only to walk upwards.
//!
//! Each node caches the heights of its two child subtrees, so balance
//! factors are O(1) reads and the rebalance walk only touches the path from
//! the changed node to the first ancestor whose height did not change.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`AvlNodeLike`] traits, [`AvlNode`], key bounds |
//! [`arena`] | [`Arena`] slot storage with a free list |
//! [`util`] | `first`, `last`, `next`, `size`, `post_order` |
//! [`avl`] | rotations, rebalance walk, [`AvlTree`] |
//! [`loader`] | `name,id` record parsing |
//! [`fuzzer`] | seeded random records for stress tests |
//!
//! # Example
//!
//! ```
//! use avl_index::{AvlTree, Error};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(101010101, "Daft Punk").unwrap();
//! tree.insert(121212121, "Ash Ketchum").unwrap();
//! assert_eq!(tree.get(121212121), Some("Ash Ketchum"));
//! assert_eq!(tree.insert(500, "Babidi"), Err(Error::InvalidKey("500".to_string())));
//! ```

pub mod arena;
pub mod avl;
pub mod error;
pub mod fuzzer;
pub mod loader;
pub mod types;
pub mod util;

#[cfg(test)]
mod proptests;

pub use arena::Arena;
pub use avl::{AvlTree, Inserted, LevelEntry, LoadSummary, Rotation};
pub use error::{Error, Result};
pub use loader::{LoaderOptions, Record};
pub use types::{AvlNode, AvlNodeLike, Key, Node, NodeId, MAX_KEY, MIN_KEY};
