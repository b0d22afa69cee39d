//! AVL balancing engine and the [`AvlTree`] index built on it.

pub mod tree;
pub mod util;

pub use tree::{AvlTree, Inserted, Iter, LevelEntry, LoadSummary};
pub use util::{
    assert_avl_tree, balance_factor, height, ll_rotate, lr_rotate, rebalance, rl_rotate,
    rr_rotate, Rebalanced, Rotation,
};
