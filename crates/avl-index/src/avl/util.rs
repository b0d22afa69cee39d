use std::fmt;

use log::debug;

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::types::AvlNodeLike;
use crate::util::{first, next};

/// Rotation applied to restore balance at an ancestor `z`.
///
/// Named after the heavy path: `Rr` means `z` is right-heavy and so is its
/// right child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    Ll,
    Rr,
    Lr,
    Rl,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rotation::Ll => "LL",
            Rotation::Rr => "RR",
            Rotation::Lr => "LR",
            Rotation::Rl => "RL",
        };
        f.write_str(s)
    }
}

/// `1 + max(lh, rh)` of `node`.
pub fn height<N: AvlNodeLike>(arena: &Arena<N>, node: Option<u32>) -> Result<i32> {
    let n = node.and_then(|i| arena.get(i)).ok_or(Error::InvalidNode)?;
    Ok(1 + n.lh().max(n.rh()))
}

/// `rh - lh` of `node`.
pub fn balance_factor<N: AvlNodeLike>(arena: &Arena<N>, node: Option<u32>) -> Result<i32> {
    let n = node.and_then(|i| arena.get(i)).ok_or(Error::InvalidNode)?;
    Ok(n.rh() - n.lh())
}

#[inline]
fn h<N: AvlNodeLike>(arena: &Arena<N>, i: u32) -> i32 {
    1 + arena[i].lh().max(arena[i].rh())
}

#[inline]
fn bf<N: AvlNodeLike>(arena: &Arena<N>, i: u32) -> i32 {
    arena[i].rh() - arena[i].lh()
}

/// Points `p`'s link that currently holds `old` at `new`.
#[inline]
fn replace_child<N: AvlNodeLike>(arena: &mut Arena<N>, p: Option<u32>, old: u32, new: u32) {
    if let Some(p) = p {
        if arena[p].l() == Some(old) {
            arena[p].set_l(Some(new));
        } else {
            arena[p].set_r(Some(new));
        }
    }
}

/// Left rotation for a right-right heavy path; `y` is `z`'s right child.
///
/// Returns `y`, the new local root.
pub fn rr_rotate<N: AvlNodeLike>(arena: &mut Arena<N>, z: u32, y: u32) -> u32 {
    let p = arena[z].p();
    let yl = arena[y].l();

    replace_child(arena, p, z, y);
    arena[y].set_p(p);
    arena[y].set_l(Some(z));
    arena[z].set_p(Some(y));
    arena[z].set_r(yl);
    if let Some(yl) = yl {
        arena[yl].set_p(Some(z));
    }

    let ylh = arena[y].lh();
    arena[z].set_rh(ylh);
    let zh = h(arena, z);
    arena[y].set_lh(zh);
    y
}

/// Right rotation for a left-left heavy path; `y` is `z`'s left child.
///
/// Returns `y`, the new local root.
pub fn ll_rotate<N: AvlNodeLike>(arena: &mut Arena<N>, z: u32, y: u32) -> u32 {
    let p = arena[z].p();
    let yr = arena[y].r();

    replace_child(arena, p, z, y);
    arena[y].set_p(p);
    arena[y].set_r(Some(z));
    arena[z].set_p(Some(y));
    arena[z].set_l(yr);
    if let Some(yr) = yr {
        arena[yr].set_p(Some(z));
    }

    let yrh = arena[y].rh();
    arena[z].set_lh(yrh);
    let zh = h(arena, z);
    arena[y].set_rh(zh);
    y
}

/// `y` is `z`'s left child, `x` is `y`'s right child. Returns `x`.
pub fn lr_rotate<N: AvlNodeLike>(arena: &mut Arena<N>, z: u32, y: u32, x: u32) -> u32 {
    rr_rotate(arena, y, x);
    ll_rotate(arena, z, x)
}

/// `y` is `z`'s right child, `x` is `y`'s left child. Returns `x`.
pub fn rl_rotate<N: AvlNodeLike>(arena: &mut Arena<N>, z: u32, y: u32, x: u32) -> u32 {
    ll_rotate(arena, y, x);
    rr_rotate(arena, z, x)
}

/// Restores balance at `z`, whose balance factor is outside `-1..=1`.
///
/// `y` is `z`'s child on the heavier side. A balanced `y` (only possible
/// after a removal) takes the single rotation.
fn rotate_at<N: AvlNodeLike>(arena: &mut Arena<N>, z: u32) -> (u32, Rotation) {
    if bf(arena, z) > 0 {
        let y = arena[z].r().expect("right-heavy node has a right child");
        if bf(arena, y) < 0 {
            let x = arena[y].l().expect("left-leaning node has a left child");
            (rl_rotate(arena, z, y, x), Rotation::Rl)
        } else {
            (rr_rotate(arena, z, y), Rotation::Rr)
        }
    } else {
        let y = arena[z].l().expect("left-heavy node has a left child");
        if bf(arena, y) > 0 {
            let x = arena[y].r().expect("right-leaning node has a right child");
            (lr_rotate(arena, z, y, x), Rotation::Lr)
        } else {
            (ll_rotate(arena, z, y), Rotation::Ll)
        }
    }
}

/// Outcome of a [`rebalance`] walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rebalanced {
    /// Tree root after the walk.
    pub root: u32,
    /// Rotations in the order they were applied.
    pub rotations: Vec<Rotation>,
}

/// Walks from `node` towards the root after a structural change at `node`.
///
/// `node`'s own cached heights must already describe its children. At each
/// step an unbalanced node is rotated, then the parent's cached height for
/// that side is refreshed. The walk stops at the root or at the first parent
/// whose cached height is already current.
pub fn rebalance<N: AvlNodeLike>(arena: &mut Arena<N>, root: u32, node: u32) -> Rebalanced {
    let mut root = root;
    let mut rotations = Vec::new();
    let mut curr = node;

    loop {
        if bf(arena, curr).abs() >= 2 {
            let was_root = curr == root;
            let (sub, rotation) = rotate_at(arena, curr);
            debug!("{rotation} rotation at slot {curr}, new local root {sub}");
            rotations.push(rotation);
            if was_root {
                root = sub;
            }
            curr = sub;
        }

        let Some(p) = arena[curr].p() else {
            break;
        };
        let ch = h(arena, curr);
        if arena[p].l() == Some(curr) {
            if arena[p].lh() == ch {
                break;
            }
            arena[p].set_lh(ch);
        } else {
            if arena[p].rh() == ch {
                break;
            }
            arena[p].set_rh(ch);
        }
        curr = p;
    }

    Rebalanced { root, rotations }
}

fn tree_height<N: AvlNodeLike>(arena: &Arena<N>, node: Option<u32>) -> i32 {
    let Some(node) = node else {
        return 0;
    };
    1 + tree_height(arena, arena[node].l()).max(tree_height(arena, arena[node].r()))
}

/// Checks links, cached heights, balance and key order of the tree under `root`.
pub fn assert_avl_tree<N, K, F>(
    arena: &Arena<N>,
    root: Option<u32>,
    key_of: F,
) -> std::result::Result<(), String>
where
    N: AvlNodeLike,
    K: PartialOrd + fmt::Debug,
    F: Fn(&N) -> K,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena.get(root).is_none() {
        return Err(format!("Root slot {root} is not live"));
    }
    if arena[root].p().is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_heights<N: AvlNodeLike>(
        arena: &Arena<N>,
        node: u32,
    ) -> std::result::Result<(), String> {
        let n = &arena[node];
        for (child, side) in [(n.l(), "left"), (n.r(), "right")] {
            if let Some(c) = child {
                if arena.get(c).is_none() {
                    return Err(format!("Node {node} links released slot {c}"));
                }
                if arena[c].p() != Some(node) {
                    return Err(format!("Broken parent link on {side} child of {node}"));
                }
                validate_links_and_heights(arena, c)?;
            }
        }

        let lh = tree_height(arena, n.l());
        let rh = tree_height(arena, n.r());
        if n.lh() != lh || n.rh() != rh {
            return Err(format!(
                "Cached height mismatch at {node}: expected ({lh}, {rh}), got ({}, {})",
                n.lh(),
                n.rh()
            ));
        }
        if (rh - lh).abs() > 1 {
            return Err(format!("AVL balance violated at {node}: {}", rh - lh));
        }
        Ok(())
    }

    validate_links_and_heights(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<K> = None;
    while let Some(i) = curr {
        let key = key_of(&arena[i]);
        if let Some(prev) = prev {
            if prev >= key {
                return Err(format!("Node order violated: {prev:?} before {key:?}"));
            }
        }
        prev = Some(key);
        curr = next(arena, i);
    }

    Ok(())
}
