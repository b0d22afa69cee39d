//! Link-only traversal helpers (`p` / `l` / `r`).
//!
//! None of these read keys or heights, so they work for any [`Node`] layout.
//! Deep trees are walked with explicit stacks.

use crate::arena::Arena;
use crate::types::Node;

/// Leftmost node under `root` (minimum key).
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena[curr].l() {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root` (maximum key).
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena[curr].r() {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(r) = arena[curr].r() {
        return first(arena, Some(r));
    }
    let mut p = arena[curr].p();
    while let Some(pi) = p {
        if arena[pi].r() == Some(curr) {
            curr = pi;
            p = arena[pi].p();
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(l) = arena[curr].l() {
        return last(arena, Some(l));
    }
    let mut p = arena[curr].p();
    while let Some(pi) = p {
        if arena[pi].l() == Some(curr) {
            curr = pi;
            p = arena[pi].p();
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &Arena<N>, root: Option<u32>) -> usize {
    let mut count = 0;
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        count += 1;
        stack.extend(arena[i].l());
        stack.extend(arena[i].r());
    }
    count
}

/// Nodes under `root` in post-order: both children before their parent.
pub fn post_order<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut stack: Vec<u32> = root.into_iter().collect();
    // Reverse of (node, right, left) pre-order.
    while let Some(i) = stack.pop() {
        out.push(i);
        stack.extend(arena[i].l());
        stack.extend(arena[i].r());
    }
    out.reverse();
    out
}
