//! Node trait definitions and the concrete AVL node.
//!
//! Every "pointer" is an `Option<u32>` index into an [`Arena`](crate::Arena).
//! Tree-manipulation functions take the arena and work with indices.

/// Numeric id used as the tree key.
pub type Key = u32;

/// Arena slot index of a node.
pub type NodeId = u32;

/// Smallest accepted key.
pub const MIN_KEY: Key = 100_000_000;

/// Largest accepted key.
pub const MAX_KEY: Key = 999_999_999;

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Cached child-subtree heights.
///
/// `lh` / `rh` hold the height of the left / right child subtree as of the
/// last update, 0 when that child is absent.
pub trait AvlNodeLike: Node {
    fn lh(&self) -> i32;
    fn rh(&self) -> i32;
    fn set_lh(&mut self, h: i32);
    fn set_rh(&mut self, h: i32);
}

/// Tree storage unit: id, name, links and cached heights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlNode {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: Key,
    pub v: String,
    pub lh: i32,
    pub rh: i32,
}

impl AvlNode {
    pub fn new(k: Key, v: String) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            lh: 0,
            rh: 0,
        }
    }

    pub fn key(&self) -> Key {
        self.k
    }

    pub fn payload(&self) -> &str {
        &self.v
    }
}

impl Node for AvlNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl AvlNodeLike for AvlNode {
    fn lh(&self) -> i32 {
        self.lh
    }

    fn rh(&self) -> i32 {
        self.rh
    }

    fn set_lh(&mut self, h: i32) {
        self.lh = h;
    }

    fn set_rh(&mut self, h: i32) {
        self.rh = h;
    }
}

/// Whether `key` lies in `[MIN_KEY, MAX_KEY]`.
#[inline]
pub fn is_valid_key(key: Key) -> bool {
    (MIN_KEY..=MAX_KEY).contains(&key)
}
