use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};

use super::util::{assert_avl_tree, balance_factor, height, rebalance, Rotation};
use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::loader::{self, LoaderOptions};
use crate::types::{is_valid_key, AvlNode, Key, NodeId};
use crate::util;

/// Result of a successful [`AvlTree::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inserted {
    /// Slot of the new node. Valid until the next removal.
    pub node: NodeId,
    /// Rotation that rebalanced the tree, if one was needed.
    pub rotation: Option<Rotation>,
}

/// Outcome of a bulk load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    /// Records rejected with [`Error::KeyExists`] or [`Error::InvalidKey`].
    pub skipped: usize,
}

/// One node of a breadth-first listing, see [`AvlTree::levels`].
#[derive(Clone, Copy, Debug)]
pub struct LevelEntry<'a> {
    pub id: NodeId,
    pub node: &'a AvlNode,
    /// Distance from the root.
    pub depth: usize,
    pub parent: Option<&'a AvlNode>,
    pub left: Option<&'a AvlNode>,
    pub right: Option<&'a AvlNode>,
}

/// AVL tree mapping ids in `[MIN_KEY, MAX_KEY]` to names.
///
/// Nodes are stored in an [`Arena`]; node handles returned by
/// [`search`](Self::search), [`min_node`](Self::min_node) and friends are
/// slot indices, valid until the next [`delete`](Self::delete) or
/// [`destroy`](Self::destroy).
#[derive(Clone, Debug, Default)]
pub struct AvlTree {
    arena: Arena<AvlNode>,
    root: Option<NodeId>,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Node stored in slot `id`, if that slot is live.
    pub fn node(&self, id: NodeId) -> Option<&AvlNode> {
        self.arena.get(id)
    }

    /// Descends from the root looking for `key`.
    ///
    /// Returns the matching node and `true`, or the last node visited (the
    /// parent a new `key` would hang from) and `false`.
    pub fn search(&self, key: Key) -> Result<(NodeId, bool)> {
        let mut curr = self.root.ok_or(Error::InvalidTree)?;
        loop {
            let n = &self.arena[curr];
            if key == n.k {
                return Ok((curr, true));
            }
            let next = if key > n.k { n.r } else { n.l };
            match next {
                Some(next) => curr = next,
                None => return Ok((curr, false)),
            }
        }
    }

    pub fn get(&self, key: Key) -> Option<&str> {
        match self.search(key) {
            Ok((i, true)) => Some(self.arena[i].payload()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` with `payload` and rebalances.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] when `key` is out of range and
    /// [`Error::KeyExists`] when it is already present. The tree is left
    /// untouched in both cases.
    pub fn insert(&mut self, key: Key, payload: impl Into<String>) -> Result<Inserted> {
        let (node, rotations) = self.insert_node(key, payload.into())?;
        Ok(Inserted {
            node,
            rotation: rotations.first().copied(),
        })
    }

    /// Links a new node and returns it with every rotation the walk applied.
    pub(crate) fn insert_node(
        &mut self,
        key: Key,
        payload: String,
    ) -> Result<(NodeId, Vec<Rotation>)> {
        if !is_valid_key(key) {
            return Err(Error::InvalidKey(key.to_string()));
        }

        let parent = match self.root {
            None => None,
            Some(_) => match self.search(key)? {
                (_, true) => return Err(Error::KeyExists(key)),
                (p, false) => Some(p),
            },
        };

        let node = self.arena.alloc(AvlNode::new(key, payload));
        let Some(p) = parent else {
            debug!("insert {key}: new root at slot {node}");
            self.root = Some(node);
            return Ok((node, Vec::new()));
        };

        self.arena[node].p = Some(p);
        if key > self.arena[p].k {
            self.arena[p].r = Some(node);
        } else {
            self.arena[p].l = Some(node);
        }

        let root = self.root.expect("non-empty tree has a root");
        let balanced = rebalance(&mut self.arena, root, node);
        self.root = Some(balanced.root);
        debug!("insert {key}: slot {node}, rotations {:?}", balanced.rotations);
        Ok((node, balanced.rotations))
    }

    /// Removes `key` and rebalances, returning its payload.
    ///
    /// A node with two children takes over its in-order successor's key and
    /// payload; the successor's slot is the one released.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTree`] on an empty tree, [`Error::KeyNotFound`] when
    /// `key` is absent.
    pub fn delete(&mut self, key: Key) -> Result<String> {
        let (current, found) = self.search(key)?;
        if !found {
            return Err(Error::KeyNotFound(key));
        }

        let (payload, from) = match (self.arena[current].l, self.arena[current].r) {
            (Some(_), Some(r)) => {
                let successor =
                    util::first(&self.arena, Some(r)).expect("right subtree is non-empty");
                let from = self.splice_out(successor);
                let successor = self
                    .arena
                    .release(successor)
                    .expect("successor slot is live");
                let n = &mut self.arena[current];
                n.k = successor.k;
                (std::mem::replace(&mut n.v, successor.v), from)
            }
            _ => {
                let from = self.splice_out(current);
                let removed = self.arena.release(current).expect("matched slot is live");
                (removed.v, from)
            }
        };

        if let (Some(from), Some(root)) = (from, self.root) {
            let balanced = rebalance(&mut self.arena, root, from);
            self.root = Some(balanced.root);
            debug!("delete {key}: rotations {:?}", balanced.rotations);
        } else {
            debug!("delete {key}");
        }
        Ok(payload)
    }

    /// Unlinks node `n`, which has at most one child, moving that child into
    /// its place. Returns `n`'s former parent.
    fn splice_out(&mut self, n: NodeId) -> Option<NodeId> {
        let node = &self.arena[n];
        let p = node.p;
        let (child, child_h) = match node.l {
            Some(l) => (Some(l), node.lh),
            None => (node.r, node.rh),
        };

        if let Some(c) = child {
            self.arena[c].p = p;
        }
        match p {
            None => self.root = child,
            Some(p) => {
                let parent = &mut self.arena[p];
                if parent.l == Some(n) {
                    parent.l = child;
                    parent.lh = child_h;
                } else {
                    parent.r = child;
                    parent.rh = child_h;
                }
            }
        }
        p
    }

    /// Number of nodes, counted by traversal.
    pub fn size(&self) -> Result<usize> {
        let root = self.root.ok_or(Error::InvalidTree)?;
        Ok(util::size(&self.arena, Some(root)))
    }

    /// Height of the whole tree (1 for a single node).
    pub fn max_height(&self) -> Result<i32> {
        let root = self.root.ok_or(Error::InvalidTree)?;
        height(&self.arena, Some(root))
    }

    /// Balance factor (`rh - lh`) of the root.
    pub fn balance_factor(&self) -> Result<i32> {
        let root = self.root.ok_or(Error::InvalidTree)?;
        balance_factor(&self.arena, Some(root))
    }

    /// Cached height of `node`'s subtree.
    pub fn node_height(&self, node: Option<NodeId>) -> Result<i32> {
        height(&self.arena, node)
    }

    pub fn node_balance_factor(&self, node: Option<NodeId>) -> Result<i32> {
        balance_factor(&self.arena, node)
    }

    pub fn min_node(&self) -> Result<NodeId> {
        util::first(&self.arena, self.root).ok_or(Error::InvalidTree)
    }

    pub fn max_node(&self) -> Result<NodeId> {
        util::last(&self.arena, self.root).ok_or(Error::InvalidTree)
    }

    /// Releases every node in post-order and empties the tree.
    ///
    /// Returns the number of released nodes. Fails with
    /// [`Error::InvalidTree`] when the tree is already empty, so a second
    /// call on the same tree is an error.
    pub fn destroy(&mut self) -> Result<usize> {
        let root = self.root.ok_or(Error::InvalidTree)?;
        let order = util::post_order(&self.arena, Some(root));
        for &i in &order {
            self.arena.release(i);
        }
        self.arena.clear();
        self.root = None;
        debug!("destroyed {} nodes", order.len());
        Ok(order.len())
    }

    /// Inserts `records` one by one into this empty tree.
    ///
    /// Records rejected with [`Error::KeyExists`] or [`Error::InvalidKey`]
    /// are logged and skipped; the load carries on with the next record.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTree`] if the tree already holds nodes.
    pub fn create<I, S>(&mut self, records: I) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = (Key, S)>,
        S: Into<String>,
    {
        if !self.is_empty() {
            return Err(Error::InvalidTree);
        }

        let mut summary = LoadSummary::default();
        for (key, payload) in records {
            match self.insert(key, payload) {
                Ok(_) => summary.inserted += 1,
                Err(e @ (Error::KeyExists(_) | Error::InvalidKey(_))) => {
                    warn!("skipping record {key}: {e}");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        debug!(
            "created tree: {} inserted, {} skipped",
            summary.inserted, summary.skipped
        );
        Ok(summary)
    }

    /// Parses `name,id` rows from `reader` and loads them with [`create`](Self::create).
    ///
    /// Loader errors abort before anything is inserted.
    pub fn create_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        options: &LoaderOptions,
    ) -> Result<LoadSummary> {
        if !self.is_empty() {
            return Err(Error::InvalidTree);
        }
        let records = loader::read_records(reader, options)?;
        self.create(records)
    }

    pub fn create_from_file(
        &mut self,
        path: impl AsRef<Path>,
        options: &LoaderOptions,
    ) -> Result<LoadSummary> {
        if !self.is_empty() {
            return Err(Error::InvalidTree);
        }
        let records = loader::read_records_from_path(path, options)?;
        self.create(records)
    }

    /// In-order `(key, payload)` pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arena: &self.arena,
            curr: util::first(&self.arena, self.root),
        }
    }

    /// Breadth-first listing of every node with its depth and neighbours.
    pub fn levels(&self) -> Result<Vec<LevelEntry<'_>>> {
        let root = self.root.ok_or(Error::InvalidTree)?;
        let mut out = Vec::new();
        let mut queue = VecDeque::from([(root, 0usize)]);
        while let Some((id, depth)) = queue.pop_front() {
            let node = &self.arena[id];
            let link = |i: Option<NodeId>| i.map(|i| &self.arena[i]);
            out.push(LevelEntry {
                id,
                node,
                depth,
                parent: link(node.p),
                left: link(node.l),
                right: link(node.r),
            });
            queue.extend(node.l.map(|l| (l, depth + 1)));
            queue.extend(node.r.map(|r| (r, depth + 1)));
        }
        Ok(out)
    }

    /// Renders [`levels`](Self::levels), one node per line.
    pub fn print(&self) -> Result<String> {
        fn describe(n: Option<&AvlNode>) -> String {
            match n {
                Some(n) => format!("{} {:?}", n.k, n.v),
                None => "-".to_string(),
            }
        }

        let mut out = String::new();
        for e in self.levels()? {
            let _ = writeln!(
                out,
                "[depth {}] {} parent={} left={} right={}",
                e.depth,
                describe(Some(e.node)),
                describe(e.parent),
                describe(e.left),
                describe(e.right),
            );
        }
        Ok(out)
    }

    /// Checks every structural invariant: links, cached heights, balance,
    /// key order and key range.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        assert_avl_tree(&self.arena, self.root, |n: &AvlNode| n.k)?;
        if let Some((k, _)) = self.iter().find(|&(k, _)| !is_valid_key(k)) {
            return Err(format!("Key {k} out of range"));
        }
        let live = self.arena.live();
        let reachable = util::size(&self.arena, self.root);
        if live != reachable {
            return Err(format!("{live} live slots but {reachable} reachable nodes"));
        }
        Ok(())
    }
}

/// In-order iterator returned by [`AvlTree::iter`].
pub struct Iter<'a> {
    arena: &'a Arena<AvlNode>,
    curr: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Key, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = util::next(self.arena, i);
        let n = &self.arena[i];
        Some((n.k, n.v.as_str()))
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = (Key, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
