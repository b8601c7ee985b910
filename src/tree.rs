use crate::arena::{Arena, NodeId};
use crate::branch::Branch;
use crate::error::{Error, Result};
use crate::event::{Event, Sink, Topic};
use crate::node::{BinaryNode, NodeRef};
use crate::traversal::{BreadthFirst, InOrder, PostOrder, PreOrder};
use std::cmp::{self, Ordering};
use std::mem;

/// The balancing strategy of a tree, implemented by the engine's node type.
///
/// `insert` and `delete` either fail before touching the tree or leave it with every invariant
/// restored.
pub trait Rebalance: BinaryNode + Sized {
    /// Inserts a key and returns the handle of the new node.
    fn insert(tree: &mut Tree<Self>, key: Self::Key) -> Result<NodeId>;

    fn delete(tree: &mut Tree<Self>, key: &Self::Key) -> Result<()>;

    /// Panics if the engine-specific invariants do not hold for the whole tree.
    fn assert_invariants(tree: &Tree<Self>);
}

/// A binary search tree whose balancing strategy is selected by its node type.
///
/// See `AvlTree` and `RedBlackTree` for the two strategies.
///
/// # Examples
///
/// ```
/// use balanced_trees::{AvlTree, Error};
///
/// let mut tree = AvlTree::new();
/// tree.bulk_insert(vec![1, 2, 3]).unwrap();
///
/// assert_eq!(tree.root().map(|node| *node.key()), Some(2));
/// assert!(tree.contains(&3));
///
/// assert_eq!(tree.insert(3).err(), Some(Error::DuplicateKey));
/// assert_eq!(tree.delete(&4), Err(Error::KeyNotFound));
///
/// tree.delete(&2).unwrap();
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
/// ```
pub struct Tree<N> {
    pub(crate) arena: Arena<N>,
    pub(crate) root: Option<NodeId>,
    sink: Option<Box<dyn Sink<N>>>,
}

impl<N> Tree<N>
where
    N: BinaryNode,
{
    /// Constructs a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: None,
            sink: None,
        }
    }

    /// Installs a sink that receives every structural event of this tree.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: Sink<N> + 'static,
    {
        self.set_sink(sink);
        self
    }

    /// Installs a sink, replacing the current one.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: Sink<N> + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Removes the current sink and returns it.
    pub fn take_sink(&mut self) -> Option<Box<dyn Sink<N>>> {
        self.sink.take()
    }

    /// Returns a cursor at the root, or `None` if the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, N>> {
        self.root.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Returns a cursor at the node holding `key`.
    pub fn get(&self, key: &N::Key) -> Result<NodeRef<'_, N>> {
        let mut curr = self.root;
        while let Some(id) = curr {
            let node = &self.arena[id];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.child(Branch::Left),
                Ordering::Greater => node.child(Branch::Right),
                Ordering::Equal => return Ok(NodeRef::new(&self.arena, id)),
            };
        }
        Err(Error::KeyNotFound)
    }

    pub fn contains(&self, key: &N::Key) -> bool {
        self.get(key).is_ok()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn iter(&self) -> InOrder<'_, N> {
        InOrder::new(&self.arena, self.root)
    }

    /// Returns an iterator over the keys in pre-order: each node before its left and right
    /// subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, N> {
        PreOrder::new(&self.arena, self.root)
    }

    /// Returns an iterator over the keys in post-order: each node after its left and right
    /// subtrees.
    pub fn post_order(&self) -> PostOrder<'_, N> {
        PostOrder::new(&self.arena, self.root)
    }

    /// Returns an iterator over the keys level by level, left to right.
    pub fn breadth_first(&self) -> BreadthFirst<'_, N> {
        BreadthFirst::new(&self.arena, self.root)
    }

    pub(crate) fn subtree_height(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let node = &self.arena[id];
                1 + cmp::max(
                    self.subtree_height(node.child(Branch::Left)),
                    self.subtree_height(node.child(Branch::Right)),
                )
            }
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &N {
        &self.arena[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.arena[id]
    }

    pub(crate) fn child(&self, id: NodeId, branch: Branch) -> Option<NodeId> {
        self.arena[id].child(branch)
    }

    pub(crate) fn set_child(&mut self, id: NodeId, branch: Branch, child: Option<NodeId>) {
        *self.arena[id].child_mut(branch) = child;
    }

    /// Returns the side of `parent` on which `child` hangs.
    pub(crate) fn branch_of(&self, parent: NodeId, child: NodeId) -> Branch {
        if self.child(parent, Branch::Left) == Some(child) {
            Branch::Left
        } else {
            debug_assert_eq!(self.child(parent, Branch::Right), Some(child));
            Branch::Right
        }
    }

    /// Returns the lineage of `key`: every node from the root down to and including the node
    /// holding `key`.
    pub(crate) fn trace(&self, key: &N::Key) -> Result<Vec<NodeId>> {
        let mut lineage = Vec::new();
        let mut curr = self.root;
        while let Some(id) = curr {
            lineage.push(id);
            let node = &self.arena[id];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.child(Branch::Left),
                Ordering::Greater => node.child(Branch::Right),
                Ordering::Equal => return Ok(lineage),
            };
        }
        debug!("rejected lookup of a key absent from the tree");
        Err(Error::KeyNotFound)
    }

    /// Returns the lineage of the node a new `key` would be attached under, from the root down to
    /// the future parent.
    pub(crate) fn trace_vacancy(&self, key: &N::Key) -> Result<Vec<NodeId>> {
        let mut lineage = Vec::new();
        let mut curr = self.root;
        while let Some(id) = curr {
            lineage.push(id);
            let node = &self.arena[id];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.child(Branch::Left),
                Ordering::Greater => node.child(Branch::Right),
                Ordering::Equal => {
                    debug!("rejected insertion of a key already in the tree");
                    return Err(Error::DuplicateKey);
                }
            };
        }
        Ok(lineage)
    }

    /// Returns `start` followed by every node reachable from it by repeatedly following `branch`.
    pub(crate) fn edge_path(&self, start: NodeId, branch: Branch) -> Vec<NodeId> {
        let mut path = vec![start];
        let mut curr = self.child(start, branch);
        while let Some(id) = curr {
            path.push(id);
            curr = self.child(id, branch);
        }
        path
    }

    /// Stores `node` and links it below `parent` on the side its key orders it to, or as the
    /// root if there is no parent.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, node: N) -> NodeId {
        let branch = parent.map(|parent| match node.key().cmp(self.arena[parent].key()) {
            Ordering::Less => Branch::Left,
            _ => Branch::Right,
        });
        let id = self.arena.allocate(node);
        match (parent, branch) {
            (Some(parent), Some(branch)) => self.set_child(parent, branch, Some(id)),
            _ => self.root = Some(id),
        }
        id
    }

    /// Points whatever referenced `old` (a child slot of `parent`, or the root) at `new`.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let branch = self.branch_of(parent, old);
                self.set_child(parent, branch, new);
            }
        }
    }

    /// Exchanges the keys stored at two nodes.
    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        let (a, b) = self.arena.pair_mut(a, b);
        mem::swap(a.key_mut(), b.key_mut());
    }

    pub(crate) fn free(&mut self, id: NodeId) -> N {
        self.arena.free(id)
    }

    /// Moves `root` down towards `toward` and hoists its child on the other side in its place.
    /// Returns the hoisted pivot. The caller reattaches the pivot to the rest of the tree.
    pub(crate) fn rotate(&mut self, root: NodeId, toward: Branch) -> NodeId {
        let away = toward.inverse();
        let pivot = self
            .child(root, away)
            .expect("Expected pivot of single rotation to be `Some`.");
        let inner = self.child(pivot, toward);
        self.set_child(root, away, inner);
        self.set_child(pivot, toward, Some(root));
        pivot
    }

    /// Moves `root` down towards `toward` and hoists the inner grandchild on the other side in
    /// its place. Returns the hoisted pivot, whose children become `root` and the former outer
    /// child. The caller reattaches the pivot to the rest of the tree.
    pub(crate) fn rotate_double(&mut self, root: NodeId, toward: Branch) -> NodeId {
        let away = toward.inverse();
        let outer = self
            .child(root, away)
            .expect("Expected outer node of double rotation to be `Some`.");
        let pivot = self
            .child(outer, toward)
            .expect("Expected pivot of double rotation to be `Some`.");
        let near = self.child(pivot, toward);
        let far = self.child(pivot, away);
        self.set_child(root, away, near);
        self.set_child(outer, toward, far);
        self.set_child(pivot, toward, Some(root));
        self.set_child(pivot, away, Some(outer));
        pivot
    }

    /// Delivers an event to the sink, if one is installed and the tree is not empty.
    pub(crate) fn publish(&mut self, topic: Topic, nodes: &[Option<NodeId>]) {
        let mut touched: Vec<NodeId> = nodes.iter().filter_map(|&id| id).collect();
        touched.sort();
        touched.dedup();
        trace!("{} touching {} node(s)", topic, touched.len());

        let root = match self.root {
            Some(root) => root,
            None => return,
        };
        if let Some(ref mut sink) = self.sink {
            let arena = &self.arena;
            let event = Event {
                topic,
                root: NodeRef::new(arena, root),
                nodes: touched.into_iter().map(|id| NodeRef::new(arena, id)).collect(),
            };
            sink.publish(&event);
        }
    }

    /// Publishes an event touching `id` and its children.
    pub(crate) fn publish_subtree(&mut self, topic: Topic, id: NodeId) {
        let left = self.child(id, Branch::Left);
        let right = self.child(id, Branch::Right);
        self.publish(topic, &[Some(id), left, right]);
    }

    /// Asserts that every node's key lies strictly between the keys of its ancestors that bound
    /// it.
    fn assert_ordered(&self, id: Option<NodeId>, low: Option<&N::Key>, high: Option<&N::Key>) {
        if let Some(id) = id {
            let node = &self.arena[id];
            if let Some(low) = low {
                assert!(low < node.key(), "Node {:?} breaks search order.", id);
            }
            if let Some(high) = high {
                assert!(node.key() < high, "Node {:?} breaks search order.", id);
            }
            self.assert_ordered(node.child(Branch::Left), low, Some(node.key()));
            self.assert_ordered(node.child(Branch::Right), Some(node.key()), high);
        }
    }
}

impl<N> Tree<N>
where
    N: Rebalance,
{
    /// Inserts a key into the tree and returns a cursor at the new node. Returns
    /// `Error::DuplicateKey` and leaves the tree unchanged if the key is already present.
    pub fn insert(&mut self, key: N::Key) -> Result<NodeRef<'_, N>> {
        let id = N::insert(self, key)?;
        Ok(NodeRef::new(&self.arena, id))
    }

    /// Removes a key from the tree. Returns `Error::KeyNotFound` and leaves the tree unchanged if
    /// the key is absent.
    pub fn delete(&mut self, key: &N::Key) -> Result<()> {
        N::delete(self, key)
    }

    /// Inserts keys one at a time, stopping at the first failure. Keys inserted before the
    /// failure stay in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::{Error, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.bulk_insert(vec![1, 2, 1, 3]), Err(Error::DuplicateKey));
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn bulk_insert<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = N::Key>,
    {
        for key in keys {
            N::insert(self, key)?;
        }
        Ok(())
    }

    /// Panics with a description of the first broken invariant, if any: search order, and the
    /// balance or color rules of the engine.
    pub fn assert_invariants(&self) {
        self.assert_ordered(self.root, None, None);
        N::assert_invariants(self);
    }
}

impl<N> Default for Tree<N>
where
    N: BinaryNode,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, N> IntoIterator for &'a Tree<N>
where
    N: BinaryNode,
{
    type Item = &'a N::Key;
    type IntoIter = InOrder<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
