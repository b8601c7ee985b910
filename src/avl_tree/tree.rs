use crate::arena::NodeId;
use crate::avl_tree::node::Node;
use crate::branch::Branch;
use crate::error::Result;
use crate::event::{Rotation, Topic};
use crate::tree::Tree;
use std::cmp;

type AvlTree<T> = Tree<Node<T>>;

/// Change in balance of a node whose subtree on `branch` grew by one level.
fn weight(branch: Branch) -> i8 {
    match branch {
        Branch::Left => -1,
        Branch::Right => 1,
    }
}

// single rotation: the pivot's prior balance is +-1 after an insertion, and may also be 0 after a
// deletion
fn rotate<T>(tree: &mut AvlTree<T>, root: NodeId, toward: Branch) -> NodeId
where
    T: Ord,
{
    let rotation = match toward {
        Branch::Left => Rotation::Left,
        Branch::Right => Rotation::Right,
    };
    let pivot = tree.child(root, toward.inverse());
    tree.publish(Topic::Rotate(rotation), &[Some(root), pivot]);

    let pivot = tree.rotate(root, toward);
    let pivot_balance = {
        let pivot_node = tree.node_mut(pivot);
        pivot_node.balance += weight(toward);
        pivot_node.balance
    };
    tree.node_mut(root).balance = -pivot_balance;
    debug_assert!(pivot_balance.abs() <= 1);
    pivot
}

fn rotate_double<T>(tree: &mut AvlTree<T>, root: NodeId, toward: Branch) -> NodeId
where
    T: Ord,
{
    let rotation = match toward {
        Branch::Left => Rotation::RightLeft,
        Branch::Right => Rotation::LeftRight,
    };
    let outer = tree.child(root, toward.inverse());
    let pivot = outer.and_then(|outer| tree.child(outer, toward));
    tree.publish(Topic::Rotate(rotation), &[Some(root), pivot, outer]);

    let pivot = tree.rotate_double(root, toward);
    let outer = tree
        .child(pivot, toward.inverse())
        .expect("Expected outer node to hang below the pivot.");
    let pivot_balance = tree.node(pivot).balance;
    let w = weight(toward);

    // The side of the pivot that was shorter ends up under the node it moved to.
    tree.node_mut(root).balance = if pivot_balance == -w { w } else { 0 };
    tree.node_mut(outer).balance = if pivot_balance == w { -w } else { 0 };
    tree.node_mut(pivot).balance = 0;
    pivot
}

// precondition: the balance of `root` is +-2
fn restore<T>(tree: &mut AvlTree<T>, root: NodeId) -> NodeId
where
    T: Ord,
{
    let heavy = if tree.node(root).balance > 0 {
        Branch::Right
    } else {
        Branch::Left
    };
    let child = tree
        .child(root, heavy)
        .expect("Expected heavy child of unbalanced node to be `Some`.");

    if tree.node(child).balance * weight(heavy) >= 0 {
        rotate(tree, root, heavy.inverse())
    } else {
        rotate_double(tree, root, heavy.inverse())
    }
}

fn rebalance_insertion<T>(tree: &mut AvlTree<T>, mut node: NodeId, mut lineage: Vec<NodeId>)
where
    T: Ord,
{
    while let Some(parent) = lineage.pop() {
        let branch = tree.branch_of(parent, node);
        let balance = {
            let parent_node = tree.node_mut(parent);
            parent_node.balance += weight(branch);
            parent_node.balance
        };

        match balance {
            0 => break,
            -1 | 1 => node = parent,
            _ => {
                let subtree = restore(tree, parent);
                tree.replace_child(lineage.last().cloned(), parent, Some(subtree));
                tree.publish_subtree(Topic::Balanced, subtree);
                break;
            }
        }
    }
}

// `lineage` ends at the parent of the removed node, which hung on `branch` and is replaced by
// `orphan`
fn rebalance_removal<T>(
    tree: &mut AvlTree<T>,
    mut lineage: Vec<NodeId>,
    branch: Branch,
    orphan: Option<NodeId>,
) where
    T: Ord,
{
    let mut node = lineage
        .pop()
        .expect("Expected removed node to have a parent.");
    tree.set_child(node, branch, orphan);
    tree.node_mut(node).balance -= weight(branch);

    loop {
        let parent = lineage.pop();
        let balance = tree.node(node).balance;

        if balance == 0 {
            // subtree at `node` lost a level
            match parent {
                Some(parent) => {
                    let branch = tree.branch_of(parent, node);
                    tree.node_mut(parent).balance -= weight(branch);
                    node = parent;
                    continue;
                },
                None => return,
            }
        }
        if balance.abs() == 1 {
            return;
        }

        let branch = parent.map(|parent| tree.branch_of(parent, node));
        let subtree = restore(tree, node);
        tree.replace_child(parent, node, Some(subtree));
        tree.publish_subtree(Topic::Balanced, subtree);

        // A rotated subtree left with a nonzero balance kept its height.
        match (parent, branch) {
            (Some(parent), Some(branch)) if tree.node(subtree).balance == 0 => {
                tree.node_mut(parent).balance -= weight(branch);
                node = parent;
            },
            _ => return,
        }
    }
}

pub fn insert<T>(tree: &mut AvlTree<T>, key: T) -> Result<NodeId>
where
    T: Ord,
{
    let lineage = tree.trace_vacancy(&key)?;
    let new = tree.attach(lineage.last().cloned(), Node::new(key));
    tree.publish(Topic::Insert, &[Some(new)]);
    rebalance_insertion(tree, new, lineage);
    Ok(new)
}

pub fn delete<T>(tree: &mut AvlTree<T>, key: &T) -> Result<()>
where
    T: Ord,
{
    let mut lineage = tree.trace(key)?;
    let target = *lineage
        .last()
        .expect("Expected lineage to end at the target.");
    tree.publish(Topic::Delete, &[Some(target)]);

    // Pull the closest key from the heavier side, which also covers a single child.
    let heavy = if tree.node(target).balance > 0 {
        Branch::Right
    } else {
        Branch::Left
    };
    match tree.child(target, heavy) {
        Some(start) => {
            let mut path = tree.edge_path(start, heavy.inverse());
            let tail = path.pop().expect("Expected a non-empty edge path.");
            lineage.extend(path);
            tree.swap_keys(target, tail);

            let branch = if tail == start { heavy } else { heavy.inverse() };
            let orphan = tree.child(tail, heavy);
            tree.free(tail);
            rebalance_removal(tree, lineage, branch, orphan);
        },
        None => {
            lineage.pop();
            match lineage.last().cloned() {
                Some(parent) => {
                    let branch = tree.branch_of(parent, target);
                    rebalance_removal(tree, lineage, branch, None);
                },
                None => tree.root = None,
            }
            tree.free(target);
        },
    }
    Ok(())
}

/// Panics if any balance factor in the subtree is out of range or disagrees with the subtree
/// heights. Returns the height of the subtree.
pub fn assert_balanced<T>(tree: &AvlTree<T>, id: Option<NodeId>) -> usize
where
    T: Ord,
{
    let id = match id {
        Some(id) => id,
        None => return 0,
    };
    let node = tree.node(id);
    let left_height = assert_balanced(tree, node.left);
    let right_height = assert_balanced(tree, node.right);
    let actual = right_height as i64 - left_height as i64;

    assert_eq!(
        i64::from(node.balance),
        actual,
        "Node {:?} records balance {} but its subtrees differ by {}.",
        id,
        node.balance,
        actual,
    );
    assert!(node.balance.abs() <= 1, "Node {:?} is unbalanced.", id);
    1 + cmp::max(left_height, right_height)
}
