use crate::arena::NodeId;
use crate::branch::Branch;
use crate::error::Result;
use crate::event::{Rotation, Topic};
use crate::red_black_tree::node::{Color, Node};
use crate::tree::Tree;

type RedBlackTree<T> = Tree<Node<T>>;

/// Returns `true` if the node exists and is red. Missing children count as black.
pub fn is_red<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> bool
where
    T: Ord,
{
    id.map_or(false, |id| tree.node(id).is_red())
}

fn set_color<T>(tree: &mut RedBlackTree<T>, id: NodeId, color: Color)
where
    T: Ord,
{
    tree.node_mut(id).color = color;
}

fn flip_colors<T>(tree: &mut RedBlackTree<T>, id: NodeId)
where
    T: Ord,
{
    let left = tree.child(id, Branch::Left);
    let right = tree.child(id, Branch::Right);
    for id in Some(id).into_iter().chain(left).chain(right) {
        let node = tree.node_mut(id);
        node.color = node.color.flip();
    }
}

fn rotate<T>(tree: &mut RedBlackTree<T>, root: NodeId, toward: Branch) -> NodeId
where
    T: Ord,
{
    let rotation = match toward {
        Branch::Left => Rotation::Left,
        Branch::Right => Rotation::Right,
    };
    let pivot = tree.child(root, toward.inverse());
    tree.publish(Topic::Rotate(rotation), &[Some(root), pivot]);
    tree.rotate(root, toward)
}

fn rotate_double<T>(tree: &mut RedBlackTree<T>, root: NodeId, toward: Branch) -> NodeId
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
    tree.rotate_double(root, toward)
}

fn force_black_root<T>(tree: &mut RedBlackTree<T>)
where
    T: Ord,
{
    if let Some(root) = tree.root {
        if tree.node(root).is_red() {
            set_color(tree, root, Color::Black);
            tree.publish(Topic::Recolor, &[Some(root)]);
        }
    }
}

// `lineage` ends at the parent of the red node `node`
fn rebalance_insertion<T>(tree: &mut RedBlackTree<T>, mut node: NodeId, mut lineage: Vec<NodeId>)
where
    T: Ord,
{
    while let Some(parent) = lineage.pop() {
        if !tree.node(parent).is_red() {
            break;
        }

        let grandparent = match lineage.last().cloned() {
            Some(grandparent) => grandparent,
            None => {
                set_color(tree, parent, Color::Black);
                tree.publish(Topic::Recolor, &[Some(parent)]);
                break;
            },
        };

        let left = tree.child(grandparent, Branch::Left);
        let right = tree.child(grandparent, Branch::Right);
        if is_red(tree, left) == is_red(tree, right) {
            // red uncle: push the red up to the grandparent
            flip_colors(tree, grandparent);
            tree.publish_subtree(Topic::Recolor, grandparent);
            lineage.pop();
            node = grandparent;
            continue;
        }

        let node_branch = tree.branch_of(parent, node);
        let parent_branch = tree.branch_of(grandparent, parent);
        lineage.pop();

        let subtree = if node_branch == parent_branch {
            rotate(tree, grandparent, parent_branch.inverse())
        } else {
            rotate_double(tree, grandparent, parent_branch.inverse())
        };
        set_color(tree, subtree, Color::Black);
        set_color(tree, grandparent, Color::Red);
        tree.replace_child(lineage.last().cloned(), grandparent, Some(subtree));
        tree.publish_subtree(Topic::Balanced, subtree);
        break;
    }
    force_black_root(tree);
}

// Restores the black depth after a black leaf hanging on `dir` of the last node of `lineage` was
// removed.
fn rebalance_removal<T>(tree: &mut RedBlackTree<T>, mut lineage: Vec<NodeId>, mut dir: Branch)
where
    T: Ord,
{
    while let Some(parent) = lineage.pop() {
        let mut anchor = lineage.last().cloned();
        let mut sibling = tree
            .child(parent, dir.inverse())
            .expect("Expected sibling of a short branch to be `Some`.");

        let close = tree.child(sibling, dir);
        let far = tree.child(sibling, dir.inverse());
        if !tree.node(parent).is_red()
            && !tree.node(sibling).is_red()
            && !is_red(tree, close)
            && !is_red(tree, far)
        {
            set_color(tree, sibling, Color::Red);
            tree.publish(Topic::Recolor, &[Some(sibling)]);
            match anchor {
                Some(anchor) => dir = tree.branch_of(anchor, parent),
                None => return,
            }
            continue;
        }

        if tree.node(sibling).is_red() {
            let pivot = rotate(tree, parent, dir);
            set_color(tree, pivot, Color::Black);
            set_color(tree, parent, Color::Red);
            tree.replace_child(anchor, parent, Some(pivot));
            tree.publish_subtree(Topic::Balanced, pivot);
            anchor = Some(pivot);
            sibling = tree
                .child(parent, dir.inverse())
                .expect("Expected sibling of a short branch to be `Some`.");
        }

        let close = tree.child(sibling, dir);
        let far = tree.child(sibling, dir.inverse());
        if !is_red(tree, close) && !is_red(tree, far) {
            // parent is red here
            set_color(tree, sibling, Color::Red);
            set_color(tree, parent, Color::Black);
            tree.publish(Topic::Recolor, &[Some(parent), Some(sibling)]);
            return;
        }

        let prior = tree.node(parent).color;
        let subtree = if is_red(tree, far) {
            rotate(tree, parent, dir)
        } else {
            rotate_double(tree, parent, dir)
        };
        set_color(tree, subtree, prior);
        for branch in &[Branch::Left, Branch::Right] {
            if let Some(child) = tree.child(subtree, *branch) {
                set_color(tree, child, Color::Black);
            }
        }
        tree.replace_child(anchor, parent, Some(subtree));
        tree.publish_subtree(Topic::Balanced, subtree);
        return;
    }
}

pub fn insert<T>(tree: &mut RedBlackTree<T>, key: T) -> Result<NodeId>
where
    T: Ord,
{
    let lineage = tree.trace_vacancy(&key)?;
    let new = tree.attach(lineage.last().cloned(), Node::new(key));
    tree.publish(Topic::Insert, &[Some(new)]);
    rebalance_insertion(tree, new, lineage);
    Ok(new)
}

pub fn delete<T>(tree: &mut RedBlackTree<T>, key: &T) -> Result<()>
where
    T: Ord,
{
    let mut lineage = tree.trace(key)?;
    let target = *lineage
        .last()
        .expect("Expected lineage to end at the target.");
    tree.publish(Topic::Delete, &[Some(target)]);

    if let (Some(left), Some(right)) = (
        tree.child(target, Branch::Left),
        tree.child(target, Branch::Right),
    ) {
        let predecessors = tree.edge_path(left, Branch::Right);
        let successors = tree.edge_path(right, Branch::Left);
        let path = if successors.len() > predecessors.len() {
            successors
        } else {
            predecessors
        };
        let tail = *path.last().expect("Expected a non-empty edge path.");
        lineage.extend(path);
        tree.swap_keys(target, tail);
    }

    let node = lineage
        .pop()
        .expect("Expected lineage to end at the removed node.");
    let parent = lineage.last().cloned();
    let child = tree
        .child(node, Branch::Left)
        .or_else(|| tree.child(node, Branch::Right));

    if tree.node(node).is_red() {
        tree.replace_child(parent, node, child);
    } else if let Some(child) = child {
        set_color(tree, child, Color::Black);
        tree.replace_child(parent, node, Some(child));
        tree.publish(Topic::Recolor, &[Some(child)]);
    } else if let Some(parent) = parent {
        let dir = tree.branch_of(parent, node);
        tree.set_child(parent, dir, None);
        rebalance_removal(tree, lineage, dir);
    } else {
        tree.root = None;
    }
    tree.free(node);
    Ok(())
}

fn assert_black_depth<T>(tree: &RedBlackTree<T>, id: Option<NodeId>) -> usize
where
    T: Ord,
{
    let id = match id {
        Some(id) => id,
        None => return 1,
    };
    let node = tree.node(id);
    if node.is_red() {
        assert!(
            !is_red(tree, node.left) && !is_red(tree, node.right),
            "Red node {:?} has a red child.",
            id,
        );
    }

    let left_depth = assert_black_depth(tree, node.left);
    let right_depth = assert_black_depth(tree, node.right);
    assert_eq!(
        left_depth, right_depth,
        "Paths below node {:?} differ in black depth.",
        id,
    );
    left_depth + if node.is_red() { 0 } else { 1 }
}

/// Panics if the root is red, a red node has a red child, or two paths from a node down to a
/// missing child pass through different numbers of black nodes. Returns the black height.
pub fn assert_colored<T>(tree: &RedBlackTree<T>) -> usize
where
    T: Ord,
{
    assert!(!is_red(tree, tree.root), "Root is red.");
    assert_black_depth(tree, tree.root)
}
