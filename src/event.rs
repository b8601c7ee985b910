//! Instrumentation hook for observing structural changes to a tree.
//!
//! A tree holds at most one `Sink`. Every mutating step (attaching a leaf, starting a delete,
//! rotating, finishing a rebalance, recoloring) is published to it synchronously as an `Event`
//! that borrows the tree immutably. Sinks therefore observe the tree but can never mutate it.

use crate::node::{BinaryNode, NodeRef};
use std::collections::HashMap;
use std::fmt;

/// The shape of a rotation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// Hoists the right child.
    Left,
    /// Hoists the left child.
    Right,
    /// Hoists the left child's right child.
    LeftRight,
    /// Hoists the right child's left child.
    RightLeft,
}

/// What kind of structural step an event describes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    Insert,
    Delete,
    Rotate(Rotation),
    Balanced,
    Recolor,
}

impl Topic {
    /// Returns the dotted name of the topic, e.g. `rotate.leftright`.
    pub fn name(self) -> &'static str {
        match self {
            Topic::Insert => "insert",
            Topic::Delete => "delete",
            Topic::Rotate(Rotation::Left) => "rotate.left",
            Topic::Rotate(Rotation::Right) => "rotate.right",
            Topic::Rotate(Rotation::LeftRight) => "rotate.leftright",
            Topic::Rotate(Rotation::RightLeft) => "rotate.rightleft",
            Topic::Balanced => "balanced",
            Topic::Recolor => "recolor",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single published step.
pub struct Event<'a, N> {
    pub topic: Topic,
    /// The root of the tree at the time of publishing.
    pub root: NodeRef<'a, N>,
    /// The nodes touched by this step, without duplicates and ordered by `NodeId`.
    pub nodes: Vec<NodeRef<'a, N>>,
}

impl<'a, N> Event<'a, N>
where
    N: BinaryNode,
{
    /// Returns the keys of the touched nodes.
    pub fn keys(&self) -> Vec<&'a N::Key> {
        self.nodes.iter().map(|node| node.key()).collect()
    }
}

/// A consumer of tree events.
///
/// Any `FnMut(&Event<N>)` closure is a sink.
///
/// # Examples
///
/// ```
/// use balanced_trees::event::{Event, Sink, Topic};
/// use balanced_trees::node::BinaryNode;
/// use balanced_trees::AvlTree;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// struct Recorder(Rc<RefCell<Vec<Topic>>>);
///
/// impl<N: BinaryNode> Sink<N> for Recorder {
///     fn publish(&mut self, event: &Event<N>) {
///         self.0.borrow_mut().push(event.topic);
///     }
/// }
///
/// let topics = Rc::new(RefCell::new(Vec::new()));
/// let mut tree = AvlTree::new().with_sink(Recorder(topics.clone()));
/// tree.bulk_insert(vec![1, 2]).unwrap();
///
/// assert_eq!(*topics.borrow(), vec![Topic::Insert, Topic::Insert]);
/// ```
pub trait Sink<N> {
    fn publish(&mut self, event: &Event<'_, N>);
}

impl<N, F> Sink<N> for F
where
    F: FnMut(&Event<'_, N>),
{
    fn publish(&mut self, event: &Event<'_, N>) {
        self(event)
    }
}

/// A sink that writes every event to the `log` facade at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl<N> Sink<N> for LogSink
where
    N: BinaryNode,
    N::Key: fmt::Debug,
{
    fn publish(&mut self, event: &Event<'_, N>) {
        debug!(
            "{}: root={:?} nodes={:?}",
            event.topic,
            event.root.key(),
            event.keys(),
        );
    }
}

/// A handle identifying a handler registered with a `Bus`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(usize);

type Handler<N> = Box<dyn FnMut(&Event<'_, N>)>;

/// A sink that fans events out to handlers subscribed by topic name.
///
/// Subscriptions are hierarchical: an event published as `rotate.left` is delivered to handlers
/// of `rotate.left` first and then to handlers of `rotate`.
///
/// # Examples
///
/// ```
/// use balanced_trees::event::{Bus, Event};
/// use balanced_trees::{avl_tree, AvlTree};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let rotations = Rc::new(Cell::new(0));
/// let counter = rotations.clone();
///
/// let mut bus = Bus::new();
/// bus.subscribe("rotate", move |_: &Event<avl_tree::Node<u32>>| {
///     counter.set(counter.get() + 1);
/// });
///
/// let mut tree = AvlTree::new().with_sink(bus);
/// tree.bulk_insert(vec![1, 2, 3]).unwrap();
///
/// assert_eq!(rotations.get(), 1);
/// ```
pub struct Bus<N> {
    subscribers: HashMap<String, Vec<(SubscriptionId, Handler<N>)>>,
    next_id: usize,
}

impl<N> Bus<N> {
    pub fn new() -> Self {
        Bus {
            subscribers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers a handler for a topic name and every topic nested under it.
    pub fn subscribe<F>(&mut self, topic: &str, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event<'_, N>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(topic.to_string())
            .or_insert_with(Vec::new)
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a previously registered handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for handlers in self.subscribers.values_mut() {
            let before = handlers.len();
            handlers.retain(|&(handler_id, _)| handler_id != id);
            removed |= handlers.len() != before;
        }
        removed
    }
}

impl<N> Default for Bus<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Sink<N> for Bus<N> {
    fn publish(&mut self, event: &Event<'_, N>) {
        let mut topic = event.topic.name();
        loop {
            if let Some(handlers) = self.subscribers.get_mut(topic) {
                for (_, handler) in handlers.iter_mut() {
                    handler(event);
                }
            }
            match topic.rfind('.') {
                Some(index) => topic = &topic[..index],
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Rotation, Topic};
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::Insert.to_string(), "insert");
        assert_eq!(Topic::Delete.to_string(), "delete");
        assert_eq!(Topic::Rotate(Rotation::Left).to_string(), "rotate.left");
        assert_eq!(Topic::Rotate(Rotation::Right).to_string(), "rotate.right");
        assert_eq!(
            Topic::Rotate(Rotation::LeftRight).to_string(),
            "rotate.leftright",
        );
        assert_eq!(
            Topic::Rotate(Rotation::RightLeft).to_string(),
            "rotate.rightleft",
        );
        assert_eq!(Topic::Balanced.to_string(), "balanced");
        assert_eq!(Topic::Recolor.to_string(), "recolor");
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &Topic::Rotate(Rotation::RightLeft),
            &[
                Token::NewtypeVariant {
                    name: "Topic",
                    variant: "Rotate",
                },
                Token::UnitVariant {
                    name: "Rotation",
                    variant: "RightLeft",
                },
            ],
        );
        assert_tokens(
            &Topic::Recolor,
            &[Token::UnitVariant {
                name: "Topic",
                variant: "Recolor",
            }],
        );
    }
}
