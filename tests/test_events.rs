use balanced_trees::event::{Bus, Event, LogSink, Rotation, Sink, Topic};
use balanced_trees::{avl_tree, red_black_tree, AvlTree, BinaryNode, RedBlackTree};
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::cell::RefCell;
use std::rc::Rc;

fn init_logger() {
    let _ = SimpleLogger::init(LevelFilter::Trace, Config::default());
}

struct Snapshots(Rc<RefCell<Vec<(Topic, u32, Vec<u32>)>>>);

impl<N> Sink<N> for Snapshots
where
    N: BinaryNode<Key = u32>,
{
    fn publish(&mut self, event: &Event<'_, N>) {
        let keys = event.keys().into_iter().cloned().collect();
        self.0
            .borrow_mut()
            .push((event.topic, *event.root.key(), keys));
    }
}

#[test]
fn int_test_event_payloads() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let mut tree: AvlTree<u32> = AvlTree::new().with_sink(Snapshots(snapshots.clone()));
    tree.bulk_insert(vec![1, 2, 3]).unwrap();

    let snapshots = snapshots.borrow();
    assert_eq!(snapshots.len(), 5);
    assert_eq!(snapshots[0], (Topic::Insert, 1, vec![1]));
    assert_eq!(snapshots[1], (Topic::Insert, 1, vec![2]));
    assert_eq!(snapshots[2], (Topic::Insert, 1, vec![3]));

    // the rotation is published before the tree changes shape
    let (topic, root, ref keys) = snapshots[3];
    assert_eq!(topic, Topic::Rotate(Rotation::Left));
    assert_eq!(root, 1);
    assert_eq!(*keys, vec![1, 2]);

    let (topic, root, ref keys) = snapshots[4];
    assert_eq!(topic, Topic::Balanced);
    assert_eq!(root, 2);
    assert_eq!(*keys, vec![1, 2, 3]);
}

#[test]
fn int_test_bus_hierarchy() {
    let counts = Rc::new(RefCell::new((0, 0, 0)));
    let mut bus = Bus::new();

    let rotate_counts = counts.clone();
    bus.subscribe("rotate", move |_: &Event<red_black_tree::Node<u32>>| {
        rotate_counts.borrow_mut().0 += 1;
    });
    let left_counts = counts.clone();
    bus.subscribe("rotate.left", move |_: &Event<red_black_tree::Node<u32>>| {
        left_counts.borrow_mut().1 += 1;
    });
    let recolor_counts = counts.clone();
    bus.subscribe("recolor", move |_: &Event<red_black_tree::Node<u32>>| {
        recolor_counts.borrow_mut().2 += 1;
    });

    let mut tree = RedBlackTree::new().with_sink(bus);
    tree.bulk_insert(vec![1, 2, 3, 4]).unwrap();

    // 1 is recolored as the root, 3 rotates left at 1, 4 recolors 2, 1 and 3 and then the root
    assert_eq!(*counts.borrow(), (1, 1, 3));
}

#[test]
fn int_test_bus_unsubscribe() {
    let count = Rc::new(RefCell::new(0));
    let mut bus = Bus::new();

    let handler_count = count.clone();
    let id = bus.subscribe("insert", move |_: &Event<avl_tree::Node<u32>>| {
        *handler_count.borrow_mut() += 1;
    });
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));

    let mut tree = AvlTree::new().with_sink(bus);
    tree.insert(1).unwrap();
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn int_test_take_sink() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let mut tree: RedBlackTree<u32> = RedBlackTree::new();
    tree.set_sink(Snapshots(snapshots.clone()));
    tree.insert(1).unwrap();
    assert!(tree.take_sink().is_some());
    tree.insert(2).unwrap();

    assert_eq!(
        snapshots
            .borrow()
            .iter()
            .map(|&(topic, _, _)| topic)
            .collect::<Vec<Topic>>(),
        vec![Topic::Insert, Topic::Recolor],
    );
}

#[test]
fn int_test_log_sink() {
    init_logger();

    let mut avl: AvlTree<u32> = AvlTree::new().with_sink(LogSink);
    let mut red_black: RedBlackTree<u32> = RedBlackTree::new().with_sink(LogSink);
    for key in 0..64u32 {
        avl.insert(key).unwrap();
        red_black.insert(key).unwrap();
    }
    for key in 0..32u32 {
        avl.delete(&key).unwrap();
        red_black.delete(&key).unwrap();
    }

    avl.assert_invariants();
    red_black.assert_invariants();
    assert_eq!(avl.len(), 32);
    assert_eq!(red_black.len(), 32);
}
