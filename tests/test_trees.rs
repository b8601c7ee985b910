const NUM_OF_OPERATIONS: usize = 10_000;
const NUM_OF_KEYS: u32 = 2_000;

macro_rules! balanced_tree_tests {
    ($($module_name:ident: $type_name:ident$(,)*)*) => {
        $(
            mod $module_name {
                use balanced_trees::{$type_name, Error};
                use rand::Rng;
                use std::collections::BTreeSet;
                use super::{NUM_OF_KEYS, NUM_OF_OPERATIONS};

                #[test]
                fn int_test_tree() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::new();
                    let mut expected = BTreeSet::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, NUM_OF_KEYS);

                        if rng.gen::<bool>() {
                            let res = tree.insert(key).map(|node| *node.key());
                            if expected.insert(key) {
                                assert_eq!(res, Ok(key));
                            } else {
                                assert_eq!(res, Err(Error::DuplicateKey));
                            }
                        } else {
                            let res = tree.delete(&key);
                            if expected.remove(&key) {
                                assert_eq!(res, Ok(()));
                            } else {
                                assert_eq!(res, Err(Error::KeyNotFound));
                            }
                        }

                        assert_eq!(tree.contains(&key), expected.contains(&key));
                        assert_eq!(tree.len(), expected.len());
                    }

                    tree.assert_invariants();
                    assert_eq!(
                        tree.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                }

                #[test]
                fn int_test_invariants_after_every_operation() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
                    let mut tree = $type_name::new();

                    for _ in 0..NUM_OF_OPERATIONS / 10 {
                        let key = rng.gen_range(0, NUM_OF_KEYS / 10);
                        if tree.contains(&key) {
                            tree.delete(&key).unwrap();
                        } else {
                            tree.insert(key).unwrap();
                        }
                        tree.assert_invariants();
                    }
                }

                #[test]
                fn int_test_height_is_logarithmic() {
                    let mut tree = $type_name::new();
                    tree.bulk_insert(0..1023u32).unwrap();
                    tree.assert_invariants();

                    // both strategies stay within twice the height of a perfect tree
                    assert!(tree.height() <= 20);
                    assert_eq!(tree.len(), 1023);
                }

                #[test]
                fn int_test_delete_then_reinsert() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([3, 3, 3, 3]);
                    let mut keys: Vec<u32> = (0..500).collect();
                    rng.shuffle(&mut keys);

                    let mut tree = $type_name::new();
                    tree.bulk_insert(keys.iter().cloned()).unwrap();

                    let (deleted, kept) = keys.split_at(200);
                    for key in deleted {
                        tree.delete(key).unwrap();
                    }
                    tree.assert_invariants();
                    assert_eq!(tree.len(), kept.len());

                    let mut sorted_kept = kept.to_vec();
                    sorted_kept.sort();
                    assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), sorted_kept);

                    tree.bulk_insert(deleted.iter().cloned()).unwrap();
                    tree.assert_invariants();
                    assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), (0..500).collect::<Vec<u32>>());
                }

                #[test]
                fn int_test_rejections_leave_tree_unchanged() {
                    let mut tree = $type_name::new();
                    tree.bulk_insert(vec![5, 3, 8, 1, 4]).unwrap();
                    let shape = tree.pre_order().cloned().collect::<Vec<u32>>();

                    assert_eq!(tree.insert(4).err(), Some(Error::DuplicateKey));
                    assert_eq!(tree.delete(&7), Err(Error::KeyNotFound));
                    assert_eq!(tree.get(&7).err(), Some(Error::KeyNotFound));
                    assert_eq!(tree.pre_order().cloned().collect::<Vec<u32>>(), shape);
                    assert_eq!(tree.len(), 5);
                }

                #[test]
                fn int_test_bulk_insert_keeps_prefix() {
                    let mut tree = $type_name::new();
                    assert_eq!(
                        tree.bulk_insert(vec![3, 1, 2, 1, 5]),
                        Err(Error::DuplicateKey),
                    );
                    assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
                    tree.assert_invariants();
                }

                #[test]
                fn int_test_traversals_visit_every_key() {
                    let mut tree = $type_name::new();
                    tree.bulk_insert(1..8u32).unwrap();

                    for mut keys in vec![
                        tree.pre_order().cloned().collect::<Vec<u32>>(),
                        tree.post_order().cloned().collect::<Vec<u32>>(),
                        tree.breadth_first().cloned().collect::<Vec<u32>>(),
                    ] {
                        keys.sort();
                        assert_eq!(keys, (1..8).collect::<Vec<u32>>());
                    }
                    assert_eq!((&tree).into_iter().count(), 7);
                }

                #[test]
                fn int_test_insert_then_delete_restores_order() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([4, 4, 4, 4]);
                    let mut tree = $type_name::new();
                    for _ in 0..NUM_OF_OPERATIONS / 10 {
                        let _ = tree.insert(rng.gen_range(0, NUM_OF_KEYS));
                    }

                    for _ in 0..NUM_OF_OPERATIONS / 10 {
                        let key = rng.gen_range(0, NUM_OF_KEYS);
                        if tree.contains(&key) {
                            continue;
                        }

                        let snapshot = tree.iter().cloned().collect::<Vec<u32>>();
                        tree.insert(key).unwrap();
                        tree.delete(&key).unwrap();
                        tree.assert_invariants();
                        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), snapshot);
                    }
                }

                #[test]
                fn int_test_clear() {
                    let mut tree = $type_name::with_capacity(16);
                    tree.bulk_insert(0..16u32).unwrap();
                    tree.clear();

                    assert!(tree.is_empty());
                    assert_eq!(tree.height(), 0);
                    assert!(tree.root().is_none());
                    assert_eq!(tree.iter().next(), None);

                    tree.insert(1).unwrap();
                    assert_eq!(tree.len(), 1);
                    tree.assert_invariants();
                }
            }
        )*
    }
}

balanced_tree_tests!(avl_tree: AvlTree, red_black_tree: RedBlackTree);

mod traversal_order {
    use balanced_trees::{AvlTree, RedBlackTree};

    #[test]
    fn int_test_avl_tree_orders() {
        let mut tree = AvlTree::new();
        tree.bulk_insert(1..11u32).unwrap();

        assert_eq!(
            tree.breadth_first().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 8, 1, 3, 6, 9, 5, 7, 10],
        );
        assert_eq!(
            tree.pre_order().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 1, 3, 8, 6, 5, 7, 9, 10],
        );
        assert_eq!(
            tree.post_order().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 2, 5, 7, 6, 10, 9, 8, 4],
        );
    }

    #[test]
    fn int_test_avl_tree_perfect_level_order() {
        let mut tree = AvlTree::new();
        tree.bulk_insert(1..8u32).unwrap();

        assert_eq!(
            tree.breadth_first().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 6, 1, 3, 5, 7],
        );
        assert_eq!(
            tree.pre_order().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 1, 3, 6, 5, 7],
        );
        assert_eq!(
            tree.post_order().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 2, 5, 7, 6, 4],
        );
    }

    #[test]
    fn int_test_red_black_tree_orders() {
        let mut tree = RedBlackTree::new();
        tree.bulk_insert(1..11u32).unwrap();

        assert_eq!(
            tree.breadth_first().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 6, 1, 3, 5, 8, 7, 9, 10],
        );
        assert_eq!(
            tree.pre_order().cloned().collect::<Vec<u32>>(),
            vec![4, 2, 1, 3, 6, 5, 8, 7, 9, 10],
        );
        assert_eq!(
            tree.post_order().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 2, 5, 7, 10, 9, 8, 6, 4],
        );
    }

    #[test]
    fn int_test_empty_tree_orders() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.pre_order().next(), None);
        assert_eq!(tree.post_order().next(), None);
        assert_eq!(tree.breadth_first().next(), None);
    }
}
