use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(Key, String),
    Delete(Key),
}

// Narrow key window so inserts and deletes collide often.
fn key() -> impl Strategy<Value = Key> {
    MIN_KEY..MIN_KEY + 512
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key(), "[a-z]{0,8}").prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key().prop_map(Op::Delete),
    ]
}

fn validate_tree(tree: &AvlTree, model: &BTreeMap<Key, String>) {
    tree.assert_valid().unwrap();
    let entries: Vec<(Key, String)> = tree.iter().map(|(k, v)| (k, v.to_string())).collect();
    let expected: Vec<(Key, String)> = model.iter().map(|(k, v)| (*k, v.clone())).collect();
    assert_eq!(entries, expected);
    match tree.size() {
        Ok(n) => assert_eq!(n, model.len()),
        Err(e) => {
            assert_eq!(e, Error::InvalidTree);
            assert!(model.is_empty());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_btreemap(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let res = tree.insert(k, v.clone());
                    if model.contains_key(&k) {
                        prop_assert_eq!(res, Err(Error::KeyExists(k)));
                    } else {
                        let ins = res.unwrap();
                        prop_assert_eq!(tree.node(ins.node).map(|n| n.k), Some(k));
                        model.insert(k, v);
                    }
                }
                Op::Delete(k) => {
                    let res = tree.delete(k);
                    match model.remove(&k) {
                        Some(v) => prop_assert_eq!(res, Ok(v)),
                        None if model.is_empty() && tree.is_empty() => {
                            prop_assert_eq!(res, Err(Error::InvalidTree))
                        }
                        None => prop_assert_eq!(res, Err(Error::KeyNotFound(k))),
                    }
                }
            }
            validate_tree(&tree, &model);
        }
    }

    #[test]
    fn round_trip_distinct_keys(keys in prop::collection::hash_set(MIN_KEY..=MAX_KEY, 1..300)) {
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k, k.to_string()).unwrap();
        }
        prop_assert_eq!(tree.size(), Ok(keys.len()));

        // Height bound: 1.44 * log2(n + 2).
        let bound = (1.45 * ((keys.len() + 2) as f64).log2()).ceil() as i32;
        prop_assert!(tree.max_height().unwrap() <= bound);

        for &k in &keys {
            let (node, found) = tree.search(k).unwrap();
            prop_assert!(found);
            prop_assert_eq!(tree.node(node).unwrap().payload(), k.to_string());
        }

        let victims: Vec<Key> = keys.iter().copied().step_by(2).collect();
        for &k in &victims {
            prop_assert_eq!(tree.delete(k), Ok(k.to_string()));
            prop_assert_eq!(tree.get(k), None);
            tree.assert_valid().unwrap();
        }
    }

    #[test]
    fn single_insert_rotates_at_most_once(
        keys in prop::collection::vec(MIN_KEY..=MAX_KEY, 1..300)
    ) {
        let mut tree = AvlTree::new();
        for k in keys {
            if let Ok((_, rotations)) = tree.insert_node(k, String::new()) {
                prop_assert!(rotations.len() <= 1, "{:?}", rotations);
                tree.assert_valid().unwrap();
            }
        }
    }
}
