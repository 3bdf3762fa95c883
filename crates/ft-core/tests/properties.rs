//! Property tests over random operation sequences.

use ft_core::{Checker, FileContents, FileTree, FtPath};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertDir(String),
    InsertFile(String, Vec<u8>),
    RmDir(String),
    RmFile(String),
}

/// Paths under a small alphabet so operations collide often.
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["r", "a", "b", "c"]), 1..5)
        .prop_map(|components| components.join("/"))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => path_strategy().prop_map(Op::InsertDir),
        2 => (path_strategy(), prop::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(path, data)| Op::InsertFile(path, data)),
        1 => path_strategy().prop_map(Op::RmDir),
        1 => path_strategy().prop_map(Op::RmFile),
    ]
}

fn apply(tree: &mut FileTree, op: &Op) -> bool {
    match op {
        Op::InsertDir(path) => tree.insert_dir(path).is_ok(),
        Op::InsertFile(path, data) => tree
            .insert_file(path, FileContents::from(data.clone()))
            .is_ok(),
        Op::RmDir(path) => tree.rm_dir(path).is_ok(),
        Op::RmFile(path) => tree.rm_file(path).is_ok(),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tree = FileTree::new();
        tree.init().unwrap();

        for op in &ops {
            let before = tree.serialize();
            let succeeded = apply(&mut tree, op);
            prop_assert!(Checker::check(&tree).is_ok(), "after {:?}: {:?}", op, Checker::check(&tree));
            if !succeeded {
                prop_assert_eq!(tree.serialize(), before, "failed {:?} changed the tree", op);
            }
        }
    }

    #[test]
    fn insert_then_contains(path in path_strategy(), as_file in any::<bool>()) {
        let mut tree = FileTree::new();
        tree.init().unwrap();
        let parsed = FtPath::new(&path).unwrap();

        if as_file {
            let result = tree.insert_file(&path, FileContents::empty());
            if parsed.depth() == 1 {
                prop_assert!(result.unwrap_err().is_conflicting_path());
            } else {
                prop_assert!(result.is_ok());
                prop_assert!(tree.contains_file(&path));
                prop_assert!(!tree.contains_dir(&path));
            }
        } else {
            tree.insert_dir(&path).unwrap();
            prop_assert!(tree.contains_dir(&path));
            prop_assert!(!tree.contains_file(&path));
        }
    }

    #[test]
    fn children_are_listed_in_path_order(
        names in prop::collection::hash_set("[a-z0-9]{1,6}", 1..20),
        files in prop::collection::vec(any::<bool>(), 20),
    ) {
        let mut tree = FileTree::new();
        tree.init().unwrap();
        tree.insert_dir("root").unwrap();

        for (name, is_file) in names.iter().zip(&files) {
            let path = format!("root/{name}");
            if *is_file {
                tree.insert_file(&path, FileContents::empty()).unwrap();
            } else {
                tree.insert_dir(&path).unwrap();
            }
        }

        let listed: Vec<String> = tree
            .list_dir("root")
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        let mut expected: Vec<String> = names.into_iter().collect();
        expected.sort();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn serialization_lists_every_node_once(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut tree = FileTree::new();
        tree.init().unwrap();
        for op in &ops {
            apply(&mut tree, op);
        }

        let text = tree.serialize().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), tree.count());

        let mut unique = lines.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), lines.len());

        // every line after the first has its parent somewhere before it
        for (index, line) in lines.iter().enumerate().skip(1) {
            let path = FtPath::new(line).unwrap();
            let parent = path.prefix(path.depth() - 1).unwrap();
            prop_assert!(lines[..index].contains(&parent.as_str()));
        }
    }
}
