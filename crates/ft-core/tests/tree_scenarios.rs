//! End-to-end scenarios for the file tree API.
//!
//! Drives a `FileTree` through the same sequence a client program would and
//! checks the structural invariants after every step.

use ft_core::{Checker, FileContents, FileTree, FtError, Stat, Status, TreeBuilder, TreeConfig};

fn assert_valid(tree: &FileTree) {
    if let Err(violation) = Checker::check(tree) {
        panic!("invariant violated: {violation}");
    }
}

fn new_tree() -> FileTree {
    let mut tree = FileTree::new();
    tree.init().unwrap();
    tree
}

/// Walks the full client scenario from an uninitialized tree to destroy.
#[test]
fn test_client_walkthrough() {
    let mut tree = FileTree::new();

    // Before init, everything but init fails
    assert_eq!(tree.insert_dir("1root/2child/3gkid"), Err(FtError::NotInitialized));
    assert!(!tree.contains_dir("1root/2child/3gkid"));
    assert_eq!(tree.serialize(), None);
    assert_eq!(tree.destroy(), Err(FtError::NotInitialized));
    assert_valid(&tree);

    // Scenario 1
    tree.init().unwrap();
    assert_eq!(tree.init(), Err(FtError::AlreadyInitialized));
    assert_eq!(tree.serialize().as_deref(), Some(""));
    assert_valid(&tree);

    // Scenario 3: a file cannot be the sole root
    let result = tree.insert_file("A", FileContents::empty());
    assert_eq!(Status::of(&result), Status::ConflictingPath);
    assert_valid(&tree);

    // Scenario 4
    for bad in ["", "/1root/2child", "1root/2child/", "1root//2child"] {
        assert_eq!(Status::of(&tree.insert_dir(bad)), Status::BadPath, "{bad:?}");
    }

    // Scenario 2
    tree.insert_dir("1root/2child/3gkid").unwrap();
    assert!(tree.contains_dir("1root/2child"));
    assert!(tree.contains_dir("1root/2child/3gkid"));
    assert!(!tree.contains_file("1root/2child/3gkid"));
    assert_valid(&tree);

    // Scenario 5
    tree.insert_dir("1root/2child/3gk2/4ggk").unwrap();
    assert_eq!(Status::of(&tree.stat("1root/H")), Status::NoSuchPath);
    assert_eq!(tree.count(), 5);
    assert_valid(&tree);

    // Files and stat
    tree.insert_file("1root/2second/3gfile", "hello, world".into())
        .unwrap();
    assert_eq!(
        tree.stat("1root/2second/3gfile"),
        Ok(Stat::File { size: 12 })
    );
    assert_eq!(tree.stat("1root/2second"), Ok(Stat::Directory));

    // Scenario 6
    assert_eq!(
        Status::of(&tree.rm_dir("1root/2second/3gfile")),
        Status::NotADirectory
    );
    assert_eq!(Status::of(&tree.rm_file("1root/2second")), Status::NotAFile);
    assert_valid(&tree);

    assert_eq!(
        tree.serialize().unwrap(),
        "1root\n\
         1root/2child\n\
         1root/2child/3gk2\n\
         1root/2child/3gk2/4ggk\n\
         1root/2child/3gkid\n\
         1root/2second\n\
         1root/2second/3gfile\n"
    );

    tree.rm_dir("1root/2child").unwrap();
    assert_eq!(tree.count(), 3);
    tree.rm_file("1root/2second/3gfile").unwrap();
    assert_eq!(tree.count(), 2);
    assert_valid(&tree);

    tree.destroy().unwrap();
    assert!(!tree.is_initialized());
    assert_valid(&tree);
}

/// Inserting the same directory twice fails without changing the count.
#[test]
fn test_idempotent_failure() {
    let mut tree = new_tree();
    tree.insert_dir("a/b/c").unwrap();
    let before = tree.serialize();

    let result = tree.insert_dir("a/b/c");
    assert_eq!(
        result,
        Err(FtError::AlreadyInTree {
            path: "a/b/c".to_string()
        })
    );
    assert_eq!(tree.count(), 3);
    assert_eq!(tree.serialize(), before);
}

/// A multi-level file insert that cannot allocate its last level leaves no
/// trace behind.
#[test]
fn test_atomic_rollback() {
    let config = TreeConfig::builder().max_nodes(2).self_check(true).build();
    let mut tree = FileTree::with_config(config);
    tree.init().unwrap();

    let result = tree.insert_file("a/b/c", "payload".into());
    assert!(result.unwrap_err().is_out_of_memory());
    assert!(!tree.contains_dir("a"));
    assert!(!tree.contains_dir("a/b"));
    assert_eq!(tree.count(), 0);
    assert_valid(&tree);

    // The tree remains usable within its budget
    tree.insert_dir("a/b").unwrap();
    assert_eq!(tree.count(), 2);
    assert_valid(&tree);
}

/// Directory and file names never shadow each other.
#[test]
fn test_disjoint_namespaces() {
    let mut tree = TreeBuilder::new()
        .add_dir("r/shared")
        .add_file("r/data", "1")
        .build()
        .unwrap();

    assert!(tree.insert_file("r/shared", "2".into()).unwrap_err().is_already_in_tree());
    assert!(tree.insert_dir("r/data").unwrap_err().is_already_in_tree());
    assert_eq!(tree.stat("r/shared"), Ok(Stat::Directory));
    assert_eq!(
        tree.get_file_contents("r/data").map(FileContents::len),
        Some(1)
    );
    assert_valid(&tree);
}

/// Operations on independent handles do not interfere.
#[test]
fn test_independent_trees() {
    let mut left = new_tree();
    let mut right = new_tree();

    left.insert_dir("left/a").unwrap();
    right.insert_dir("right/b").unwrap();

    assert!(left.contains_dir("left/a"));
    assert!(!left.contains_dir("right/b"));
    assert!(right.contains_dir("right/b"));
    assert!(!right.contains_dir("left/a"));
}

/// Replacing file contents keeps the node and updates the reported size.
#[test]
fn test_replace_contents() {
    let mut tree = new_tree();
    tree.insert_file("r/f", FileContents::empty()).unwrap();
    assert_eq!(tree.stat("r/f"), Ok(Stat::File { size: 0 }));

    let old = tree
        .replace_file_contents("r/f", FileContents::new(Some(vec![0; 4]), 4))
        .unwrap();
    assert_eq!(old, FileContents::empty());
    assert_eq!(tree.stat("r/f"), Ok(Stat::File { size: 4 }));
    assert_eq!(tree.count(), 2);
}

/// Walking below an existing file is rejected for every operation.
#[test]
fn test_paths_through_files() {
    let mut tree = TreeBuilder::new().add_file("r/f", "x").build().unwrap();

    for result in [
        tree.insert_dir("r/f/d"),
        tree.insert_file("r/f/g", FileContents::empty()),
        tree.rm_dir("r/f/d"),
        tree.rm_file("r/f/g"),
    ] {
        assert_eq!(Status::of(&result), Status::NotADirectory);
    }
    assert_eq!(Status::of(&tree.stat("r/f/g")), Status::NotADirectory);
    assert_eq!(tree.count(), 2);
    assert_valid(&tree);
}

/// Counts serialized lines and bytes without keeping the text.
#[derive(Default)]
struct LineCounter {
    lines: usize,
    bytes: usize,
}

impl std::fmt::Write for LineCounter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.bytes += s.len();
        if s.ends_with('\n') {
            self.lines += 1;
        }
        Ok(())
    }
}

/// Tests that a very deep path can be inserted, checked, serialized,
/// trimmed and destroyed with the default self check enabled.
#[test]
fn test_very_deep_path() {
    let depth = 20_000;
    let deepest = vec!["a"; depth].join("/");
    let mut tree = new_tree();

    tree.insert_dir(&deepest).unwrap();
    assert_eq!(tree.count(), depth);
    assert!(tree.contains_dir(&deepest));
    assert_eq!(tree.stat(&deepest), Ok(Stat::Directory));
    assert_eq!(Checker::check(&tree), Ok(()));

    // Line k is k components long: 2k - 1 bytes plus the newline
    let mut counter = LineCounter::default();
    tree.write_tree(&mut counter).unwrap();
    assert_eq!(counter.lines, depth);
    assert_eq!(counter.bytes, depth * (depth + 1));

    let half = vec!["a"; depth / 2].join("/");
    tree.rm_dir(&half).unwrap();
    assert_eq!(tree.count(), depth / 2 - 1);
    assert!(!tree.contains_dir(&deepest));
    assert_valid(&tree);

    tree.destroy().unwrap();
    assert_eq!(tree.count(), 0);
    assert!(tree.nodes().is_empty());
    assert_valid(&tree);
}
