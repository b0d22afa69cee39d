use std::path::PathBuf;

use avl_index::loader::{parse_records, read_records_from_path};
use avl_index::{AvlTree, Error, LoaderOptions};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn create_from_file_matrix() {
    let opts = LoaderOptions::default();
    let mut tree = AvlTree::new();
    let summary = tree.create_from_file(data("name_id_list.txt"), &opts).unwrap();
    assert_eq!((summary.inserted, summary.skipped), (11, 0));
    assert_eq!(tree.size(), Ok(11));
    assert_eq!(tree.get(434657890), Some("Johnny Bravo"));
    tree.assert_valid().unwrap();

    assert_eq!(
        tree.create_from_file(data("name_id_list.txt"), &opts),
        Err(Error::InvalidTree)
    );

    assert_eq!(tree.destroy(), Ok(11));
    assert_eq!(tree.destroy(), Err(Error::InvalidTree));
}

#[test]
fn bad_columns_abort_load_matrix() {
    let mut tree = AvlTree::new();
    let res = tree.create_from_file(data("bad_columns.txt"), &LoaderOptions::default());
    assert_eq!(
        res,
        Err(Error::InvalidFile {
            line: 2,
            reason: "expected 2 columns, found 3".to_string()
        })
    );
    assert!(tree.is_empty());
}

#[test]
fn malformed_key_aborts_load_matrix() {
    let mut tree = AvlTree::new();
    let input = "Daft Punk,101010101\nGohan,12x45\n";
    let res = tree.create_from_reader(input.as_bytes(), &LoaderOptions::default());
    assert!(matches!(res, Err(Error::InvalidKey(ref s)) if s.contains("line 2")));
    assert!(tree.is_empty());
}

#[test]
fn rejected_records_are_skipped_matrix() {
    let mut tree = AvlTree::new();
    let summary = tree
        .create_from_file(data("with_rejects.txt"), &LoaderOptions::default())
        .unwrap();
    assert_eq!((summary.inserted, summary.skipped), (2, 3));
    let entries: Vec<(u32, &str)> = tree.iter().collect();
    assert_eq!(
        entries,
        vec![(101010101, "Daft Punk"), (121212121, "Ash Ketchum")]
    );
}

#[test]
fn parse_matches_file_matrix() {
    let from_file =
        read_records_from_path(data("name_id_list.txt"), &LoaderOptions::default()).unwrap();
    let text = std::fs::read_to_string(data("name_id_list.txt")).unwrap();
    let from_str = parse_records(&text, &LoaderOptions::default()).unwrap();
    assert_eq!(from_file, from_str);
    assert_eq!(from_file[0], (101010101, "Daft Punk".to_string()));
}

#[test]
fn empty_source_loads_nothing_matrix() {
    let mut tree = AvlTree::new();
    let summary = tree
        .create_from_reader(&b""[..], &LoaderOptions::default())
        .unwrap();
    assert_eq!(summary.inserted, 0);
    assert!(tree.is_empty());
}
