//! `avl-index` — load a `name,id` list into an AVL tree and report on it.
//!
//! Usage:
//!   avl-index <file> [--print] [--insert ID NAME]... [--delete ID]...
//!
//! Inserts and deletes run in the order given, after the file is loaded.
//! Set `RUST_LOG=debug` to trace rotations.

use avl_index::{AvlTree, Key, LoaderOptions};
use std::process;

enum Action {
    Insert(Key, String),
    Delete(Key),
}

fn usage() -> ! {
    eprintln!("Usage: avl-index <file> [--print] [--insert ID NAME]... [--delete ID]...");
    process::exit(1);
}

fn parse_key(arg: Option<String>) -> Key {
    let Some(arg) = arg else { usage() };
    match arg.parse() {
        Ok(k) => k,
        Err(_) => {
            eprintln!("Invalid id \"{arg}\"");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(file) = args.next() else { usage() };

    let mut print = false;
    let mut actions = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--print" => print = true,
            "--insert" => {
                let key = parse_key(args.next());
                let Some(name) = args.next() else { usage() };
                actions.push(Action::Insert(key, name));
            }
            "--delete" => actions.push(Action::Delete(parse_key(args.next()))),
            _ => usage(),
        }
    }

    let mut tree = AvlTree::new();
    match tree.create_from_file(&file, &LoaderOptions::default()) {
        Ok(summary) => println!(
            "Loaded {} records from \"{file}\" ({} skipped)",
            summary.inserted, summary.skipped
        ),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }

    for action in actions {
        let res = match &action {
            Action::Insert(key, name) => tree.insert(*key, name.as_str()).map(|_| ()),
            Action::Delete(key) => tree.delete(*key).map(|_| ()),
        };
        if let Err(e) = res {
            eprintln!("{e}");
        }
    }

    match (tree.size(), tree.max_height()) {
        (Ok(size), Ok(height)) => {
            println!("AVL tree size: {size}");
            println!("AVL tree max_height: {height}");
        }
        _ => println!("AVL tree is empty"),
    }

    if print {
        if let Ok(out) = tree.print() {
            print!("{out}");
        }
    }

    if let Ok(released) = tree.destroy() {
        log::debug!("released {released} nodes");
    }
}
