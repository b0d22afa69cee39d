//! Record source parsing.
//!
//! Each row holds two columns, `name,id`. The id must parse as a `u32`;
//! range checking is left to [`AvlTree::insert`](crate::AvlTree::insert).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Key;

/// `(id, name)` pair fed to [`AvlTree::create`](crate::AvlTree::create).
pub type Record = (Key, String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Column separator.
    pub delimiter: char,
    /// Skip rows that are empty after trimming instead of rejecting them.
    pub skip_blank_lines: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_blank_lines: true,
        }
    }
}

/// Parses one row. `line` is 1-based and only used for error reporting.
pub fn parse_row(row: &str, line: usize, options: &LoaderOptions) -> Result<Record> {
    let cols: Vec<&str> = row.split(options.delimiter).collect();
    let [name, id] = cols.as_slice() else {
        return Err(Error::InvalidFile {
            line,
            reason: format!("expected 2 columns, found {}", cols.len()),
        });
    };
    let key = id
        .trim()
        .parse::<Key>()
        .map_err(|_| Error::InvalidKey(format!("{id:?} at line {line}")))?;
    Ok((key, name.to_string()))
}

/// Reads every row of `reader`. The first bad row aborts the whole read.
pub fn read_records<R: BufRead>(reader: R, options: &LoaderOptions) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (i, row) in reader.lines().enumerate() {
        let line = i + 1;
        let row = row.map_err(|e| Error::InvalidFile {
            line,
            reason: e.to_string(),
        })?;
        let row = row.strip_suffix('\r').unwrap_or(&row);
        if options.skip_blank_lines && row.trim().is_empty() {
            continue;
        }
        records.push(parse_row(row, line, options)?);
    }
    Ok(records)
}

pub fn parse_records(input: &str, options: &LoaderOptions) -> Result<Vec<Record>> {
    read_records(input.as_bytes(), options)
}

pub fn read_records_from_path(
    path: impl AsRef<Path>,
    options: &LoaderOptions,
) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::InvalidFile {
        line: 0,
        reason: format!("{}: {e}", path.display()),
    })?;
    read_records(BufReader::new(file), options)
}
