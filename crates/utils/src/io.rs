//! I/O utilities

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Iterate over the non-empty lines of a JSON-lines style file
pub fn non_empty_lines(path: impl AsRef<Path>) -> std::io::Result<NonEmptyLines> {
    let file = File::open(path.as_ref())?;
    Ok(NonEmptyLines {
        inner: BufReader::new(file).lines(),
        line_no: 0,
    })
}

/// Line iterator that skips blank lines and reports 1-based line numbers
pub struct NonEmptyLines {
    inner: Lines<BufReader<File>>,
    line_no: usize,
}

impl Iterator for NonEmptyLines {
    type Item = std::io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.inner.next()?;
            self.line_no += 1;
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok((self.line_no, line))),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Create the parent directory of a file path if it doesn't exist
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> std::io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
