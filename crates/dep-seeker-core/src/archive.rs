//! Symbol indexing for packaged JVM artifacts.
//!
//! `.jar` and `.aar` files are zip archives. Every `.class` entry is one
//! symbol; an Android `classes.jar` nested inside an `.aar` is unpacked in
//! memory and indexed the same way.

use crate::error::ArchiveError;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, trace};

/// Artifact extensions that are opened as archives.
pub const ARCHIVE_EXTENSIONS: [&str; 2] = [".jar", ".aar"];

/// Name of the inner archive carrying compiled classes.
pub const NESTED_ARCHIVE_NAME: &str = "classes.jar";

const CLASS_EXTENSION: &str = ".class";

/// Nested archives deeper than this are not unpacked.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Returns the fully-qualified names of the classes packaged in `path`.
///
/// Files without an archive extension contribute nothing.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid archive.
pub fn archive_symbols(path: &Path) -> Result<BTreeSet<String>, ArchiveError> {
    if !is_archive(path) {
        trace!(path = %path.display(), "skipping non-archive artifact");
        return Ok(BTreeSet::new());
    }
    let file = File::open(path)?;
    let mut symbols = BTreeSet::new();
    collect_symbols(file, 0, &mut symbols)?;
    debug!(path = %path.display(), symbols = symbols.len(), "indexed artifact");
    Ok(symbols)
}

/// Whether `path` names a `.jar` or `.aar` file.
#[must_use]
pub fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Converts an entry path such as `com/example/Foo.class` to `com.example.Foo`.
#[must_use]
pub fn class_symbol(entry_name: &str) -> Option<String> {
    entry_name
        .strip_suffix(CLASS_EXTENSION)
        .map(|stem| stem.replace('/', "."))
}

fn collect_symbols<R: Read + Seek>(
    reader: R,
    depth: usize,
    symbols: &mut BTreeSet<String>,
) -> Result<(), ArchiveError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if let Some(symbol) = class_symbol(&name) {
            symbols.insert(symbol);
        } else if name == NESTED_ARCHIVE_NAME {
            if depth >= MAX_NESTING_DEPTH {
                debug!(entry = %name, depth, "nested archive too deep, skipping");
                continue;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            collect_symbols(Cursor::new(bytes), depth + 1, symbols)?;
        }
    }
    Ok(())
}
