//! Reads the set of assets already registered in an `.mgcb` file.

use crate::error::{MgcbError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

static BEGIN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#begin (.+)$").unwrap());

/// Identifier named by a `#begin <path>` line, if the line is one.
pub fn begin_marker(line: &str) -> Option<&str> {
    BEGIN_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect every `#begin` identifier from MGCB text.
///
/// Anything that is not a begin marker is ignored, malformed stanzas included.
pub fn parse_registered<R: BufRead>(reader: R) -> std::io::Result<BTreeSet<String>> {
    let mut registered = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(asset) = begin_marker(&line) {
            registered.insert(asset.to_string());
        }
    }
    Ok(registered)
}

/// Read the registered set from disk. A missing file registers nothing.
pub fn read_registered(path: &Path) -> Result<BTreeSet<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No MGCB file at {}, starting empty", path.display());
            return Ok(BTreeSet::new());
        }
        Err(e) => return Err(MgcbError::io(path, e)),
    };

    let registered = parse_registered(BufReader::new(file)).map_err(|e| MgcbError::io(path, e))?;
    tracing::debug!(
        "Found {} registered assets in {}",
        registered.len(),
        path.display()
    );
    Ok(registered)
}
