use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Names found in one directory, `.` and `..` included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub names: Vec<OsString>,
    /// Longest name in bytes, counting hidden entries.
    pub max_len: usize,
}

impl Listing {
    fn push(&mut self, name: OsString) {
        self.max_len = self.max_len.max(name.len());
        self.names.push(name);
    }
}

pub fn list_directory<P: AsRef<Path>>(path: P) -> Result<Listing> {
    let path = path.as_ref();
    let entries = fs::read_dir(path).map_err(|e| Error::fs("opendir", path, e))?;

    let mut listing = Listing::default();
    // read_dir skips the pseudo-entries
    listing.push(OsString::from("."));
    listing.push(OsString::from(".."));
    for entry in entries {
        let entry = entry.map_err(|e| Error::fs("readdir", path, e))?;
        listing.push(entry.file_name());
    }
    Ok(listing)
}
