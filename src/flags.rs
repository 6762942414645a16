//! Single-character listing flags.
//!
//! Every argument starting with `-` contributes all of its characters after
//! the dash. Flags are a set: bundling, splitting across arguments and
//! repeating them all yield the same [`FlagSet`].

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSet {
    /// `-a`: include dotfiles.
    pub show_all: bool,
    /// `-l`: one attribute line per entry.
    pub long_format: bool,
    /// `-R`: descend into subdirectories.
    pub recursive: bool,
    /// `-r`: descending sort order.
    pub reverse: bool,
}

impl FlagSet {
    fn set(&mut self, c: char) -> Result<()> {
        match c {
            'a' => self.show_all = true,
            'l' => self.long_format = true,
            'R' => self.recursive = true,
            'r' => self.reverse = true,
            other => return Err(Error::InvalidOption(other)),
        }
        Ok(())
    }
}

pub fn is_flag_arg(arg: &OsStr) -> bool {
    arg.as_bytes().first() == Some(&b'-')
}

/// Collects the flag characters of every `-` argument and validates them in
/// order. The first unknown character is reported.
pub fn parse<I, S>(args: I) -> Result<FlagSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut collected = String::new();
    for arg in args {
        let arg = arg.as_ref();
        if is_flag_arg(arg) {
            collected.push_str(&arg.to_string_lossy()[1..]);
        }
    }

    let mut flags = FlagSet::default();
    for c in collected.chars() {
        flags.set(c)?;
    }
    Ok(flags)
}
