//! Short (column) and long (attribute line) rendering of entries.
//!
//! Both modes print names with the same type-based coloring. Short mode packs
//! names into rows of at most [`MAX_ROW_LEN`] columns; long mode prints one
//! line per entry with type, permissions, link count, owner, group, size and
//! modification time.

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;

use users::{Groups, Users, UsersCache};

use crate::date::Timestamp;
use crate::debug_eprintln;
use crate::error::Result;
use crate::flags::FlagSet;
use crate::metadata::{self, Metadata};
use crate::utils::write_padded;

pub const MAX_ROW_LEN: usize = 80;
pub const GUTTER: usize = 2;

const RESET: &str = "\x1b[0m";

/// Fixed palette, picked by entry type in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Symlink,
    OpenDirectory,
    Directory,
    Executable,
    Plain,
}

impl Color {
    pub fn for_metadata(meta: &Metadata) -> Color {
        if meta.is_symlink() {
            Color::Symlink
        } else if meta.is_dir() && meta.is_fully_open() {
            Color::OpenDirectory
        } else if meta.is_dir() {
            Color::Directory
        } else if meta.is_executable() {
            Color::Executable
        } else {
            Color::Plain
        }
    }

    fn escape(self) -> Option<&'static str> {
        match self {
            Color::Symlink => Some("\x1b[1;36m"),
            Color::OpenDirectory => Some("\x1b[1;34;42m"),
            Color::Directory => Some("\x1b[1;34m"),
            Color::Executable => Some("\x1b[1;32m"),
            Color::Plain => None,
        }
    }
}

/// Writes `name` padded to `width` plus the gutter, wrapped in its color.
pub fn write_name<W: Write>(out: &mut W, name: &OsStr, width: usize, meta: &Metadata) -> Result<()> {
    let escape = Color::for_metadata(meta).escape();
    if let Some(code) = escape {
        out.write_all(code.as_bytes())?;
    }
    write_padded(out, name, width + GUTTER)?;
    if escape.is_some() {
        out.write_all(RESET.as_bytes())?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    remaining: usize,
    max_width: usize,
    row_open: bool,
}

impl ColumnLayout {
    pub(crate) fn new() -> ColumnLayout {
        ColumnLayout {
            remaining: MAX_ROW_LEN,
            max_width: 0,
            row_open: false,
        }
    }

    /// Starts a fresh row budget for a directory whose longest name is `max_width`.
    pub fn begin(&mut self, max_width: usize) {
        self.remaining = MAX_ROW_LEN;
        self.max_width = max_width;
        self.row_open = false;
    }

    /// Changes the cell width without touching the current row.
    pub fn set_width(&mut self, max_width: usize) {
        self.max_width = max_width;
    }

    pub fn is_row_open(&self) -> bool {
        self.row_open
    }

    #[cfg(test)]
    fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn write_entry<W: Write>(&mut self, out: &mut W, name: &OsStr, meta: &Metadata) -> Result<()> {
        let cell = self.max_width + GUTTER;
        if self.row_open && self.remaining < cell {
            out.write_all(b"\n")?;
            self.remaining = MAX_ROW_LEN;
        }
        write_name(out, name, self.max_width, meta)?;
        self.remaining = self.remaining.saturating_sub(cell);
        self.row_open = true;
        Ok(())
    }
}

pub struct LongFormat {
    users: UsersCache,
    name_width: usize,
}

impl LongFormat {
    pub(crate) fn new() -> LongFormat {
        LongFormat {
            users: UsersCache::new(),
            name_width: 0,
        }
    }

    pub fn set_width(&mut self, name_width: usize) {
        self.name_width = name_width;
    }

    fn owner_name(&self, uid: u32) -> OsString {
        match self.users.get_user_by_uid(uid) {
            Some(user) => user.name().to_os_string(),
            None => OsString::from(uid.to_string()),
        }
    }

    fn group_name(&self, gid: u32) -> OsString {
        match self.users.get_group_by_gid(gid) {
            Some(group) => group.name().to_os_string(),
            None => OsString::from(gid.to_string()),
        }
    }

    pub fn write_entry<W: Write>(&self, out: &mut W, name: &OsStr, meta: &Metadata) -> Result<()> {
        write!(out, "{} {:>4} ", meta.permission_string(), meta.nlink)?;
        write_padded(out, &self.owner_name(meta.uid), 8)?;
        out.write_all(b" ")?;
        write_padded(out, &self.group_name(meta.gid), 8)?;
        write!(out, " {:>6}  {} ", meta.size, Timestamp::new(meta.modified))?;
        write_name(out, name, self.name_width, meta)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Rendering strategy, chosen once from `-l`.
pub enum Renderer {
    Short(ColumnLayout),
    Long(LongFormat),
}

impl Renderer {
    pub fn for_flags(flags: &FlagSet) -> Renderer {
        if flags.long_format {
            Renderer::Long(LongFormat::new())
        } else {
            Renderer::Short(ColumnLayout::new())
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Renderer::Long(_))
    }

    /// Whether short output has an unterminated row.
    pub fn is_row_open(&self) -> bool {
        match self {
            Renderer::Short(layout) => layout.is_row_open(),
            Renderer::Long(_) => false,
        }
    }

    /// Prepares for one directory listing.
    pub fn begin_directory(&mut self, max_width: usize) {
        match self {
            Renderer::Short(layout) => layout.begin(max_width),
            Renderer::Long(long) => long.set_width(max_width),
        }
    }

    /// Prepares for a single non-directory argument, sharing the current row.
    pub fn begin_file(&mut self, width: usize) {
        match self {
            Renderer::Short(layout) => layout.set_width(width),
            Renderer::Long(long) => long.set_width(width),
        }
    }

    /// Stats `path` and renders it under `name`.
    ///
    /// In short mode an entry that can no longer be stat'ed is skipped and
    /// `None` is returned. In long mode the stat failure is returned.
    pub fn render_entry<W: Write>(
        &mut self,
        out: &mut W,
        name: &OsStr,
        path: &Path,
    ) -> Result<Option<Metadata>> {
        match self {
            Renderer::Short(layout) => match metadata::stat(path) {
                Ok(meta) => {
                    layout.write_entry(out, name, &meta)?;
                    Ok(Some(meta))
                }
                Err(err) => {
                    debug_eprintln!("skipping vanished entry: {}", err);
                    Ok(None)
                }
            },
            Renderer::Long(long) => {
                let meta = metadata::stat(path)?;
                long.write_entry(out, name, &meta)?;
                Ok(Some(meta))
            }
        }
    }
}
