//! No-follow status of a single path.
//!
//! [`stat`] never follows symbolic links: a link is reported as a link, with
//! its own mode, owner and size.

use std::fs;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

const S_IRUSR: u32 = 0o400;
const S_IWUSR: u32 = 0o200;
const S_IXUSR: u32 = 0o100;
const S_IRGRP: u32 = 0o040;
const S_IWGRP: u32 = 0o020;
const S_IXGRP: u32 = 0o010;
const S_IROTH: u32 = 0o004;
const S_IWOTH: u32 = 0o002;
const S_IXOTH: u32 = 0o001;

const PERMISSION_BITS: [(u32, char); 9] = [
    (S_IRUSR, 'r'),
    (S_IWUSR, 'w'),
    (S_IXUSR, 'x'),
    (S_IRGRP, 'r'),
    (S_IWGRP, 'w'),
    (S_IXGRP, 'x'),
    (S_IROTH, 'r'),
    (S_IWOTH, 'w'),
    (S_IXOTH, 'x'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
}

impl EntryType {
    fn from_file_type(ft: fs::FileType) -> EntryType {
        if ft.is_symlink() {
            EntryType::Symlink
        } else if ft.is_dir() {
            EntryType::Directory
        } else if ft.is_char_device() {
            EntryType::CharDevice
        } else if ft.is_block_device() {
            EntryType::BlockDevice
        } else if ft.is_fifo() {
            EntryType::Fifo
        } else if ft.is_socket() {
            EntryType::Socket
        } else {
            EntryType::Regular
        }
    }

    /// Leading character of a long-format line.
    pub fn type_char(self) -> char {
        match self {
            EntryType::Symlink => 'l',
            EntryType::Regular => '-',
            EntryType::Directory => 'd',
            EntryType::CharDevice => 'c',
            EntryType::BlockDevice => 'b',
            EntryType::Fifo => 'f',
            EntryType::Socket => 's',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub entry_type: EntryType,
    /// Lower 12 bits of `st_mode`.
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub modified: SystemTime,
}

impl Metadata {
    pub fn from_fs(meta: &fs::Metadata) -> Metadata {
        Metadata {
            entry_type: EntryType::from_file_type(meta.file_type()),
            mode: meta.mode() & 0o7777,
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            modified: mtime(meta),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.entry_type == EntryType::Symlink
    }

    /// Read, write and execute for owner, group and other.
    pub fn is_fully_open(&self) -> bool {
        self.mode & 0o777 == 0o777
    }

    pub fn is_executable(&self) -> bool {
        self.mode & (S_IXUSR | S_IXGRP | S_IXOTH) != 0
    }

    /// Type character followed by nine `rwx` characters, e.g. `drwxr-xr-x`.
    pub fn permission_string(&self) -> String {
        let mut s = String::with_capacity(10);
        s.push(self.entry_type.type_char());
        for (bit, c) in PERMISSION_BITS.iter() {
            s.push(if self.mode & bit != 0 { *c } else { '-' });
        }
        s
    }
}

// MetadataExt keeps pre-epoch times usable, unlike Metadata::modified.
fn mtime(meta: &fs::Metadata) -> SystemTime {
    let secs = meta.mtime();
    let nanos = meta.mtime_nsec().clamp(0, 999_999_999) as u32;
    if secs >= 0 {
        UNIX_EPOCH + Duration::new(secs as u64, nanos)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs()) + Duration::from_nanos(nanos as u64)
    }
}

pub fn stat<P: AsRef<Path>>(path: P) -> Result<Metadata> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path).map_err(|e| Error::fs("stat", path, e))?;
    Ok(Metadata::from_fs(&meta))
}
