use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// Byte-wise lexicographic order, the same order `strcmp` gives.
pub fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

pub fn sort_names(names: &mut [OsString], reverse: bool) {
    if reverse {
        names.sort_by(|a, b| compare_names(b, a));
    } else {
        names.sort_by(|a, b| compare_names(a, b));
    }
}
