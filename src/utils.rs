use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::sync::atomic::{AtomicBool, Ordering};

static IS_DEBUG: AtomicBool = AtomicBool::new(false);

pub fn initialize_debug(is_debug: bool) {
    IS_DEBUG.store(is_debug, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    IS_DEBUG.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! debug_eprintln {
    ($($arg:tt)*) => {
        if $crate::utils::is_debug_enabled() {
            eprintln!($($arg)*);
        }
    };
}

/// Writes `name` left-justified in a field of `width` bytes.
pub fn write_padded<W: Write>(out: &mut W, name: &OsStr, width: usize) -> io::Result<()> {
    let bytes = name.as_bytes();
    out.write_all(bytes)?;
    for _ in bytes.len()..width {
        out.write_all(b" ")?;
    }
    Ok(())
}

pub fn starts_with_dot(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_padded_pads_by_bytes() {
        let mut out = Vec::new();
        write_padded(&mut out, OsStr::new("ab"), 5).unwrap();
        assert_eq!(out, b"ab   ");
    }

    #[test]
    fn test_write_padded_never_truncates() {
        let mut out = Vec::new();
        write_padded(&mut out, OsStr::new("abcdef"), 3).unwrap();
        assert_eq!(out, b"abcdef");
    }

    #[test]
    fn test_starts_with_dot() {
        assert!(starts_with_dot(OsStr::new(".hidden")));
        assert!(starts_with_dot(OsStr::new("..")));
        assert!(!starts_with_dot(OsStr::new("visible")));
        assert!(!starts_with_dot(OsStr::new("")));
    }
}
