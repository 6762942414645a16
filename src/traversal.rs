//! Walks the path arguments and drives listing, rendering and descent.
//!
//! Every unit of work carries its own path. The process working directory is
//! never changed, and recursion runs off an explicit stack so deep trees do
//! not grow the call stack.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::collector::list_directory;
use crate::debug_eprintln;
use crate::error::{Error, Result};
use crate::flags::FlagSet;
use crate::render::Renderer;
use crate::sort::sort_names;
use crate::utils::starts_with_dot;

/// A directory waiting to be listed.
struct PendingDir {
    path: PathBuf,
    /// Reached by descent rather than named on the command line.
    descended: bool,
}

pub struct Lister<W: Write> {
    flags: FlagSet,
    renderer: Renderer,
    out: W,
}

impl<W: Write> Lister<W> {
    pub fn new(flags: FlagSet, out: W) -> Lister<W> {
        Lister {
            flags,
            renderer: Renderer::for_flags(&flags),
            out,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    /// Lists every argument in order, or `.` when there are none.
    pub fn run(&mut self, paths: &[OsString]) -> Result<()> {
        let default = [OsString::from(".")];
        let paths = if paths.is_empty() { &default[..] } else { paths };

        for arg in paths {
            let path = Path::new(arg);
            debug_eprintln!("argument: {}", path.display());
            let meta = fs::metadata(path).map_err(|e| Error::fs("stat", path, e))?;
            if meta.is_dir() {
                self.list_tree(path)?;
            } else {
                self.render_file(arg)?;
            }
        }

        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn render_file(&mut self, arg: &OsStr) -> Result<()> {
        self.renderer.begin_file(arg.len());
        self.renderer.render_entry(&mut self.out, arg, Path::new(arg))?;
        Ok(())
    }

    fn list_tree(&mut self, root: &Path) -> Result<()> {
        let mut stack = vec![PendingDir {
            path: root.to_path_buf(),
            descended: false,
        }];

        while let Some(dir) = stack.pop() {
            if !self.renderer.is_long() && (dir.descended || self.renderer.is_row_open()) {
                self.out.write_all(b"\n")?;
            }
            let children = self.list_dir(&dir.path)?;
            // reversed so the first child is popped first
            for child in children.into_iter().rev() {
                debug_eprintln!("descending into {}", child.display());
                stack.push(PendingDir {
                    path: child,
                    descended: true,
                });
            }
        }
        Ok(())
    }

    /// Lists one directory and returns the subdirectories to descend into.
    fn list_dir(&mut self, dir: &Path) -> Result<Vec<PathBuf>> {
        if self.flags.recursive {
            self.out.write_all(dir.as_os_str().as_bytes())?;
            self.out.write_all(b":\n")?;
        }

        let mut listing = list_directory(dir)?;
        sort_names(&mut listing.names, self.flags.reverse);
        debug_eprintln!("{}: {} entries", dir.display(), listing.names.len());

        self.renderer.begin_directory(listing.max_len);
        let mut children = Vec::new();
        for name in &listing.names {
            if !self.flags.show_all && starts_with_dot(name) {
                continue;
            }
            let path = dir.join(name);
            let meta = self.renderer.render_entry(&mut self.out, name, &path)?;
            if self.flags.recursive && is_descent_target(name) {
                if let Some(meta) = meta {
                    if meta.is_dir() {
                        children.push(path);
                    }
                }
            }
        }
        Ok(children)
    }
}

fn is_descent_target(name: &OsStr) -> bool {
    name != OsStr::new(".") && name != OsStr::new("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn list(flags: &str, paths: &[&Path]) -> Result<String> {
        let flags = crate::flags::parse([flags])?;
        let mut lister = Lister::new(flags, Vec::new());
        let paths: Vec<OsString> = paths.iter().map(|p| p.as_os_str().to_os_string()).collect();
        lister.run(&paths)?;
        Ok(strip_ansi(&lister.into_inner()))
    }

    fn strip_ansi(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "A.txt", ".hidden"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn test_hides_dotfiles_by_default() {
        let dir = sample_dir();
        let out = list("-", &[dir.path()]).unwrap();
        assert_eq!(words(&out), vec!["A.txt", "b.txt"]);
    }

    #[test]
    fn test_show_all_includes_dotfiles_first() {
        let dir = sample_dir();
        let out = list("-a", &[dir.path()]).unwrap();
        assert_eq!(words(&out), vec![".", "..", ".hidden", "A.txt", "b.txt"]);
    }

    #[test]
    fn test_reverse_mirrors_default_order() {
        let dir = sample_dir();
        let asc = list("-a", &[dir.path()]).unwrap();
        let desc = list("-ar", &[dir.path()]).unwrap();
        let mut expected = words(&asc);
        expected.reverse();
        assert_eq!(words(&desc), expected);
        assert_eq!(list("-arr", &[dir.path()]).unwrap(), desc);
    }

    #[test]
    fn test_short_columns_use_longest_name() {
        let dir = sample_dir();
        let out = list("-", &[dir.path()]).unwrap();
        // longest name is ".hidden" even though it is filtered
        assert_eq!(out, "A.txt    b.txt    \n");
    }

    #[test]
    fn test_recursive_visits_each_directory_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("one/deep")).unwrap();
        fs::create_dir(root.join("two")).unwrap();
        fs::write(root.join("one/deep/leaf.txt"), b"").unwrap();
        let cwd = std::env::current_dir().unwrap();

        let out = list("-R", &[root]).unwrap();
        let headers: Vec<&str> = out.lines().filter(|l| l.ends_with(':')).collect();
        let expected = vec![
            format!("{}:", root.display()),
            format!("{}:", root.join("one").display()),
            format!("{}:", root.join("one/deep").display()),
            format!("{}:", root.join("two").display()),
        ];
        assert_eq!(headers, expected);
        assert!(out.contains("leaf.txt"));
        assert_eq!(std::env::current_dir().unwrap(), cwd);
    }

    #[test]
    fn test_recursive_skips_hidden_dirs_without_all() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), b"").unwrap();

        let out = list("-R", &[dir.path()]).unwrap();
        assert!(!out.contains("HEAD"));

        let out = list("-aR", &[dir.path()]).unwrap();
        assert!(out.contains(&format!("{}:", dir.path().join(".git").display())));
        assert!(out.contains("HEAD"));
    }

    #[test]
    fn test_recursive_does_not_follow_symlinked_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        let out = list("-R", &[dir.path()]).unwrap();
        let headers = out.lines().filter(|l| l.ends_with(':')).count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn test_long_format_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, b"hello").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

        let out = list("-l", &[dir.path()]).unwrap();
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("-rw-r--r--    1 "));
        assert!(lines[0].contains("      5  "));
        assert!(lines[0].trim_end().ends_with("only.txt"));
    }

    #[test]
    fn test_file_argument_is_rendered_directly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"").unwrap();

        let out = list("-", &[file.as_path()]).unwrap();
        assert_eq!(words(&out), vec![file.to_str().unwrap()]);
    }

    #[test]
    fn test_missing_argument_is_stat_error() {
        let dir = tempfile::tempdir().unwrap();
        match list("-", &[dir.path().join("nope").as_path()]) {
            Err(Error::Fs { op, .. }) => assert_eq!(op, "stat"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
