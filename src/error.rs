use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A flag character outside of `a`, `l`, `R`, `r`.
    InvalidOption(char),
    /// A failed filesystem primitive. `op` names the call (`stat`, `opendir`, `readdir`).
    Fs {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    IoError(std::io::Error),
    CliInputError(String),
}

impl Error {
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Error {
        Error::Fs {
            op,
            path: path.into(),
            source,
        }
    }

    /// Exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidOption(_) => 0,
            Error::Fs { .. } | Error::IoError(_) | Error::CliInputError(_) => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOption(c) => write!(f, "my_ls:invalid option -{}", c),
            Error::Fs { op, path, source } => {
                write!(f, "my_ls: {} {}: {}", op, path.display(), source)
            }
            Error::IoError(err) => write!(f, "my_ls: write error: {}", err),
            Error::CliInputError(msg) => write!(f, "CLI input error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fs { source, .. } => Some(source),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}

impl std::convert::From<clap::Error> for Error {
    fn from(error: clap::Error) -> Error {
        Error::CliInputError(error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_option_message() {
        let err = Error::InvalidOption('x');
        assert_eq!(err.to_string(), "my_ls:invalid option -x");
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_fs_error_names_the_call() {
        let err = Error::fs(
            "opendir",
            "/nope",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("my_ls: opendir /nope: "));
        assert!(msg.contains("No such file or directory"));
        assert_eq!(err.exit_code(), 1);
        assert!(std::error::Error::source(&err).is_some());
    }
}
