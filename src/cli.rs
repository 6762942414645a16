use std::ffi::OsString;

use crate::error::Result;
use crate::flags::{self, FlagSet};

/// Everything the command line configures for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub flags: FlagSet,
    pub paths: Vec<OsString>,
    pub debug: bool,
}

fn app<'a, 'b>() -> clap::App<'a, 'b> {
    clap::App::new("my_ls")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("List directory contents")
        .setting(clap::AppSettings::AllowLeadingHyphen)
        .setting(clap::AppSettings::DisableHelpFlags)
        .setting(clap::AppSettings::DisableVersion)
        .arg(
            clap::Arg::with_name("debug")
                .long("debug")
                .help("Enable debug output (must precede other arguments)"),
        )
        .arg(
            clap::Arg::with_name("ARGS")
                .help("Flags (-a -l -R -r, bundled or not) and paths to list")
                .multiple(true)
                .allow_hyphen_values(true),
        )
}

pub fn parse_flags() -> Result<Options> {
    parse_from(std::env::args_os())
}

/// Parses a full argument vector, program name first.
///
/// clap only recognizes `--debug`; every other token, `--` included, is
/// handed to the flag parser untouched.
pub fn parse_from<I, T>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let matches = app().get_matches_from_safe(args.iter().cloned())?;
    let debug = matches.is_present("debug");

    let mut raw: Vec<OsString> = args.into_iter().skip(1).collect();
    if debug {
        if let Some(pos) = raw.iter().position(|arg| arg == "--debug") {
            raw.remove(pos);
        }
    }

    let flags = flags::parse(&raw)?;
    let paths = raw
        .into_iter()
        .filter(|arg| !flags::is_flag_arg(arg))
        .collect();

    Ok(Options {
        flags,
        paths,
        debug,
    })
}
