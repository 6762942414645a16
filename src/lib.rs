extern crate chrono;
extern crate clap;
extern crate users;

pub mod cli;
pub mod collector;
pub mod date;
pub mod error;
pub mod flags;
pub mod metadata;
pub mod render;
pub mod sort;
pub mod traversal;
pub mod utils;

use std::io::Write;

use crate::cli::Options;
use crate::error::Result;
use crate::traversal::Lister;

/// Runs one listing invocation, writing everything to `out`.
pub fn run<W: Write>(options: &Options, out: W) -> Result<()> {
    let mut lister = Lister::new(options.flags, out);
    lister.run(&options.paths)
}
