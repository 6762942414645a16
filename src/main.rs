extern crate my_ls;

use std::io::{self, BufWriter, Write};

use my_ls::error::Error;

fn main() {
    let options = match my_ls::cli::parse_flags() {
        Ok(options) => options,
        Err(err) => exit_with(err),
    };

    my_ls::utils::initialize_debug(options.debug);
    my_ls::debug_eprintln!("flags: {:?}", options.flags);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = my_ls::run(&options, &mut out);
    let flushed = out.flush();
    drop(out);
    let result = result.and_then(|()| flushed.map_err(Error::from));

    if let Err(err) = result {
        exit_with(err);
    }
}

fn exit_with(err: Error) -> ! {
    match err {
        Error::InvalidOption(_) => println!("{}", err),
        _ => eprintln!("{}", err),
    }
    std::process::exit(err.exit_code());
}
