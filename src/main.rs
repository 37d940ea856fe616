//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::process::exit;

use bwmtf::tools::cli::{log_options, options_init};
use bwmtf::tools::files::run;

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() {
    let options = options_init();

    // Log to stderr; stdout may be carrying data.
    if TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Could not start the logger.");
    }
    log_options(&options);

    //----- Figure how what we need to do and go do it
    if let Err(e) = run(&options) {
        error!("{}", e);
        exit(1);
    }
    info!("Done.");
}
