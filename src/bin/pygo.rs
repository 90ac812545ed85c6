extern crate pygo;

use std::process;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config};
use pygo::driver::options::PygoOptions;
use pygo::driver::statistics::Statistics;
use pygo::driver::translate;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

pub fn main() {
    let opt = PygoOptions::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(opt.log_filter()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut statistics = Statistics::default();
    match translate::run(&opt, &mut statistics) {
        Ok(()) => exit(&opt, 0, &statistics),
        Err(e) => {
            let diag = e.to_diagnostic();
            let files: SimpleFiles<String, String> = SimpleFiles::new();
            let writer = StandardStream::stderr(ColorChoice::Auto);
            if term::emit(&mut writer.lock(), &Config::default(), &files, &diag).is_err() {
                eprintln!("{}", e);
            }
            exit(&opt, 1, &statistics)
        }
    }
}

/// Optionally dump stats to stderr then exit
pub fn exit(opts: &PygoOptions, code: i32, stats: &Statistics) {
    if opts.statistics {
        eprintln!();
        eprintln!("~~~~~~~~~~");
        eprintln!("STATISTICS");
        eprintln!("~~~~~~~~~~");
        eprintln!();
        eprintln!("{stats}");
    }
    process::exit(code)
}
