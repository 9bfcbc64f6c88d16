//! Benchmark runner: times the three kernels on one N×N pass.
//!
//! Any extra argument turns on verbose mode, which dumps every matrix to
//! stdout. Timing lines always go to stderr.

use std::io;
use std::process::ExitCode;

use lanemul::harness::{BenchConfig, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let verbose = std::env::args().nth(1).is_some();
    let config = BenchConfig::default().with_verbose(verbose);
    log::debug!("config: {:?}", config);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match run(&config, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lanemul: {}", e);
            ExitCode::FAILURE
        }
    }
}
