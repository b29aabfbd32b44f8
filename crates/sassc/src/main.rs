use std::ffi::OsString;
use std::process::ExitCode;

use sassc_engine::GrassEngine;
use tracing_subscriber::prelude::*;

// Stdout carries the command's result, so logs go to stderr.
fn init_tracing() {
    let filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<OsString> = std::env::args_os().collect();
    let mut stdout = std::io::stdout().lock();

    let status = sassc::settle(sassc::run(&argv, &GrassEngine, &mut stdout));
    sassc::exit_code(status)
}
