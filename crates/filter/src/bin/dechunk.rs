//! `dechunk`: chunk-framed stdin to raw payload stdout.

use std::io;
use std::process;

use pipechunk::channel::FdChannel;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // stdout carries the payload, so all diagnostics go to stderr
    let subscriber = FmtSubscriber::builder().with_max_level(Level::WARN).with_writer(io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut channel = FdChannel::stdio();
    if let Err(e) = pipechunk::dechunk(&mut channel) {
        error!(cause = %e, "dechunk failed");
        process::exit(1);
    }
}
