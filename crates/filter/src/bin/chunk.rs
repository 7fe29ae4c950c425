//! `chunk`: raw stdin to chunk-framed stdout.

use std::io;
use std::process;

use pipechunk::channel::FdChannel;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // stdout carries the framed stream, so all diagnostics go to stderr
    let subscriber = FmtSubscriber::builder().with_max_level(Level::WARN).with_writer(io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut channel = FdChannel::stdio();
    if let Err(e) = pipechunk::chunk(&mut channel) {
        error!(cause = %e, "chunk failed");
        process::exit(1);
    }
}
