//! The byte channel a filter runs over
//!
//! [`Channel`] is the complete set of I/O capabilities the drivers need:
//! single-byte reads for framing, short-write-safe writes for emitted
//! framing, a bulk source-to-sink transfer for chunk bodies, and (for the
//! encoder) a readiness wait plus a non-blocking availability query.
//!
//! [`FdChannel`] is the production implementation over two raw descriptors.
//! Its `transfer` uses `splice(2)`, which moves bytes between the
//! descriptors inside the kernel without passing through process memory;
//! descriptor pairs splice cannot serve (neither side a pipe) are detected
//! on the first EINVAL and permanently downgraded to a scratch-buffer
//! read-then-write copy with identical bytes on the wire.

use std::cmp;
use std::io;
use std::os::fd::{AsRawFd, RawFd};

/// I/O capabilities required by the filter drivers.
///
/// Implementations must uphold two contracts the drivers depend on:
/// [`transfer`](Channel::transfer) returns `Ok(0)` only at source end of
/// input, and [`available`](Channel::available) never blocks.
pub trait Channel {
    /// Reads exactly one byte; `None` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes the whole buffer to the sink, looping over short writes.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Moves up to `len` bytes from source to sink, returning the count
    /// actually moved. May move fewer bytes than requested; `Ok(0)` means
    /// the source reached end of input.
    fn transfer(&mut self, len: usize) -> io::Result<usize>;

    /// Blocks until at least one byte is ready to read from the source.
    fn wait_readable(&mut self) -> io::Result<()>;

    /// Returns how many bytes can be read from the source right now
    /// without blocking. Must not block.
    fn available(&mut self) -> io::Result<usize>;
}

/// Scratch size for the copy fallback.
const SCRATCH_LEN: usize = 64 * 1024;

/// A [`Channel`] over two raw file descriptors.
#[derive(Debug)]
pub struct FdChannel {
    src: RawFd,
    dst: RawFd,
    mode: TransferMode,
}

#[derive(Debug)]
enum TransferMode {
    Splice,
    Copy { scratch: Vec<u8> },
}

impl FdChannel {
    /// Wraps an already-connected source/sink descriptor pair.
    ///
    /// The descriptors stay owned by the caller and must outlive the
    /// channel.
    pub fn new(src: RawFd, dst: RawFd) -> Self {
        Self { src, dst, mode: TransferMode::Splice }
    }

    /// The channel every filter binary runs over: stdin to stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().as_raw_fd(), io::stdout().as_raw_fd())
    }
}

impl Channel for FdChannel {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match read_fd(self.src, &mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        write_all_fd(self.dst, buf)
    }

    fn transfer(&mut self, len: usize) -> io::Result<usize> {
        loop {
            if let TransferMode::Copy { scratch } = &mut self.mode {
                let want = cmp::min(len, scratch.len());
                let got = read_fd(self.src, &mut scratch[..want])?;
                if got == 0 {
                    return Ok(0);
                }
                write_all_fd(self.dst, &scratch[..got])?;
                return Ok(got);
            }

            // SAFETY: both descriptors are live for the lifetime of the
            // channel; null offsets use the descriptors' own positions;
            // len bounds the move.
            let rc =
                unsafe { libc::splice(self.src, std::ptr::null_mut(), self.dst, std::ptr::null_mut(), len, 0) };
            if rc >= 0 {
                return Ok(rc as usize);
            }
            let err = io::Error::last_os_error();
            match err.raw_os_error() {
                Some(libc::EINTR) => {}
                // neither descriptor is a pipe; splice will never work on
                // this pair, so copy from here on
                Some(libc::EINVAL) => self.mode = TransferMode::Copy { scratch: vec![0; SCRATCH_LEN] },
                _ => return Err(err),
            }
        }
    }

    fn wait_readable(&mut self) -> io::Result<()> {
        let mut pollfd = libc::pollfd { fd: self.src, events: libc::POLLIN, revents: 0 };
        loop {
            // SAFETY: polls a single valid pollfd with an infinite timeout.
            let rc = unsafe { libc::poll(&mut pollfd, 1, -1) };
            if rc >= 0 {
                // POLLHUP or POLLERR also mean a read will not block; the
                // availability query then reports 0 and the driver treats
                // that as end of input
                return Ok(());
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }

    fn available(&mut self) -> io::Result<usize> {
        let mut count: libc::c_int = 0;
        // SAFETY: FIONREAD writes the queued byte count into a valid c_int.
        let rc = unsafe { libc::ioctl(self.src, libc::FIONREAD, &raw mut count) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(count.max(0) as usize)
    }
}

/// One `read(2)`, retried on EINTR. Returns the byte count; 0 is EOF.
fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        // SAFETY: reads at most buf.len() bytes into a live buffer.
        let rc = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        if rc >= 0 {
            return Ok(rc as usize);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// `write(2)` until the whole buffer is gone, retried on EINTR.
fn write_all_fd(fd: RawFd, buf: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < buf.len() {
        let rest = &buf[written..];
        // SAFETY: writes from a live slice bounded by its own length.
        let rc = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
        if rc >= 0 {
            written += rc as usize;
            continue;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
    Ok(())
}
