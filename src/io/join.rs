//! Concatenate part files back into a single output file.
//!
//! [`join`] discovers parts by name prefix, orders them lexicographically,
//! and streams each in turn into the output through a bounded buffer. Two
//! granularities of progress interleave into one event stream: a coarse
//! event when a part starts (index-based percent) and fine events per
//! buffer written (byte-based percent). Percent is non-decreasing at
//! whole-part granularity; adjacent events may repeat a value.

use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::{FsplitError, Result};
use crate::io::file_io::create_dest_file;
use crate::io::parts::discover_parts;
use crate::io::progress::{percent, CancelFlag, ProgressEvent, ProgressSink};
use crate::io::IO_BUFFER_SIZE;
use crate::util::{is_directory, total_file_size};

/// Description of one join operation. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct JoinJob {
    /// Directory scanned for part files.
    pub parts_dir: PathBuf,
    /// Name prefix used as the sole discovery key; must be non-empty.
    pub prefix: String,
    /// Reassembled output file; created or truncated.
    pub output: PathBuf,
}

/// Joins the parts found under `job.parts_dir` into `job.output`.
///
/// Returns the number of bytes written. When no entry matches the prefix, a
/// single "no files found" event is emitted, no output file is created, and
/// the call returns `Ok(0)`: a normal termination, not a failure. On I/O
/// failure the operation aborts and a partially written output is left on
/// disk.
pub fn join<S: ProgressSink>(job: &JoinJob, cancel: &CancelFlag, sink: &mut S) -> Result<u64> {
    if job.prefix.is_empty() {
        return Err(FsplitError::InvalidArgument(
            "parts prefix must not be empty".into(),
        ));
    }
    if !is_directory(&job.parts_dir) {
        return Err(FsplitError::FileNotFound(job.parts_dir.clone()));
    }

    let parts = discover_parts(&job.parts_dir, &job.prefix)?;
    if parts.is_empty() {
        sink.emit(ProgressEvent::new(
            0,
            format!(
                "no files found with prefix {:?} in {}",
                job.prefix,
                job.parts_dir.display()
            ),
        ));
        return Ok(0);
    }

    // Exact total up front; the fine-grained percentage is byte-based.
    let total = total_file_size(&parts)?;
    let nb_parts = parts.len() as u64;

    if cancel.is_cancelled() {
        return Err(FsplitError::Cancelled);
    }

    let mut out = create_dest_file(&job.output)?;
    let mut buf = vec![0u8; IO_BUFFER_SIZE];
    let mut bytes_written: u64 = 0;

    for (i, part_path) in parts.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(FsplitError::Cancelled);
        }

        sink.emit(ProgressEvent::new(
            percent(i as u64, nb_parts),
            format!("joining {}", part_path.display()),
        ));

        let name = part_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut part = File::open(part_path)?;
        loop {
            let n = part.read(&mut buf)?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])?;
            bytes_written += n as u64;
            sink.emit(ProgressEvent::new(
                percent(bytes_written, total),
                format!("processing {name}"),
            ));
        }
    }

    sink.emit(ProgressEvent::new(
        100,
        format!("joined {} parts into {}", parts.len(), job.output.display()),
    ));
    Ok(bytes_written)
}
