//! Split one file into sequentially-numbered fixed-size part files.
//!
//! [`split`] reads the source sequentially and writes parts named
//! `{prefix}{NNNN}.part` with a zero-based, width-4 index assigned in write
//! order. Every part except possibly the last holds exactly
//! `chunk_size` bytes. One progress event is emitted per written part and a
//! terminal event at 100 percent closes the stream.
//!
//! Each part is streamed through a bounded buffer of
//! `min(chunk_size, IO_BUFFER_SIZE)` bytes, so memory use is flat even for
//! multi-gigabyte chunk sizes.

use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::{FsplitError, Result};
use crate::io::file_io::{create_dest_file, ensure_output_dir, open_source_file};
use crate::io::parts::part_file_name;
use crate::io::progress::{percent, CancelFlag, ProgressEvent, ProgressSink};
use crate::io::IO_BUFFER_SIZE;
use crate::util::open_file_size;

/// Description of one split operation. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct SplitJob {
    /// File to be split.
    pub source: PathBuf,
    /// Maximum number of bytes per part; must be at least 1.
    pub chunk_size: u64,
    /// Directory receiving the part files; created if missing.
    pub output_dir: PathBuf,
    /// Name prefix shared by all part files; must be non-empty.
    pub prefix: String,
}

/// Splits `job.source` into part files under `job.output_dir`.
///
/// Returns the number of parts written. An empty source yields zero parts
/// and a single terminal event at 100 percent. On error the operation
/// aborts in place; parts already on disk, including a partially written
/// final part, are left as they are.
///
/// The source and the part being written are the only handles held open;
/// both close on every exit path.
pub fn split<S: ProgressSink>(job: &SplitJob, cancel: &CancelFlag, sink: &mut S) -> Result<u32> {
    if job.chunk_size == 0 {
        return Err(FsplitError::InvalidArgument(
            "chunk size must be at least 1 byte".into(),
        ));
    }
    if job.prefix.is_empty() {
        return Err(FsplitError::InvalidArgument(
            "part prefix must not be empty".into(),
        ));
    }

    let mut src = open_source_file(&job.source)?;
    ensure_output_dir(&job.output_dir)?;

    let total = open_file_size(&src);
    if total == 0 {
        sink.emit(ProgressEvent::new(
            100,
            "splitting complete: empty source, no parts written",
        ));
        return Ok(0);
    }

    let buf_len = job.chunk_size.min(IO_BUFFER_SIZE as u64) as usize;
    let mut buf = vec![0u8; buf_len];

    let mut bytes_processed: u64 = 0;
    let mut index: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(FsplitError::Cancelled);
        }

        let first = src.read(&mut buf)?;
        if first == 0 {
            break;
        }

        let part_path = job.output_dir.join(part_file_name(&job.prefix, index));
        let mut part = create_dest_file(&part_path)?;
        part.write_all(&buf[..first])?;
        let mut part_bytes = first as u64;

        // Fill the part up to chunk_size; a short read ends the part early
        // only at end of source.
        while part_bytes < job.chunk_size {
            let want = (job.chunk_size - part_bytes).min(buf.len() as u64) as usize;
            let n = src.read(&mut buf[..want])?;
            if n == 0 {
                break;
            }
            part.write_all(&buf[..n])?;
            part_bytes += n as u64;
        }

        bytes_processed += part_bytes;
        index += 1;
        sink.emit(ProgressEvent::new(
            percent(bytes_processed, total),
            format!("created {}", part_path.display()),
        ));
    }

    sink.emit(ProgressEvent::new(
        100,
        format!("splitting complete: {index} parts written"),
    ));
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn job(source: &Path, chunk_size: u64, output_dir: &Path) -> SplitJob {
        SplitJob {
            source: source.to_path_buf(),
            chunk_size,
            output_dir: output_dir.to_path_buf(),
            prefix: "part_".into(),
        }
    }

    fn run(job: &SplitJob) -> (Result<u32>, Vec<ProgressEvent>) {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let result = split(job, &CancelFlag::new(), &mut events);
        (result, events)
    }

    #[test]
    fn zero_chunk_size_is_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"data").unwrap();
        let (result, events) = run(&job(&source, 0, dir.path()));
        assert!(matches!(result, Err(FsplitError::InvalidArgument(_))));
        assert!(events.is_empty());
    }

    #[test]
    fn empty_prefix_is_invalid_argument() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"data").unwrap();
        let mut j = job(&source, 4, dir.path());
        j.prefix = String::new();
        let (result, _) = run(&j);
        assert!(matches!(result, Err(FsplitError::InvalidArgument(_))));
    }

    #[test]
    fn missing_source_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("absent.bin");
        let (result, _) = run(&job(&source, 4, dir.path()));
        assert!(matches!(result, Err(FsplitError::FileNotFound(_))));
    }

    #[test]
    fn empty_source_writes_no_parts_and_emits_one_terminal_event() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("empty.bin");
        fs::write(&source, b"").unwrap();
        let out = dir.path().join("parts");
        let (result, events) = run(&job(&source, 4, &out));
        assert_eq!(result.unwrap(), 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].percent, 100);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn splits_with_short_last_part() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"0123456789").unwrap();
        let out = dir.path().join("parts");
        let (result, events) = run(&job(&source, 4, &out));
        assert_eq!(result.unwrap(), 3);

        assert_eq!(fs::read(out.join("part_0000.part")).unwrap(), b"0123");
        assert_eq!(fs::read(out.join("part_0001.part")).unwrap(), b"4567");
        assert_eq!(fs::read(out.join("part_0002.part")).unwrap(), b"89");

        let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
        assert_eq!(percents, [40, 80, 100, 100]);
        assert!(events[0].message.contains("part_0000.part"));
    }

    #[test]
    fn exact_multiple_has_no_short_part() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"01234567").unwrap();
        let out = dir.path().join("parts");
        let (result, _) = run(&job(&source, 4, &out));
        assert_eq!(result.unwrap(), 2);
        assert_eq!(fs::metadata(out.join("part_0000.part")).unwrap().len(), 4);
        assert_eq!(fs::metadata(out.join("part_0001.part")).unwrap().len(), 4);
        assert!(!out.join("part_0002.part").exists());
    }

    #[test]
    fn chunk_larger_than_source_yields_one_part() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"abc").unwrap();
        let out = dir.path().join("parts");
        let (result, events) = run(&job(&source, 1024, &out));
        assert_eq!(result.unwrap(), 1);
        assert_eq!(fs::read(out.join("part_0000.part")).unwrap(), b"abc");
        let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
        assert_eq!(percents, [100, 100]);
    }

    #[test]
    fn creates_missing_output_dir_ancestors() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"abcdef").unwrap();
        let out = dir.path().join("deep").join("nested").join("parts");
        let (result, _) = run(&job(&source, 2, &out));
        assert_eq!(result.unwrap(), 3);
        assert!(out.join("part_0002.part").exists());
    }

    #[test]
    fn pre_cancelled_flag_writes_no_parts() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"0123456789").unwrap();
        let out = dir.path().join("parts");
        let flag = CancelFlag::new();
        flag.cancel();
        let mut events: Vec<ProgressEvent> = Vec::new();
        let result = split(&job(&source, 4, &out), &flag, &mut events);
        assert!(matches!(result, Err(FsplitError::Cancelled)));
        assert!(events.is_empty());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn rerun_overwrites_previous_parts_identically() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.bin");
        fs::write(&source, b"deterministic contents").unwrap();
        let out = dir.path().join("parts");
        run(&job(&source, 5, &out)).0.unwrap();
        let first = fs::read(out.join("part_0000.part")).unwrap();
        run(&job(&source, 5, &out)).0.unwrap();
        let second = fs::read(out.join("part_0000.part")).unwrap();
        assert_eq!(first, second);
    }
}
