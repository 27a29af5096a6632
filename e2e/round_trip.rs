// Engine-level end-to-end properties: byte-exact round trip, part-count and
// part-size arithmetic, name ordering, and the progress contract.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use fsplit::io::parts::part_file_name;
use fsplit::{join, split, CancelFlag, FsplitError, JoinJob, ProgressEvent, SplitJob};

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn split_job(source: &Path, chunk_size: u64, output_dir: &Path) -> SplitJob {
    SplitJob {
        source: source.to_path_buf(),
        chunk_size,
        output_dir: output_dir.to_path_buf(),
        prefix: "part_".into(),
    }
}

fn join_job(parts_dir: &Path, output: &Path) -> JoinJob {
    JoinJob {
        parts_dir: parts_dir.to_path_buf(),
        prefix: "part_".into(),
        output: output.to_path_buf(),
    }
}

// ── Round trip ────────────────────────────────────────────────────────────────

#[test]
fn round_trip_is_byte_exact_across_chunk_sizes() {
    let data = patterned(1000);
    for &chunk in &[1u64, 3, 7, 100, 250, 999, 1000, 2048] {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("input.bin");
        fs::write(&source, &data).unwrap();
        let parts_dir = dir.path().join("parts");

        let mut events: Vec<ProgressEvent> = Vec::new();
        let parts = split(
            &split_job(&source, chunk, &parts_dir),
            &CancelFlag::new(),
            &mut events,
        )
        .unwrap();
        assert_eq!(
            u64::from(parts),
            (data.len() as u64).div_ceil(chunk),
            "chunk={chunk}"
        );

        let output = dir.path().join("rejoined.bin");
        let mut events: Vec<ProgressEvent> = Vec::new();
        let bytes = join(&join_job(&parts_dir, &output), &CancelFlag::new(), &mut events).unwrap();
        assert_eq!(bytes, data.len() as u64, "chunk={chunk}");
        assert_eq!(fs::read(&output).unwrap(), data, "chunk={chunk}");
    }
}

#[test]
fn round_trip_survives_a_one_mib_plus_buffer_boundary() {
    // Larger than the internal copy buffer so multi-read parts get exercised.
    let data = patterned((1 << 20) + 12_345);
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, &data).unwrap();
    let parts_dir = dir.path().join("parts");

    let chunk = (1 << 20) + 1000;
    let mut events: Vec<ProgressEvent> = Vec::new();
    let parts = split(
        &split_job(&source, chunk, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    assert_eq!(parts, 2);

    let output = dir.path().join("rejoined.bin");
    let mut events: Vec<ProgressEvent> = Vec::new();
    join(&join_job(&parts_dir, &output), &CancelFlag::new(), &mut events).unwrap();
    assert_eq!(fs::read(&output).unwrap(), data);
}

// ── Part arithmetic ───────────────────────────────────────────────────────────

#[test]
fn every_part_is_chunk_sized_except_a_short_last() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(1000)).unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    split(
        &split_job(&source, 300, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();

    let sizes: Vec<u64> = (0..4)
        .map(|i| {
            fs::metadata(parts_dir.join(part_file_name("part_", i)))
                .unwrap()
                .len()
        })
        .collect();
    assert_eq!(sizes, [300, 300, 300, 100]);
}

#[test]
fn exact_multiple_means_all_parts_are_full() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(900)).unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    let parts = split(
        &split_job(&source, 300, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    assert_eq!(parts, 3);
    for i in 0..3 {
        let len = fs::metadata(parts_dir.join(part_file_name("part_", i)))
            .unwrap()
            .len();
        assert_eq!(len, 300);
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[test]
fn part_names_written_in_order_sort_back_into_that_order() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(1200)).unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    let parts = split(
        &split_job(&source, 10, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    assert_eq!(parts, 120);

    let mut names: Vec<String> = fs::read_dir(&parts_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let expected: Vec<String> = (0..120).map(|i| part_file_name("part_", i)).collect();
    assert_eq!(names, expected);
}

// ── Degenerate inputs ─────────────────────────────────────────────────────────

#[test]
fn empty_source_round_trip_is_a_pair_of_noops() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("empty.bin");
    fs::write(&source, b"").unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    let parts = split(
        &split_job(&source, 64, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    assert_eq!(parts, 0);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].percent, 100);

    // With no parts on disk, the join is the documented no-op.
    let output = dir.path().join("rejoined.bin");
    let mut events: Vec<ProgressEvent> = Vec::new();
    let bytes = join(&join_job(&parts_dir, &output), &CancelFlag::new(), &mut events).unwrap();
    assert_eq!(bytes, 0);
    assert_eq!(events.len(), 1);
    assert!(events[0].message.contains("no files found"));
    assert!(!output.exists());
}

#[test]
fn single_byte_file_with_one_byte_chunks() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("one.bin");
    fs::write(&source, b"Z").unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    let parts = split(
        &split_job(&source, 1, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    assert_eq!(parts, 1);

    let output = dir.path().join("rejoined.bin");
    let mut events: Vec<ProgressEvent> = Vec::new();
    join(&join_job(&parts_dir, &output), &CancelFlag::new(), &mut events).unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"Z");
}

// ── Progress contract ─────────────────────────────────────────────────────────

#[test]
fn split_progress_is_non_decreasing_and_ends_at_100() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(1000)).unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    split(
        &split_job(&source, 64, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();
    let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
    assert_eq!(*percents.last().unwrap(), 100);
}

#[test]
fn join_progress_is_non_decreasing_at_part_granularity() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(1000)).unwrap();
    let parts_dir = dir.path().join("parts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    split(
        &split_job(&source, 300, &parts_dir),
        &CancelFlag::new(),
        &mut events,
    )
    .unwrap();

    let output = dir.path().join("rejoined.bin");
    let mut events: Vec<ProgressEvent> = Vec::new();
    join(&join_job(&parts_dir, &output), &CancelFlag::new(), &mut events).unwrap();

    // Coarse per-part events ("joining ...") must be non-decreasing even
    // when the final short part makes the interleaved byte percentages dip.
    let coarse: Vec<u8> = events
        .iter()
        .filter(|e| e.message.starts_with("joining"))
        .map(|e| e.percent)
        .collect();
    assert!(coarse.windows(2).all(|w| w[0] <= w[1]), "{coarse:?}");
    assert_eq!(events.last().unwrap().percent, 100);
}

/// Sink that flips a [`CancelFlag`] once it has seen `after` events.
struct CancelAfter {
    flag: CancelFlag,
    after: usize,
    events: Vec<ProgressEvent>,
}

impl fsplit::ProgressSink for CancelAfter {
    fn emit(&mut self, event: ProgressEvent) {
        self.events.push(event);
        if self.events.len() == self.after {
            self.flag.cancel();
        }
    }
}

#[test]
fn cancellation_between_parts_keeps_finished_parts_on_disk() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("input.bin");
    fs::write(&source, patterned(100)).unwrap();
    let parts_dir = dir.path().join("parts");

    let flag = CancelFlag::new();
    let mut sink = CancelAfter {
        flag: flag.clone(),
        after: 2,
        events: Vec::new(),
    };
    let result = split(&split_job(&source, 10, &parts_dir), &flag, &mut sink);
    assert!(matches!(result, Err(FsplitError::Cancelled)));

    // The flag flipped after the second part event, so exactly two parts
    // made it to disk before the next boundary check aborted the run.
    assert_eq!(sink.events.len(), 2);
    assert_eq!(fs::read_dir(&parts_dir).unwrap().count(), 2);
    assert!(parts_dir.join(part_file_name("part_", 0)).exists());
    assert!(parts_dir.join(part_file_name("part_", 1)).exists());
}
