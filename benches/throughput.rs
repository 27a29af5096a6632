//! Criterion benchmarks for split and join throughput.
//!
//! Run with:
//!   cargo bench --bench throughput

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use tempfile::TempDir;

use fsplit::{join, split, CancelFlag, JoinJob, ProgressEvent, SplitJob};

const SOURCE_LEN: usize = 4 << 20;
const CHUNK: u64 = 256 << 10;

fn bench_split_join(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.bin");
    let data: Vec<u8> = (0..SOURCE_LEN).map(|i| (i % 251) as u8).collect();
    std::fs::write(&source, &data).unwrap();

    let mut group = c.benchmark_group("split_join");
    group.throughput(Throughput::Bytes(SOURCE_LEN as u64));
    group.sample_size(20);

    group.bench_function("split_4mib_into_256kib_parts", |b| {
        b.iter(|| {
            let parts_dir = TempDir::new().unwrap();
            let job = SplitJob {
                source: source.clone(),
                chunk_size: CHUNK,
                output_dir: parts_dir.path().to_path_buf(),
                prefix: "part_".into(),
            };
            let mut sink: Vec<ProgressEvent> = Vec::new();
            split(&job, &CancelFlag::new(), &mut sink).unwrap()
        })
    });

    // Pre-split once; every iteration joins the same part set.
    let parts_dir = dir.path().join("parts");
    let mut sink: Vec<ProgressEvent> = Vec::new();
    split(
        &SplitJob {
            source: source.clone(),
            chunk_size: CHUNK,
            output_dir: parts_dir.clone(),
            prefix: "part_".into(),
        },
        &CancelFlag::new(),
        &mut sink,
    )
    .unwrap();

    group.bench_function("join_16_parts_of_256kib", |b| {
        b.iter(|| {
            let out_dir = TempDir::new().unwrap();
            let job = JoinJob {
                parts_dir: parts_dir.clone(),
                prefix: "part_".into(),
                output: out_dir.path().join("joined.bin"),
            };
            let mut sink: Vec<ProgressEvent> = Vec::new();
            join(&job, &CancelFlag::new(), &mut sink).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_split_join);
criterion_main!(benches);
