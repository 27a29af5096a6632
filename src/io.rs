//! Public API surface for the split/join file operations.
//!
//! This module assembles the I/O sub-modules and re-exports the symbols
//! consumed by the CLI and by library users.

pub mod file_io;
pub mod join;
pub mod parts;
pub mod progress;
pub mod split;

// ── Size constants ───────────────────────────────────────────────────────────
pub const KB: u64 = 1 << 10;
pub const MB: u64 = 1 << 20;
pub const GB: u64 = 1 << 30;

/// Streaming copy buffer size. Bounds memory use independently of part and
/// chunk sizes.
pub const IO_BUFFER_SIZE: usize = 1 << 20;

// ── Core operations ──────────────────────────────────────────────────────────
pub use join::{join, JoinJob};
pub use split::{split, SplitJob};

// ── Progress / control surface ───────────────────────────────────────────────
pub use progress::{percent, CancelFlag, ProgressEvent, ProgressSink};

// ── Part naming and discovery ────────────────────────────────────────────────
pub use parts::{discover_parts, part_file_name, DEFAULT_PREFIX, PART_SUFFIX};
