// fsplit — file splitter/joiner library behind the `fsplit` CLI.

pub mod cli;
pub mod error;
pub mod io;
pub mod runner;
pub mod util;

/// Crate version as compiled into the binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use cli::size::parse_size;
pub use error::{FsplitError, Result};
pub use io::join::{join, JoinJob};
pub use io::progress::{CancelFlag, ProgressEvent, ProgressSink};
pub use io::split::{split, SplitJob};
pub use runner::{JobHandle, JobOutcome, JobRunner};
