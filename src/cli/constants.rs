//! CLI identity constants and display-level infrastructure.

use std::sync::atomic::{AtomicU32, Ordering};

/// Program name used in diagnostics.
pub const PROGRAM_NAME: &str = "fsplit";

/// Join output file name used when `--output` is not given; placed inside
/// the parts directory.
pub const DEFAULT_JOIN_OUTPUT: &str = "joined_file";

// ── Display level ────────────────────────────────────────────────────────────
//
// 0 = silent; 1 = errors only; 2 = progress bar and summary (default);
// 3 = per-event messages; 4 = debug.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
