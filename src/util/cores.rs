//! CPU core counting.

/// Returns the number of logical CPU cores, never less than 1.
///
/// Used to size the default worker pool; one core still yields a usable
/// single-worker runner.
pub fn count_cores() -> usize {
    num_cpus::get().max(1)
}
