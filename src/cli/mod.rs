//! Command-line front end: argument definitions, size parsing, and the
//! display-level infrastructure.

pub mod args;
pub mod constants;
pub mod size;

pub use size::parse_size;
