//! Command-line argument definitions for the `fsplit` binary.
//!
//! Parsing is delegated to clap's derive API; post-parse defaulting (the
//! output directory and the join output path) happens in `main`, where the
//! source path is in scope.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::io::parts::DEFAULT_PREFIX;

#[derive(Parser, Debug)]
#[command(
    name = "fsplit",
    version,
    about = "Split a file into numbered parts and join them back together",
    long_about = None
)]
pub struct Cli {
    /// Errors only; suppresses the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print every progress event; repeat for debug output
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a file into fixed-size parts
    Split {
        /// File to split
        source: PathBuf,

        /// Maximum part size, e.g. "10MB", "512K", or a plain byte count
        #[arg(short = 's', long = "chunk-size")]
        chunk_size: String,

        /// Directory for the part files [default: the source's directory]
        #[arg(short = 'd', long = "out-dir")]
        out_dir: Option<PathBuf>,

        /// File-name prefix for the parts
        #[arg(short, long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },

    /// Concatenate part files back into one file
    Join {
        /// Directory containing the part files
        parts_dir: PathBuf,

        /// Reassembled output file [default: "joined_file" in PARTS_DIR]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File-name prefix used to discover parts
        #[arg(short, long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_parses_with_defaults() {
        let cli = Cli::try_parse_from(["fsplit", "split", "input.bin", "-s", "10MB"]).unwrap();
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Split {
                source,
                chunk_size,
                out_dir,
                prefix,
            } => {
                assert_eq!(source, PathBuf::from("input.bin"));
                assert_eq!(chunk_size, "10MB");
                assert!(out_dir.is_none());
                assert_eq!(prefix, DEFAULT_PREFIX);
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn split_requires_chunk_size() {
        assert!(Cli::try_parse_from(["fsplit", "split", "input.bin"]).is_err());
    }

    #[test]
    fn join_parses_with_defaults() {
        let cli = Cli::try_parse_from(["fsplit", "join", "parts/"]).unwrap();
        match cli.command {
            Commands::Join {
                parts_dir,
                output,
                prefix,
            } => {
                assert_eq!(parts_dir, PathBuf::from("parts/"));
                assert!(output.is_none());
                assert_eq!(prefix, DEFAULT_PREFIX);
            }
            other => panic!("expected join, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli =
            Cli::try_parse_from(["fsplit", "join", "parts/", "-q", "-o", "out.bin"]).unwrap();
        assert!(cli.quiet);
    }
}
