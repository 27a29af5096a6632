//! Binary entry point for the `fsplit` command-line tool.
//!
//! Validates arguments, submits the requested operation to a background
//! [`JobRunner`], renders the progress stream while the worker runs (a bar
//! at the default display level, per-event messages at level 3 and above),
//! and maps the outcome to an exit code.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use fsplit::cli::args::{Cli, Commands};
use fsplit::cli::constants::{
    display_level, set_display_level, DEFAULT_JOIN_OUTPUT, PROGRAM_NAME,
};
use fsplit::cli::parse_size;
use fsplit::displaylevel;
use fsplit::runner::{JobHandle, JobOutcome, JobRunner};
use fsplit::{JoinJob, SplitJob};

// ── Progress rendering ────────────────────────────────────────────────────────

const BAR_TEMPLATE: &str = "[{bar:40.cyan/blue}] {pos:>3}% {wide_msg}";

/// Drains the job's progress channel, driving the bar or the event log.
fn render_progress(handle: &JobHandle) -> anyhow::Result<()> {
    let bar = if display_level() == 2 {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .context("progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    for event in handle.progress().iter() {
        if let Some(ref pb) = bar {
            pb.set_position(u64::from(event.percent));
            pb.set_message(event.message.clone());
        }
        displaylevel!(3, "{:>3}% {}\n", event.percent, event.message);
    }

    if let Some(pb) = bar {
        pb.finish_and_clear();
    }
    Ok(())
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Parts land next to the source when no directory is chosen.
fn default_out_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.quiet {
        1
    } else {
        2 + u32::from(cli.verbose)
    };
    set_display_level(level);

    let runner = JobRunner::new(1, 1).ok_or_else(|| anyhow!("failed to start worker pool"))?;

    let handle = match cli.command {
        Commands::Split {
            source,
            chunk_size,
            out_dir,
            prefix,
        } => {
            let chunk_size = parse_size(&chunk_size)?;
            let output_dir = out_dir.unwrap_or_else(|| default_out_dir(&source));
            runner.submit_split(SplitJob {
                source,
                chunk_size,
                output_dir,
                prefix,
            })
        }
        Commands::Join {
            parts_dir,
            output,
            prefix,
        } => {
            let output = output.unwrap_or_else(|| parts_dir.join(DEFAULT_JOIN_OUTPUT));
            runner.submit_join(JoinJob {
                parts_dir,
                prefix,
                output,
            })
        }
    };

    render_progress(&handle)?;
    match handle.wait()? {
        JobOutcome::Split { parts } => displaylevel!(2, "{} part(s) written\n", parts),
        JobOutcome::Join { bytes } => displaylevel!(2, "{} byte(s) written\n", bytes),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", PROGRAM_NAME, e);
        process::exit(1);
    }
}
