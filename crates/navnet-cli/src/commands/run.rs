//! Batch processing of a command file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use navnet_cli::output::{timing_line, unrecognised_message};
use navnet_lib::QueryEngine;

use super::NetworkInputs;

/// Handle the run subcommand.
///
/// Every non-blank line of `commands_path` is executed in order. Result
/// blocks are appended to `output_path`; timings go to stdout and
/// unrecognised lines are reported on stderr without stopping the run.
pub fn handle_run(
    inputs: &NetworkInputs<'_>,
    commands_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let (network, build_time) = inputs.build()?;
    println!("{}", timing_line("BuildNetwork", build_time));

    let commands = fs::read_to_string(commands_path)
        .with_context(|| format!("failed to read commands from {}", commands_path.display()))?;
    let file = File::create(output_path)
        .with_context(|| format!("failed to create output file {}", output_path.display()))?;
    let mut sink = BufWriter::new(file);

    let engine = QueryEngine::new(&network).with_shortest_algorithm(inputs.shortest);
    let mut handled = 0usize;
    let mut unrecognised = 0usize;

    for line in commands.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let started = Instant::now();
        match engine.execute_line(line) {
            Some(report) => {
                sink.write_all(report.render().as_bytes())
                    .with_context(|| format!("failed to write to {}", output_path.display()))?;
                println!("{}", timing_line(line, started.elapsed()));
                handled += 1;
            }
            None => {
                warn!(command = line, "unrecognised command");
                eprintln!("{}", unrecognised_message(line));
                unrecognised += 1;
            }
        }
    }

    sink.flush()
        .with_context(|| format!("failed to write to {}", output_path.display()))?;
    info!(
        handled,
        unrecognised,
        output = %output_path.display(),
        "processed command file"
    );

    Ok(())
}
