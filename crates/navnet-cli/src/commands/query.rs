//! Single command execution.

use anyhow::{bail, Result};

use navnet_cli::output::{unrecognised_message, OutputFormat};
use navnet_lib::QueryEngine;

use super::NetworkInputs;

/// Handle the query subcommand.
///
/// Unlike `run`, an unrecognised command name is an error here so the exit
/// status reflects it.
pub fn handle_query(
    inputs: &NetworkInputs<'_>,
    format: OutputFormat,
    tokens: &[String],
) -> Result<()> {
    let Some((name, args)) = tokens.split_first() else {
        bail!("no command given");
    };

    let (network, _) = inputs.build()?;
    let engine = QueryEngine::new(&network).with_shortest_algorithm(inputs.shortest);

    let Some(report) = engine.execute(name, args) else {
        bail!("{}", unrecognised_message(&tokens.join(" ")));
    };

    print!("{}", format.render(&report)?);
    Ok(())
}
