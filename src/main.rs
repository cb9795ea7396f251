//! node-descriptor - inspect a node config
//!
//! Loads a node config file, builds its descriptor and prints what a
//! scheduler would see: the descriptor itself and its memory/CPU capacity.

use anyhow::Context;
use clap::Parser;
use node_descriptor::{logging, NodeConfig, NodeDescriptor};
use std::fmt::Debug;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Node config file (JSON, or TOML with a .toml extension)
    config: PathBuf,

    /// Print the descriptor as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    logging::init();
    let args = Args::parse();

    let config = NodeConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let node = config.into_descriptor();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&node)?);
        return Ok(ExitCode::SUCCESS);
    }

    let complete = report_capacity(&node, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(if complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print the descriptor and its memory/CPU capacity
///
/// A missing well-known resource is written to `err` and logged. Returns
/// `false` if either capacity is missing.
fn report_capacity<M: Debug, S: Debug>(
    node: &NodeDescriptor<M, S>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    writeln!(out, "{}", node)?;

    let mut complete = true;
    match node.total_memory() {
        Ok(memory) => writeln!(out, "memory: {} MB", memory)?,
        Err(e) => {
            tracing::error!("{}", e);
            writeln!(err, "error: {}", e)?;
            complete = false;
        }
    }
    match node.total_cpu() {
        Ok(cpu) => writeln!(out, "cpu: {}%", cpu)?,
        Err(e) => {
            tracing::error!("{}", e);
            writeln!(err, "error: {}", e)?;
            complete = false;
        }
    }

    Ok(complete)
}
