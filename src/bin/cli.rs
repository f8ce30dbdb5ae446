//! envstore CLI
//!
//! Builds a filtered environment, then prints it or runs a command with it.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use clap::Parser;
use envstore::{Config, Environ};
use tracing_subscriber::{fmt, EnvFilter};

/// envstore
#[derive(Parser, Debug)]
#[command(name = "envstore")]
#[command(about = "Build a filtered environment and print it or run a command with it")]
#[command(version)]
struct Args {
    /// Start from an empty environment instead of the current one
    #[arg(short, long)]
    clean: bool,

    /// Load variables from a .env style file (repeatable, later files win)
    #[arg(short = 'f', long = "env-file", value_name = "FILE")]
    env_files: Vec<PathBuf>,

    /// Set a variable
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Remove a variable
    #[arg(short, long, value_name = "KEY")]
    unset: Vec<String>,

    /// Keep only keys matching this pattern (anchored regex, repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    keep: Vec<String>,

    /// Drop keys matching this pattern (anchored regex, repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    drop: Vec<String>,

    /// Fail when a keep/drop pattern matches nothing
    #[arg(long)]
    strict: bool,

    /// Print the environment as a JSON array
    #[arg(long)]
    json: bool,

    /// Command to run with the environment (after `--`)
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            inherit_os: !self.clean,
            env_files: self.env_files.clone(),
            set: self.set.clone(),
            unset: self.unset.clone(),
            keep: self.keep.clone(),
            drop: self.drop.clone(),
            strict: self.strict,
        }
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match envstore::environ::parse_entry(s) {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

fn main() {
    // Initialize tracing/logging (stderr, so stdout stays clean for output)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let environ = match args.config().materialize() {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to build environment: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.split_first() {
        Some((program, rest)) => run(&environ, program, rest),
        None => {
            if let Err(e) = print(&environ, args.json) {
                tracing::error!("Failed to write environment: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Print the environment, one `key=value` per line or as JSON
fn print(environ: &Environ, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        out.write_all(&environ.to_json()?)?;
        writeln!(out)?;
    } else {
        for line in environ.as_slice() {
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}

/// Run `program` with exactly this environment and exit with its status
fn run(environ: &Environ, program: &str, args: &[String]) -> ! {
    tracing::debug!(program, vars = environ.len(), "spawning command");

    let status = environ.apply_to(&mut Command::new(program)).args(args).status();

    match status {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => {
            tracing::error!("Failed to run {}: {}", program, e);
            std::process::exit(127);
        }
    }
}
