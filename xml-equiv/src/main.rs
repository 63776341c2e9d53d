use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xml_equiv_core::{DiffConfiguration, DiffResult, XmlDiff};

mod cli;
mod config;
mod report;

use cli::{Cli, Command, CompareArgs, OutputFormat};
use config::load_configuration;
use report::{render_summary, render_text};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Compare(args) => run_compare(args),
    }
}

fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let mut configuration = match &args.config {
        Some(path) => load_configuration(path)?,
        None => DiffConfiguration::default(),
    };
    if let Some(whitespace) = args.whitespace {
        configuration.whitespace = whitespace.into();
    }
    if let Some(description) = args.description {
        configuration.description = description;
    }
    debug!(?configuration, "comparison settings");

    let context = || {
        format!(
            "failed to compare {} with {}",
            args.control.display(),
            args.test.display()
        )
    };
    let mut diff =
        XmlDiff::from_files(&args.control, &args.test, configuration).with_context(context)?;
    let description = diff.description().to_string();
    let result = diff.compare().with_context(context)?;

    if !args.quiet {
        if args.summary {
            println!("{}", render_summary(result));
        } else {
            match args.format {
                OutputFormat::Text => {
                    println!("{}", render_text(&description, result))
                }
                OutputFormat::Json => {
                    let report = CompareReport {
                        description: &description,
                        control: args.control.display().to_string(),
                        test: args.test.display().to_string(),
                        result,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
    }

    if let Some(difference) = result.halting_difference() {
        bail!("documents differ: {difference}");
    }
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct CompareReport<'a> {
    description: &'a str,
    control: String,
    test: String,
    result: &'a DiffResult,
}
