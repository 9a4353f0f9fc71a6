use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::PrepConfig;
use crate::constants::sampling;
use crate::dedup::DedupOutcome;
use crate::prep::{RunReport, SampleOutcome, SamplePrep};
use crate::report::format_megabytes;

#[derive(Debug, Parser)]
#[command(
    name = "rowsample",
    version,
    disable_help_subcommand = true,
    about = "Deterministic row sampling and duplicate cleanup for CSV datasets",
    long_about = "Draw a seeded uniform sample from each configured CSV input, write it next to the source, collapse the duplicated totals pair down to one canonical file, and report the produced files with their sizes.",
    after_help = "Missing inputs are reported as warnings and per-file failures never abort the run; the report always covers every configured input."
)]
struct PrepCli {
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding the input CSV files"
    )]
    data_dir: PathBuf,
    #[arg(long, help = "Optional deterministic seed override")]
    seed: Option<u64>,
    #[arg(
        long = "min-rows",
        default_value_t = sampling::MIN_SAMPLE_ROWS,
        value_parser = parse_positive_usize,
        help = "Lower bound on the sample size before clamping to the source row count"
    )]
    min_rows: usize,
    #[arg(
        long = "sample-divisor",
        default_value_t = sampling::SAMPLE_DIVISOR,
        value_parser = parse_positive_usize,
        help = "Divisor for the proportional part of the sample size"
    )]
    sample_divisor: usize,
    #[arg(
        long = "input",
        value_name = "FILE",
        help = "Input file name override, repeat as needed in sampling order"
    )]
    inputs: Vec<String>,
    #[arg(long, help = "Emit the run report as JSON instead of text")]
    json: bool,
}

/// Run the sampling CLI over `args_iter` (binary name excluded).
///
/// Help and version requests print and return `Ok(())`; only invalid usage
/// or an invalid configuration surfaces as an error.
pub fn run_sample_prep<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<PrepCli, _>(std::iter::once("rowsample".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let mut config = PrepConfig::default()
        .with_data_dir(cli.data_dir)
        .with_sample_policy(cli.min_rows, cli.sample_divisor);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if !cli.inputs.is_empty() {
        config = config.with_sample_inputs(cli.inputs);
    }

    let report = SamplePrep::new(config)?.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_run_report(&report);
    }

    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("could not parse '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("value must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn print_run_report(report: &RunReport) {
    println!("=== sample prep run ===");
    println!("started : {}", report.started_at.to_rfc3339());
    println!("elapsed : {} ms", report.elapsed_ms);
    println!("data dir: {}", report.config.data_dir().display());
    println!("seed    : {}", report.config.seed);
    println!();

    println!("[SAMPLING]");
    for (name, outcome) in &report.samples {
        println!("--- {} ---", name);
        match outcome {
            SampleOutcome::Sampled {
                source_rows,
                source_columns,
                sample_rows,
                output,
            } => {
                println!("status      : sampled");
                println!(
                    "source shape: {} rows x {} columns",
                    source_rows, source_columns
                );
                println!("sample rows : {}", sample_rows);
                println!("written to  : {}", output);
            }
            SampleOutcome::Missing => {
                println!("status      : missing, skipped");
            }
            SampleOutcome::Failed { reason } => {
                println!("status      : failed");
                println!("reason      : {}", reason);
            }
        }
    }
    println!();

    println!("[DUPLICATE CLEANUP]");
    match &report.dedup {
        DedupOutcome::Resolved {
            kept,
            kept_bytes,
            removed,
            removed_bytes,
            canonical,
        } => {
            println!("kept     : {} ({} bytes)", kept, kept_bytes);
            println!("removed  : {} ({} bytes)", removed, removed_bytes);
            println!("canonical: {}", canonical);
        }
        DedupOutcome::Skipped { missing } => {
            println!("skipped  : missing {}", missing.join(", "));
        }
        DedupOutcome::Failed { reason } => {
            println!("failed   : {}", reason);
        }
    }
    println!();

    println!("[PRODUCED FILES]");
    if report.outputs.is_empty() {
        println!("none");
    } else {
        for output in &report.outputs {
            println!("{} ({})", output.name, format_megabytes(output.bytes));
        }
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!();
        println!("[WARNINGS]");
        for warning in &warnings {
            println!("- {}", warning);
        }
    }
}
