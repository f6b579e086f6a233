//! Purity CLI entry point
//!
//! Reads a tumour/normal VCF from a file or stdin and writes the purity
//! estimate to stdout. Diagnostics go to stderr.

use anyhow::Context;
use clap::Parser;
use log::{Level, LevelFilter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use vcf_purity::core::{open_input, write_estimate, AfSource, ConfigError, FieldName, PurityConfig};
use vcf_purity::{estimate_vcf, log_to};

#[derive(Parser)]
#[command(name = "purity")]
#[command(about = "Read a VCF, estimate purity")]
#[command(version)]
struct Cli {
    /// Input VCF, optionally gzip/bgzip or bzip2 compressed (stdin if omitted or '-')
    input: Option<PathBuf>,

    /// Name of the tumour sample
    #[arg(long)]
    tumour: String,

    /// AF is in the INFO field rather than per sample
    #[arg(long = "info-af", alias = "info_af")]
    info_af: bool,

    /// Name of the AF field
    #[arg(long = "af-name", alias = "af_name", default_value = "AF", value_parser = parse_field_name)]
    af_name: FieldName,

    /// Only use PASS variants
    #[arg(long = "pass-only", alias = "pass_only")]
    pass_only: bool,

    /// Only write the best estimate
    #[arg(long = "just-best", alias = "just_best")]
    just_best: bool,

    /// Minimum tumour AF to include
    #[arg(long = "min-af", alias = "min_af", default_value = "0")]
    min_af: f64,

    /// Minimum tumour depth to include (0 disables)
    #[arg(long = "min-dp", alias = "min_dp", default_value = "0")]
    min_dp: f64,

    /// Exclude hets in germline (possible LOH)
    #[arg(long = "filter-germline-het", alias = "filter_germline_het")]
    filter_germline_het: bool,

    /// More logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_field_name(s: &str) -> Result<FieldName, ConfigError> {
    FieldName::new(s)
}

impl Cli {
    fn config(&self) -> PurityConfig {
        PurityConfig {
            tumour: self.tumour.clone(),
            af_source: if self.info_af { AfSource::Info } else { AfSource::Format },
            af_field: self.af_name.clone(),
            min_af: self.min_af,
            min_dp: self.min_dp,
            pass_only: self.pass_only,
            filter_germline_het: self.filter_germline_het,
            just_best: self.just_best,
        }
    }
}

/// Stderr logger: `<timestamp> <LEVEL> <message>`
fn build_logger(verbose: bool) -> env_logger::Logger {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(buf, "{} {} {}", buf.timestamp(), record.level(), record.args())
        })
        .build()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = build_logger(cli.verbose);
    let start = Instant::now();

    let config = cli.config().validate().context("Invalid arguments")?;

    let source = match &cli.input {
        Some(path) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "stdin".to_string(),
    };
    log_to!(&logger, Level::Info, "reading from {}...", source);

    let input = open_input(cli.input.as_deref())
        .with_context(|| format!("Failed to open {}", source))?;
    let result = estimate_vcf(input, &config, &logger)
        .with_context(|| format!("Failed to estimate purity from {}", source))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_estimate(&mut out, &result.estimate, config.just_best)
        .context("Failed to write estimate")?;

    log_to!(
        &logger,
        Level::Debug,
        "{} records in {:.2}s",
        result.stats.total,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
