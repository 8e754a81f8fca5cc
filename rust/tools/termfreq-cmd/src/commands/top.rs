//! Top command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use termfreq_stats::{TermStat, TopTermsOptions, TotalFreqSource, extract_top_terms};

use crate::commands::{OutputFormat, load_index};
use crate::utils::format_count;

#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// Number of terms to report [default: 100, or the value from --options]
    #[arg(short = 'n', long)]
    num_terms: Option<usize>,

    /// Field to scan (can be specified multiple times; all fields if omitted)
    #[arg(short, long = "field")]
    field: Vec<String>,

    /// Report total term frequency and sort by it
    #[arg(short = 't', long = "totals")]
    totals: bool,

    /// Use the field-wide occurrence sum as every term's total (implies -t)
    #[arg(long)]
    aggregate: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with extraction options; command-line flags take precedence
    #[arg(long)]
    options: Option<String>,

    /// Index snapshot (JSON) to read
    index_path: String,
}

#[derive(Serialize)]
struct TopReport<'a> {
    index: &'a str,
    options: &'a TopTermsOptions,
    terms: Vec<TermEntry>,
}

#[derive(Serialize)]
struct TermEntry {
    field: String,
    term: String,
    doc_freq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_term_freq: Option<u64>,
}

impl From<&TermStat> for TermEntry {
    fn from(stat: &TermStat) -> Self {
        TermEntry {
            field: stat.field().to_string(),
            term: stat.term_display(),
            doc_freq: stat.doc_freq(),
            total_term_freq: stat.total_term_freq(),
        }
    }
}

pub fn run(args: TopArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&args, &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute(args: &TopArgs, out: &mut impl Write) -> Result<()> {
    let options = resolve_options(args)?;
    let index = load_index(&args.index_path)?;
    let top = extract_top_terms(&index, &options).context("Failed to extract top terms")?;
    log::info!(
        "extracted {} of at most {} terms from {}",
        top.len(),
        options.num_terms,
        args.index_path
    );

    match args.format {
        OutputFormat::Json => {
            let report = TopReport {
                index: &args.index_path,
                options: &options,
                terms: top.iter().map(TermEntry::from).collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Text | OutputFormat::Tsv if top.is_empty() => {
            writeln!(out, "No results")?;
        }
        OutputFormat::Text => write_text(&top, options.include_total_term_freq, out)?,
        OutputFormat::Tsv => write_tsv(&top, options.include_total_term_freq, out)?,
    }
    Ok(())
}

/// Builds the extraction options: the `--options` file (or the defaults),
/// then the command-line flags on top.
fn resolve_options(args: &TopArgs) -> Result<TopTermsOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file {path}"))?;
            TopTermsOptions::from_json(&json)
                .with_context(|| format!("Invalid options file {path}"))?
        }
        None => TopTermsOptions::default(),
    };
    if let Some(num_terms) = args.num_terms {
        options.num_terms = num_terms;
    }
    if !args.field.is_empty() {
        options.fields = Some(args.field.clone());
    }
    if args.totals {
        options.include_total_term_freq = true;
    }
    if args.aggregate {
        options.include_total_term_freq = true;
        options.total_freq_source = TotalFreqSource::FieldAggregate;
    }
    options.validate().context("Invalid extraction options")?;
    Ok(options)
}

fn write_text(top: &[TermStat], with_totals: bool, out: &mut impl Write) -> Result<()> {
    for stat in top {
        if with_totals {
            writeln!(
                out,
                "{}:{} \t totalTF = {} \t doc freq = {}",
                stat.field(),
                stat.term_display(),
                format_count(stat.total_term_freq().unwrap_or(0)),
                format_count(stat.doc_freq())
            )?;
        } else {
            writeln!(
                out,
                "{}:{} {}",
                stat.field(),
                stat.term_display(),
                format_count(stat.doc_freq())
            )?;
        }
    }
    Ok(())
}

fn write_tsv(top: &[TermStat], with_totals: bool, out: &mut impl Write) -> Result<()> {
    for stat in top {
        write!(
            out,
            "{}\t{}\t{}",
            stat.doc_freq(),
            stat.field(),
            stat.term_display()
        )?;
        if with_totals {
            write!(out, "\t{}", stat.total_term_freq().unwrap_or(0))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
