use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::lookup::print_entry_detail;
use crate::cli::{tsv_field, CatalogOptions, OutputFormat};
use crate::core::types::BulkPolicy;
use crate::matching::bulk::{BulkOutcome, BulkReport};
use crate::matching::engine::{Matcher, MatcherConfig, DEFAULT_UNKNOWN_DISPLAY_LIMIT};

#[derive(Args)]
pub struct PasteArgs {
    /// File holding the ingredient list (use - for stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Also match long aliases appearing as whole words inside a token
    #[arg(long)]
    pub whole_words: bool,

    /// Maximum number of unknown ingredients to list
    #[arg(long, value_name = "N", default_value_t = DEFAULT_UNKNOWN_DISPLAY_LIMIT)]
    pub show_unknown: usize,
}

/// Execute the paste command
///
/// # Errors
///
/// Returns an error if the input cannot be read or output cannot be serialized.
pub fn run(
    args: PasteArgs,
    catalog: &CatalogOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;

    let config = MatcherConfig {
        unknown_display_limit: args.show_unknown,
        bulk_policy: if args.whole_words {
            BulkPolicy::WholeWords
        } else {
            BulkPolicy::Exact
        },
        ..MatcherConfig::default()
    };
    let matcher = Matcher::with_config(catalog.load_catalog(verbose)?, config);

    print_outcome(&matcher.bulk(&text), matcher.config(), format)
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read ingredient list {}", input.display()))
}

/// Render a bulk query answer
pub(crate) fn print_outcome(
    outcome: &BulkOutcome,
    config: &MatcherConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => match outcome {
            BulkOutcome::Loading => println!("The ingredient catalog is still loading..."),
            BulkOutcome::Empty => println!("Paste an ingredient list to check it."),
            BulkOutcome::Report(report) => print_text_report(report, config.unknown_display_limit),
        },
        OutputFormat::Tsv => {
            println!("result\ttoken\tname\tstatus");
            if let BulkOutcome::Report(report) = outcome {
                print_tsv_report(report);
            }
        }
    }
    Ok(())
}

fn print_text_report(report: &BulkReport, unknown_limit: usize) {
    println!(
        "Found {} known ingredient(s), {} unknown\n",
        report.found.len(),
        report.unknown.len()
    );

    for (i, m) in report.found.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }
        print_entry_detail(&m.display_name, &m.entry);
        if m.token != m.entry.name {
            println!("   Matched: \"{}\"", m.token);
        }
    }

    if !report.unknown.is_empty() {
        let (shown, omitted) = report.unknown_preview(unknown_limit);
        if !report.found.is_empty() {
            println!();
        }
        println!("Not in the catalog:");
        for token in shown {
            println!("   - {token}");
        }
        if omitted > 0 {
            println!("   ... and {omitted} more");
        }
    }
}

fn print_tsv_report(report: &BulkReport) {
    for m in &report.found {
        println!(
            "found\t{}\t{}\t{}",
            tsv_field(&m.token),
            tsv_field(&m.entry.name),
            tsv_field(&m.entry.status)
        );
    }
    for token in &report.unknown {
        println!("unknown\t{}\t\t", tsv_field(token));
    }
}
