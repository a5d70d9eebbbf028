use clap::Args;

use crate::cli::{tsv_field, CatalogOptions, OutputFormat};
use crate::core::entry::CatalogEntry;
use crate::matching::engine::{LookupOutcome, MatchResult, Matcher, MatcherConfig};

#[derive(Args)]
pub struct LookupArgs {
    /// Ingredient name, INCI name or E-number (words are joined with spaces)
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum number of suggestions to show
    #[arg(short = 'n', long, default_value_t = crate::matching::engine::DEFAULT_SUGGESTION_LIMIT)]
    pub limit: usize,
}

/// Execute the lookup command
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or output cannot be serialized.
pub fn run(
    args: LookupArgs,
    catalog: &CatalogOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let config = MatcherConfig {
        suggestion_limit: args.limit,
        ..MatcherConfig::default()
    };
    let matcher = Matcher::with_config(catalog.load_catalog(verbose)?, config);

    let query = args.query.join(" ");
    let outcome = matcher.lookup(&query);

    print_outcome(&query, &outcome, matcher.config(), format)
}

/// Render an incremental query answer
pub(crate) fn print_outcome(
    query: &str,
    outcome: &LookupOutcome,
    config: &MatcherConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text(query, outcome, config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Tsv => print_tsv(outcome),
    }
    Ok(())
}

fn print_text(query: &str, outcome: &LookupOutcome, config: &MatcherConfig) {
    match outcome {
        LookupOutcome::Loading => println!("The ingredient catalog is still loading..."),
        LookupOutcome::NeedMoreInput => println!(
            "Type at least {} characters to search.",
            config.min_query_chars
        ),
        LookupOutcome::NoResults => println!("No ingredients found for \"{query}\"."),
        LookupOutcome::Detail(result) => print_entry_detail(&result.display_name, &result.entry),
        LookupOutcome::Suggestions { matches, total } => {
            if *total > matches.len() {
                println!(
                    "{total} ingredients match \"{query}\" (showing {}):\n",
                    matches.len()
                );
            } else {
                println!("{total} ingredients match \"{query}\":\n");
            }

            let name_width = matches
                .iter()
                .map(|m| m.display_name.chars().count().min(40))
                .max()
                .unwrap_or(4)
                .max(4);
            for m in matches {
                println!(
                    "  {:<name_w$}  {:<9}  {}",
                    crate::cli::truncate(&m.display_name, name_width),
                    m.tier.to_string(),
                    m.entry.status,
                    name_w = name_width
                );
            }
        }
    }
}

/// Full detail block for one entry
pub(crate) fn print_entry_detail(display_name: &str, entry: &CatalogEntry) {
    println!("{display_name}");
    println!("   Status: {}", entry.status);

    if !entry.aliases.is_empty() {
        println!("   Also known as: {}", entry.aliases.join(", "));
    }

    if let Some(explanation) = &entry.explanation {
        println!("\n   {explanation}");
    }

    if let Some(alternatives) = &entry.alternatives {
        println!("\n   Alternatives: {alternatives}");
    }
}

fn print_tsv(outcome: &LookupOutcome) {
    println!("state\ttier\tname\tlocal_name\tstatus");
    let state = match outcome {
        LookupOutcome::Loading => "loading",
        LookupOutcome::NeedMoreInput => "need_more_input",
        LookupOutcome::NoResults => "no_results",
        LookupOutcome::Detail(result) => {
            print_tsv_row("detail", result);
            return;
        }
        LookupOutcome::Suggestions { matches, .. } => {
            for m in matches {
                print_tsv_row("suggestion", m);
            }
            return;
        }
    };
    println!("{state}\t\t\t\t");
}

fn print_tsv_row(state: &str, result: &MatchResult) {
    println!(
        "{state}\t{}\t{}\t{}\t{}",
        result.tier,
        tsv_field(&result.entry.name),
        tsv_field(result.entry.local_name.as_deref().unwrap_or("")),
        tsv_field(&result.entry.status)
    );
}
