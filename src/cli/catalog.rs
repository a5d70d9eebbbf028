use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::IngredientCatalog;
use crate::cli::lookup::print_entry_detail;
use crate::cli::{truncate, tsv_field, CatalogOptions, OutputFormat};
use crate::matching::normalize::normalize;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all entries in the catalog
    List {
        /// Filter by status (e.g., "vegan")
        #[arg(long)]
        status: Option<String>,
    },

    /// Show details of a specific entry
    Show {
        /// Name, alias or E-number of the entry
        #[arg(required = true)]
        name: String,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

/// Execute catalog subcommands
///
/// # Errors
///
/// Returns an error if the entry is not found, output cannot be serialized, or
/// the export file cannot be written.
pub fn run(
    args: CatalogArgs,
    catalog: &CatalogOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { status } => run_list(catalog, status.as_deref(), format, verbose),
        CatalogCommands::Show { name } => run_show(&name, catalog, format, verbose),
        CatalogCommands::Export { output } => run_export(output, catalog, verbose),
    }
}

fn run_list(
    options: &CatalogOptions,
    status_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = options.load_catalog(verbose)?;

    let filtered: Vec<_> = catalog
        .iter()
        .map(|(entry, _)| entry)
        .filter(|entry| {
            status_filter.map_or(true, |status| {
                entry
                    .entry
                    .status
                    .to_lowercase()
                    .contains(&status.to_lowercase())
            })
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let name_width = filtered
                .iter()
                .map(|e| e.entry.display_name().chars().count().min(40))
                .max()
                .unwrap_or(4)
                .max(4);
            let status_width = filtered
                .iter()
                .map(|e| e.entry.status.chars().count())
                .max()
                .unwrap_or(6)
                .max(6);

            let total_width = 5 + name_width + status_width + 8 + 3;

            println!("Ingredient Catalog ({} entries)\n", filtered.len());
            println!(
                "{:>4} {:<name_w$} {:<status_w$} {:>8}",
                "#",
                "Name",
                "Status",
                "Aliases",
                name_w = name_width,
                status_w = status_width
            );
            println!("{}", "-".repeat(total_width));

            for e in &filtered {
                println!(
                    "{:>4} {:<name_w$} {:<status_w$} {:>8}",
                    e.id.0,
                    truncate(&e.entry.display_name(), name_width),
                    e.entry.status,
                    e.entry.aliases.len(),
                    name_w = name_width,
                    status_w = status_width
                );
                if verbose && !e.entry.aliases.is_empty() {
                    println!("     └─ {}", e.entry.aliases.join(", "));
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tlocal_name\tstatus\taliases");
            for e in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    e.id.0,
                    tsv_field(&e.entry.name),
                    tsv_field(e.entry.local_name.as_deref().unwrap_or("")),
                    tsv_field(&e.entry.status),
                    tsv_field(&e.entry.aliases.join(","))
                );
            }
        }
    }

    Ok(())
}

fn run_show(
    name: &str,
    options: &CatalogOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = options.load_catalog(verbose)?;

    let found = catalog
        .find_exact(&normalize(name))
        .ok_or_else(|| anyhow::anyhow!("Ingredient '{name}' not found in the catalog"))?;

    match format {
        OutputFormat::Text => {
            print_entry_detail(&found.entry.display_name(), found.entry);
            if verbose {
                println!("\n   Entry: {}", found.id);
                println!("   Keys:  {}", catalog.keys_of(found.id).join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(found.entry)?);
        }
        OutputFormat::Tsv => {
            println!("key");
            for key in catalog.keys_of(found.id) {
                println!("{}", tsv_field(key));
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, options: &CatalogOptions, verbose: bool) -> anyhow::Result<()> {
    let outcome = options.load(verbose)?;
    let source = outcome.describe();
    let catalog = IngredientCatalog::from_entries(outcome.into_entries());

    let json = catalog.to_json(Some(&source))?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} entries to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
