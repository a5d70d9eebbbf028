use std::io::{self, BufRead, Write};

use clap::Args;

use crate::cli::{lookup, paste, CatalogOptions, OutputFormat};
use crate::core::types::BulkPolicy;
use crate::matching::engine::MatcherConfig;
use crate::matching::session::MatcherSession;

/// Line prefix that checks the rest of the line as a pasted list
const PASTE_PREFIX: &str = ":paste ";

/// Line that ends the session
const QUIT_COMMAND: &str = ":quit";

#[derive(Args)]
pub struct InteractiveArgs {
    /// Wait for the catalog to finish loading before reading input
    #[arg(long)]
    pub wait: bool,

    /// Also match long aliases appearing as whole words inside pasted tokens
    #[arg(long)]
    pub whole_words: bool,
}

/// Execute the interactive command.
///
/// The catalog loads on a background runtime while stdin is read on the
/// calling thread, so lines arriving before the load completes are answered
/// with the loading state.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or stdin/stdout fail.
pub fn run(
    args: InteractiveArgs,
    catalog: &CatalogOptions,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let config = MatcherConfig {
        bulk_policy: if args.whole_words {
            BulkPolicy::WholeWords
        } else {
            BulkPolicy::Exact
        },
        ..MatcherConfig::default()
    };

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let session = MatcherSession::new(config.clone());
    session.start(catalog.source(), catalog.loader_config());

    if args.wait {
        if let Some(ready) = rt.block_on(session.ready()) {
            if verbose {
                eprintln!(
                    "Catalog ready from {} with {} entries",
                    ready.origin,
                    ready.matcher.catalog().len()
                );
            }
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }

        match line.strip_prefix(PASTE_PREFIX) {
            Some(text) => paste::print_outcome(&session.bulk(text), &config, format)?,
            None => lookup::print_outcome(line, &session.lookup(line), &config, format)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
