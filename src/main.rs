use clap::Parser;
use tracing_subscriber::EnvFilter;

use ingredient_detective::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ingredient_detective=debug,info")
    } else {
        EnvFilter::new("ingredient_detective=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Lookup(args) => {
            cli::lookup::run(args, &cli.catalog, cli.format, cli.verbose)?;
        }
        cli::Commands::Paste(args) => {
            cli::paste::run(args, &cli.catalog, cli.format, cli.verbose)?;
        }
        cli::Commands::Interactive(args) => {
            cli::interactive::run(args, &cli.catalog, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, &cli.catalog, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
