//! immint - DSpace to DataCite DOI tooling
//!
//! One subcommand per operation: convert a DSpace export to a DataCite
//! import CSV, mint DOIs in bulk, merge minted DOIs back into a DSpace
//! import file, and report per-prefix statistics over past runs.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "immint")]
#[command(about = "DSpace to DataCite CSV conversion and bulk DOI registration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a DSpace export CSV into a DataCite import CSV
    Convert {
        /// DSpace metadata export CSV
        input: PathBuf,
        /// Output path for the normalized CSV
        output: PathBuf,
        /// Type mapping side file (defaults to ./type_mapping.json when present)
        #[arg(long)]
        typemap: Option<PathBuf>,
        /// Allowed source URI prefix (repeatable; defaults to the handle servers)
        #[arg(long = "uri-prefix")]
        uri_prefixes: Vec<String>,
    },

    /// Show or persist the resource type mapping
    Typemap {
        /// Replace the mapping from a JSON file before showing or saving
        #[arg(long)]
        from: Option<PathBuf>,
        /// Write the mapping to ./type_mapping.json
        #[arg(long)]
        save: bool,
    },

    /// Register one DOI per row of a DataCite import CSV
    Mint {
        /// Normalized import CSV (output of `convert`)
        input: PathBuf,
        /// Credentials JSON file (url, doiPrefix, username, password)
        #[arg(long)]
        credentials: PathBuf,
        /// Output path for the result CSV
        #[arg(long)]
        output: PathBuf,
        /// Log directory for the timestamped per-run copy
        #[arg(long, default_value = "log")]
        log_dir: PathBuf,
        /// Skip the per-run log copy
        #[arg(long)]
        no_log: bool,
    },

    /// Merge minted DOIs from a result CSV into a DSpace import CSV
    Merge {
        /// DOI result CSV (output of `mint`)
        export: PathBuf,
        /// DSpace import CSV to update
        import: PathBuf,
        /// Substring marking a field as already a DOI (repeatable)
        #[arg(long = "marker")]
        markers: Vec<String>,
    },

    /// Cumulative total of minted DOIs by prefix
    Stats {
        /// Log directory written by `mint`
        #[arg(long, default_value = "log")]
        log_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            output,
            typemap,
            uri_prefixes,
        } => commands::convert(&input, &output, typemap.as_deref(), uri_prefixes)?,
        Command::Typemap { from, save } => commands::typemap(from.as_deref(), save)?,
        Command::Mint {
            input,
            credentials,
            output,
            log_dir,
            no_log,
        } => commands::mint(&input, &credentials, &output, &log_dir, no_log).await?,
        Command::Merge {
            export,
            import,
            markers,
        } => commands::merge(&export, &import, markers)?,
        Command::Stats { log_dir } => commands::stats(&log_dir)?,
    }
    Ok(())
}
