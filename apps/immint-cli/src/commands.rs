//! Subcommand implementations

use std::error::Error;
use std::path::Path;

use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};

use immint_core::mapper::{map_file, MapperConfig};
use immint_core::merge::{merge_files, MergeConfig};
use immint_core::stats::count_dois_by_prefix;
use immint_core::typemap::{TypeMapping, TYPE_MAPPING_FILE};
use immint_datacite::client::DataCiteClient;
use immint_datacite::credentials::Credentials;
use immint_datacite::submit::{submit_file, SubmitOptions};

type CliResult = Result<(), Box<dyn Error>>;

fn row_progress(label: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("valid progress template"),
    );
    bar.set_message(label.to_string());
    bar
}

/// Load the type mapping: explicit path, else the side file when present,
/// else the built-in default
fn load_typemap(explicit: Option<&Path>) -> Result<TypeMapping, Box<dyn Error>> {
    if let Some(path) = explicit {
        return Ok(TypeMapping::load(path)?);
    }
    let side_file = Path::new(TYPE_MAPPING_FILE);
    if side_file.exists() {
        return Ok(TypeMapping::load(side_file)?);
    }
    Ok(TypeMapping::default())
}

pub fn convert(
    input: &Path,
    output: &Path,
    typemap: Option<&Path>,
    uri_prefixes: Vec<String>,
) -> CliResult {
    let mapping = load_typemap(typemap)?;
    let config = if uri_prefixes.is_empty() {
        MapperConfig::default()
    } else {
        MapperConfig { uri_prefixes }
    };

    let bar = row_progress("converting rows");
    let report = map_file(input, output, &mapping, &config, |count| {
        bar.set_message(format!("converting rows: {}", count));
        bar.tick();
    })?;
    bar.finish_and_clear();

    println!("Transformed data saved to {}", output.display());
    println!("Rows in input file: {}", report.rows_in);
    println!("Rows in output file: {}", report.rows_out);
    Ok(())
}

pub fn typemap(from: Option<&Path>, save: bool) -> CliResult {
    let mapping = match from {
        Some(path) => TypeMapping::load(path)?,
        None => load_typemap(None)?,
    };

    println!("{}", mapping.to_json_string());

    if save {
        mapping.save(Path::new(TYPE_MAPPING_FILE))?;
        println!("Type mapping saved to {}", TYPE_MAPPING_FILE);
    }
    Ok(())
}

pub async fn mint(
    input: &Path,
    credentials: &Path,
    output: &Path,
    log_dir: &Path,
    no_log: bool,
) -> CliResult {
    let credentials = Credentials::from_file(credentials)?;
    let client = DataCiteClient::new(credentials);

    let options = SubmitOptions {
        output: output.to_path_buf(),
        log_dir: if no_log {
            None
        } else {
            Some(log_dir.to_path_buf())
        },
    };

    let bar = row_progress("submitting");
    let report = submit_file(&client, input, &options, |count| {
        bar.set_message(format!("submitting: {}", count));
        bar.tick();
    })
    .await?;
    bar.finish_and_clear();

    println!("DOIs processed. Results saved to {}", report.output.display());
    if let Some(log_copy) = &report.log_copy {
        println!("Run log saved to {}", log_copy.display());
    }
    println!(
        "Total DOIs successfully generated: {}/{}",
        report.minted,
        report.results.len()
    );
    Ok(())
}

pub fn merge(export: &Path, import: &Path, markers: Vec<String>) -> CliResult {
    let config = if markers.is_empty() {
        MergeConfig::default()
    } else {
        MergeConfig {
            doi_markers: markers,
        }
    };

    let report = merge_files(export, import, &config)?;
    let summary = report.summary;

    println!("--- Summary ---");
    println!("Total DOIs in export CSV: {}", summary.index_size);
    println!("DOIs added: {}", summary.rows_added);
    println!("Rows skipped (DOI already present): {}", summary.rows_skipped);
    println!("Updated CSV saved as: {}", report.output.display());
    Ok(())
}

pub fn stats(log_dir: &Path) -> CliResult {
    let counts = count_dois_by_prefix(log_dir)?;

    if counts.is_empty() {
        println!("No successful DOIs found in the log files.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Prefix", "DOIs"]);
    for entry in &counts {
        table.add_row(vec![entry.prefix.clone(), entry.count.to_string()]);
    }
    println!("{table}");
    Ok(())
}
