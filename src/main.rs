use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use arrow::util::pretty::pretty_format_batches;
use clap::{Parser, Subcommand};

use nrtseries::DataFile;

#[derive(Parser)]
#[command(name = "nrtseries", version, about = "NRT instrument file tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the last rows of a file as a table
    Show {
        path: PathBuf,
        #[arg(long = "rows", default_value_t = 10)]
        rows: usize,
    },
    /// Print the SQL compiled from the file's `#!` directives
    Sql {
        path: PathBuf,
        /// Fail when any directive produced a diagnostic
        #[arg(long = "strict")]
        strict: bool,
    },
    /// Rewrite a file with split time columns
    Convert {
        path: PathBuf,
        #[arg(long = "output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { path, rows } => show(path, rows),
        Commands::Sql { path, strict } => sql(path, strict),
        Commands::Convert { path, output } => convert(path, output),
    }
}

fn show(path: PathBuf, rows: usize) -> Result<()> {
    let file = DataFile::open(&path).with_context(|| format!("reading {}", path.display()))?;
    let dataset = file.to_dataset()?;
    let batch = dataset.to_record_batch()?;

    let start = batch.num_rows().saturating_sub(rows);
    let tail = batch.slice(start, batch.num_rows() - start);
    println!("{}", pretty_format_batches(&[tail])?);
    println!("{} rows, last at {:?}", dataset.len(), dataset.series()[0].last_timestamp());
    Ok(())
}

fn sql(path: PathBuf, strict: bool) -> Result<()> {
    let file = DataFile::open(&path).with_context(|| format!("reading {}", path.display()))?;
    let batch = file.sql();

    for statement in &batch.statements {
        println!("{}", statement);
    }
    for diagnostic in &batch.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    if strict && !batch.is_clean() {
        bail!("{} directive problems in {}", batch.diagnostics.len(), path.display());
    }
    Ok(())
}

fn convert(path: PathBuf, output: PathBuf) -> Result<()> {
    let mut file = DataFile::open(&path).with_context(|| format!("reading {}", path.display()))?;
    file.write(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    log::info!("wrote {} records to {}", file.records().len(), output.display());
    Ok(())
}
