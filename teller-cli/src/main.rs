use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use teller_core::DocumentExtraction;

mod export;
mod intake;
mod profile;
mod view;

use view::FilterOpts;

#[derive(Parser, Debug)]
#[command(
    name = "teller",
    version,
    about = "Extract transactions from positioned statement text dumps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputOpts {
    /// Fragment dump files, one JSON document each
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML profile overriding layout thresholds for a different template
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions and print them as a table
    Extract {
        #[command(flatten)]
        input: InputOpts,

        #[command(flatten)]
        filter: FilterOpts,
    },

    /// Print income/expense/net totals, overall and per account
    Summary {
        #[command(flatten)]
        input: InputOpts,
    },

    /// Write the (optionally filtered) transactions to a CSV file
    Export {
        #[command(flatten)]
        input: InputOpts,

        #[command(flatten)]
        filter: FilterOpts,

        /// Output path (default: statement_export_<date>.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Extract { input, filter } => {
            let merged = run_extraction(&input).await?;
            let rows = view::apply_filters(&merged.transactions, &filter);
            view::print_table(&rows);
            println!("{} transactions found", rows.len());
            view::print_totals("All accounts", &view::totals(&rows));
        }

        Command::Summary { input } => {
            let merged = run_extraction(&input).await?;
            let all: Vec<&_> = merged.transactions.iter().collect();
            view::print_totals("All accounts", &view::totals(&all));
            for account in &merged.accounts {
                let rows: Vec<&_> = merged
                    .transactions
                    .iter()
                    .filter(|t| &t.account == account)
                    .collect();
                view::print_totals(account, &view::totals(&rows));
            }
        }

        Command::Export { input, filter, out } => {
            let merged = run_extraction(&input).await?;
            let rows = view::apply_filters(&merged.transactions, &filter);
            if rows.is_empty() {
                bail!("no transactions to export");
            }
            let path = out.unwrap_or_else(export::default_export_path);
            export::write_csv(&path, &rows)?;
            println!("wrote {} transactions to {}", rows.len(), path.display());
        }
    }

    Ok(())
}

/// Process every document fully in parallel and merge the results.
///
/// A document that fails intake or extraction is reported on stderr and
/// skipped; it never affects its siblings.
async fn run_extraction(input: &InputOpts) -> Result<DocumentExtraction> {
    let cfg = profile::load(input.profile.as_deref())?;

    let mut handles = Vec::with_capacity(input.files.len());
    for path in &input.files {
        let task_path = path.clone();
        let cfg = cfg.clone();
        let handle = tokio::task::spawn_blocking(move || intake::extract_file(&task_path, &cfg));
        handles.push((path.clone(), handle));
    }

    let mut merged = DocumentExtraction::default();
    let mut failures = 0usize;
    for (path, handle) in handles {
        match handle.await? {
            Ok(doc) => {
                merged.transactions.extend(doc.transactions);
                merged.accounts.extend(doc.accounts);
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: {err:#}", path.display());
            }
        }
    }

    if failures == input.files.len() {
        bail!("no document could be processed");
    }
    Ok(merged)
}
