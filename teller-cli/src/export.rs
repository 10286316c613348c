//! CSV export of the current transaction view.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use teller_core::Transaction;

/// Dated default, e.g. `statement_export_2026-08-27.csv`.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "statement_export_{}.csv",
        Local::now().format("%Y-%m-%d")
    ))
}

/// Write rows with the fixed `Date,Account,Description,Type,Amount`
/// header. The amount column carries the signed numeric value; quoting is
/// the writer's job.
pub fn write_csv(path: &Path, rows: &[&Transaction]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(["Date", "Account", "Description", "Type", "Amount"])?;
    for t in rows {
        let amount = t.amount.to_string();
        wtr.write_record([
            t.date.as_str(),
            t.account.as_str(),
            t.description.as_str(),
            t.kind.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
