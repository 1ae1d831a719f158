use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 6] = ["id", "date", "description", "category", "type", "amount"];

/// Write `txns` as CSV to `path`. Returns the number of data rows written.
pub(crate) fn export_to_csv(path: &Path, txns: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(file, txns)?;
    log::info!("exported {count} transactions to {}", path.display());
    Ok(count)
}

pub(crate) fn write_csv<W: Write>(out: W, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for txn in txns {
        let kind = txn.kind().map(|k| k.as_str()).unwrap_or("");
        wtr.write_record([
            txn.id.to_string().as_str(),
            txn.date.as_str(),
            txn.description.as_str(),
            txn.category.as_str(),
            kind,
            txn.amount.to_string().as_str(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}

#[cfg(test)]
mod tests;
