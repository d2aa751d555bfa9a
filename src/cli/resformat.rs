use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::stats::GeometryCounts;

#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    file: String,
    processed: u64,
    skipped: u64,
    mapped_pair: u64,
    chrom_pair: u64,
    innie: u64,
    adapter_aggressive: u64,
    adapter_conservative: u64,
    overlapping: u64,
    mean_avg_quality: String,
}

impl<'a> Row<'a> {
    fn new(name: &'a str, file: &Path, counts: &GeometryCounts) -> Self {
        Self {
            name,
            file: file.display().to_string(),
            processed: counts.processed,
            skipped: counts.skipped,
            mapped_pair: counts.mapped_pair,
            chrom_pair: counts.chrom_pair,
            innie: counts.innie,
            adapter_aggressive: counts.adapter_aggressive,
            adapter_conservative: counts.adapter_conservative,
            overlapping: counts.overlapping,
            mean_avg_quality: format!("{:.2}", counts.mean_avg_quality()),
        }
    }
}

pub fn geometry<W: Write>(
    saveto: &mut csv::Writer<W>,
    name: &str,
    results: &[(PathBuf, GeometryCounts)],
) -> csv::Result<()> {
    for (file, counts) in results {
        saveto.serialize(Row::new(name, file, counts))?;
    }
    saveto.flush()?;
    Ok(())
}
